use panelmaker::{Error, FontLibrary, RenderConfig, generate_panels, split_blocks};

#[test]
fn text_without_separators_is_one_block() {
    assert_eq!(split_blocks("hello"), vec!["hello"]);
    assert_eq!(split_blocks("hello\nworld"), vec!["hello\nworld"]);
}

#[test]
fn blank_lines_separate_blocks_in_order() {
    assert_eq!(split_blocks("a\n\nb\n\nc"), vec!["a", "b", "c"]);
    // A whitespace-only line is still a separator.
    assert_eq!(split_blocks("a\n   \nb"), vec!["a", "b"]);
    // Runs of blank lines collapse into a single separator.
    assert_eq!(split_blocks("a\n\n\n\nb"), vec!["a", "b"]);
}

#[test]
fn interior_newlines_are_kept_within_a_block() {
    assert_eq!(
        split_blocks("line one\nline two\n\nsecond block"),
        vec!["line one\nline two", "second block"]
    );
}

#[test]
fn crlf_input_segments_the_same_way() {
    let blocks = split_blocks("a\r\n\r\nb");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].trim(), "a");
    assert_eq!(blocks[1].trim(), "b");
}

#[test]
fn leading_and_trailing_blank_lines_produce_no_blocks() {
    assert_eq!(split_blocks("\n\nonly\n\n"), vec!["only"]);
    assert!(split_blocks("\n \n\t\n").is_empty());
}

#[test]
fn whitespace_only_blocks_do_not_consume_an_index() {
    let fonts = FontLibrary::new();
    let config = RenderConfig {
        width: 40,
        height: 30,
        ..RenderConfig::default()
    };
    let images = generate_panels(&config, &fonts, "first\n\n   \n\nsecond").unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].index, 1);
    assert_eq!(images[0].text, "first");
    assert_eq!(images[1].index, 2);
    assert_eq!(images[1].text, "second");
}

#[test]
fn empty_input_is_rejected_before_rendering() {
    let fonts = FontLibrary::new();
    let config = RenderConfig::default();
    assert!(matches!(
        generate_panels(&config, &fonts, ""),
        Err(Error::EmptyInput)
    ));
    assert!(matches!(
        generate_panels(&config, &fonts, "  \n \t \n"),
        Err(Error::EmptyInput)
    ));
}
