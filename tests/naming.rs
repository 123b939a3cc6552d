mod common;

use std::io::{Cursor, Read};

use panelmaker::{Error, GeneratedImage, sanitize_filename, zip_archive};

#[test]
fn sanitize_strips_forbidden_characters_then_truncates() {
    assert_eq!(sanitize_filename("My:Text*Panel"), "MyTextPan");
    assert_eq!(sanitize_filename("abcdefghijklmnop"), "abcdefghij");
    assert_eq!(sanitize_filename("a/b\\c:d"), "abcd");
}

#[test]
fn sanitize_falls_back_to_image_when_nothing_survives() {
    assert_eq!(sanitize_filename("\\/:*?\"<>|"), "image");
    assert_eq!(sanitize_filename("   "), "image");
    assert_eq!(sanitize_filename(""), "image");
}

#[test]
fn sanitize_trims_whitespace_after_truncation() {
    assert_eq!(sanitize_filename("  padded"), "padded");
    // 10th kept character is a space; it must not survive the trim.
    assert_eq!(sanitize_filename("ninechars and more"), "ninechars");
}

#[test]
fn export_file_name_is_index_underscore_text() {
    let img = GeneratedImage {
        index: 3,
        text: "My:Text*Panel".to_string(),
        png: vec![1, 2, 3],
    };
    assert_eq!(img.file_name(), "3_MyTextPan.png");
}

#[test]
fn zip_of_empty_run_is_rejected() {
    assert!(matches!(zip_archive(&[]), Err(Error::NoImages)));
}

#[test]
fn zip_contains_all_panels_under_export_names() {
    let images = vec![
        GeneratedImage {
            index: 1,
            text: "first".to_string(),
            png: common::solid_png(4, 4, [255, 0, 0, 255]),
        },
        GeneratedImage {
            index: 2,
            text: "second".to_string(),
            png: common::solid_png(4, 4, [0, 255, 0, 255]),
        },
    ];

    let archive = zip_archive(&images).unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(zip.len(), 2);

    for (i, expected) in images.iter().enumerate() {
        let mut entry = zip.by_index(i).unwrap();
        assert_eq!(entry.name(), expected.file_name());
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, expected.png, "archived bytes must be unmodified");
    }
}
