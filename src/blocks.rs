/// Splits input text into panel blocks.
///
/// Blocks are separated by one or more whitespace-only lines. Blocks that are
/// empty after trimming are dropped, so surviving blocks keep contiguous
/// 1-based indices in the output list.
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    let mut flush = |current: &mut Vec<&str>, blocks: &mut Vec<String>| {
        if current.is_empty() {
            return;
        }
        let block = current.join("\n");
        if !block.trim().is_empty() {
            blocks.push(block);
        }
        current.clear();
    };

    for line in text.split('\n') {
        if line.trim().is_empty() {
            flush(&mut current, &mut blocks);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut blocks);

    blocks
}
