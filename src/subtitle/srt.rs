// SRT transcript parsing
use super::SubtitleBlock;
use regex::Regex;
use std::sync::OnceLock;

const TIME_SEPARATOR: &str = "-->";

/// Lazy iterator over the valid blocks of a transcript.
///
/// Blocks are separated by a blank line and consist of an index line, a
/// `start --> end` line, and one or more text lines. Anything else is skipped.
#[derive(Debug, Clone)]
pub struct SubtitleBlocks {
    content: String,
    offset: usize,
}

impl Iterator for SubtitleBlocks {
    type Item = SubtitleBlock;

    fn next(&mut self) -> Option<SubtitleBlock> {
        while self.offset < self.content.len() {
            let rest = &self.content[self.offset..];
            let (raw, consumed) = match rest.find("\n\n") {
                Some(end) => (&rest[..end], end + 2),
                None => (rest, rest.len()),
            };
            self.offset += consumed;

            if let Some(block) = parse_block(raw) {
                return Some(block);
            }
        }
        None
    }
}

/// Parse raw transcript text into subtitle blocks.
pub fn parse_blocks(content: &str) -> SubtitleBlocks {
    SubtitleBlocks {
        content: normalize_line_endings(content),
        offset: 0,
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

fn parse_block(raw: &str) -> Option<SubtitleBlock> {
    let lines: Vec<&str> = raw.trim_matches('\n').split('\n').collect();
    if lines.len() < 3 {
        return None;
    }

    // lines[0] is the cue index, never validated
    let (start, _end) = lines[1].split_once(TIME_SEPARATOR)?;
    let text = strip_tags(&lines[2..].join(" "));

    Some(SubtitleBlock {
        start_time: start.trim().to_string(),
        text: text.trim().to_string(),
    })
}

/// Remove inline markup such as `<i>` or `<font color="red">`.
pub fn strip_tags(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));
    tag.replace_all(text, "").into_owned()
}
