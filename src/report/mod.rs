pub mod json;
pub mod text;

use crate::config::OutputFormat;
use crate::search::SearchResult;

pub trait ResultFormatter {
    fn format(&self, query: &str, results: &[SearchResult]) -> String;
}

pub fn create_formatter(format: OutputFormat, color: bool) -> Box<dyn ResultFormatter> {
    match format {
        OutputFormat::Text => Box::new(text::TextFormatter { color }),
        OutputFormat::Json => Box::new(json::JsonFormatter),
    }
}

/// Byte ranges of case-insensitive occurrences of `needle` in `haystack`.
///
/// Lowercasing can change byte lengths, so matching is done char by char on
/// the haystack itself instead of on a lowercased copy.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut search_from = 0;

    for (start, _) in haystack.char_indices() {
        if start < search_from {
            continue;
        }
        if let Some(end) = match_at(&haystack[start..], &needle) {
            ranges.push((start, start + end));
            search_from = start + end;
        }
    }

    ranges
}

/// Length in bytes of the prefix of `text` whose lowercase form equals `needle`.
fn match_at(text: &str, needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (offset, c) in text.char_indices() {
        for lower in c.to_lowercase() {
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}
