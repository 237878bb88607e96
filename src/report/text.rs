// Plain-text search report
use super::{find_ignore_case, ResultFormatter};
use crate::search::SearchResult;
use console::style;

pub const NO_VIDEO_MESSAGE: &str = "video URL not found in metadata";

pub struct TextFormatter {
    /// Emit ANSI styling and highlight matches.
    pub color: bool,
}

impl ResultFormatter for TextFormatter {
    fn format(&self, query: &str, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return "No results found.\n".to_string();
        }

        let mut output = format!("{} results found.\n", results.len());

        for result in results {
            output.push('\n');
            output.push_str(&self.header(result));
            output.push('\n');
            output.push_str(&format!("  {}\n", self.highlight(&result.text, query)));
            match &result.video_url {
                Some(url) => output.push_str(&format!("  ▶ {}\n", url)),
                None => output.push_str(&format!("  - {}\n", self.dim(NO_VIDEO_MESSAGE))),
            }
        }

        output
    }
}

impl TextFormatter {
    pub fn header(&self, result: &SearchResult) -> String {
        let header = format!("{} - [{}]", result.filename, result.timestamp);
        if self.color {
            style(header).bold().force_styling(true).to_string()
        } else {
            header
        }
    }

    /// Wrap every occurrence of `query` in highlight styling.
    pub fn highlight(&self, text: &str, query: &str) -> String {
        if !self.color {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for (start, end) in find_ignore_case(text, query) {
            output.push_str(&text[last..start]);
            output.push_str(
                &style(&text[start..end])
                    .black()
                    .on_yellow()
                    .force_styling(true)
                    .to_string(),
            );
            last = end;
        }
        output.push_str(&text[last..]);
        output
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            style(text).dim().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}
