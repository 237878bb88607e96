pub mod srt;
pub mod timecode;

pub use srt::{parse_blocks, strip_tags, SubtitleBlocks};
pub use timecode::to_seconds;

/// A loaded transcript: the source filename and its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    pub filename: String,
    pub content: String,
}

impl TranscriptFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Parse the transcript into timed blocks. Each call parses afresh.
    pub fn blocks(&self) -> SubtitleBlocks {
        parse_blocks(&self.content)
    }
}

/// One timed entry of a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    /// Raw start timecode, e.g. `00:00:02,230`.
    pub start_time: String,
    /// Text with markup removed and lines joined by a single space.
    pub text: String,
}

impl SubtitleBlock {
    pub fn seconds(&self) -> u64 {
        to_seconds(&self.start_time)
    }
}
