//! Mapping transcript filenames to episode video links.
//!
//! Filenames and sheet titles follow the `<number>. Bölüm` naming convention,
//! e.g. `Kızıl Goncalar 12. Bölüm (FULL HD).srt` and `Kızıl Goncalar 12. Bölüm`.
//! Matching works on maximal digit runs, so episode `1` never matches inside
//! `11. Bölüm`.

use crate::metadata::{MetadataRow, MetadataTable};
use tracing::debug;

/// Episode marker that must follow the episode number.
const EPISODE_MARKER: &str = "bölüm";

pub const DEFAULT_TITLE_COLUMN: &str = "Title";
pub const DEFAULT_URL_COLUMN: &str = "Video url";

/// An episode number with leading zeros removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EpisodeNumber(String);

impl EpisodeNumber {
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the episode number from a transcript filename.
///
/// Accepts `<digits>[.][whitespace]Bölüm`, case-insensitive. Returns `None` for
/// filenames that do not follow the convention.
pub fn episode_number(filename: &str) -> Option<EpisodeNumber> {
    digit_runs(filename).into_iter().find_map(|(start, end)| {
        let rest = &filename[end..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        starts_with_marker(rest.trim_start())
            .then(|| EpisodeNumber::from_digits(&filename[start..end]))
    })
}

/// Whether a title mentions the episode as `<number>[ws].[ws]Bölüm`.
///
/// The title's digits must spell the episode number exactly, so `05. Bölüm`
/// in a title does not match episode `5`.
pub fn title_mentions_episode(title: &str, episode: &EpisodeNumber) -> bool {
    digit_runs(title).into_iter().any(|(start, end)| {
        if &title[start..end] != episode.as_str() {
            return false;
        }
        match title[end..].trim_start().strip_prefix('.') {
            Some(rest) => starts_with_marker(rest.trim_start()),
            None => false,
        }
    })
}

/// Append a `t=<seconds>s` start-time parameter to a video URL.
pub fn with_start_time(url: &str, seconds: u64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}s", url, separator, seconds)
}

/// Byte ranges of maximal ASCII digit runs.
fn digit_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_ascii_digit(), current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                runs.push((start, i));
                current = None;
            }
            _ => {}
        }
    }
    if let Some(start) = current {
        runs.push((start, text.len()));
    }

    runs
}

fn starts_with_marker(text: &str) -> bool {
    let mut chars = text.chars();
    EPISODE_MARKER.chars().all(|expected| {
        chars
            .next()
            .is_some_and(|c| c.to_lowercase().eq(expected.to_lowercase()))
    })
}

/// Resolves transcript filenames to video links via the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeResolver {
    pub title_column: String,
    pub url_column: String,
}

impl Default for EpisodeResolver {
    fn default() -> Self {
        Self {
            title_column: DEFAULT_TITLE_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
        }
    }
}

impl EpisodeResolver {
    pub fn new(title_column: impl Into<String>, url_column: impl Into<String>) -> Self {
        Self {
            title_column: title_column.into(),
            url_column: url_column.into(),
        }
    }

    /// First row in table order whose title mentions the episode.
    pub fn find_row<'a>(
        &self,
        episode: &EpisodeNumber,
        table: &'a MetadataTable,
    ) -> Option<&'a MetadataRow> {
        table.rows().iter().find(|row| {
            row.field(&self.title_column)
                .value()
                .is_some_and(|title| title_mentions_episode(&title.to_string(), episode))
        })
    }

    /// The video URL for a transcript, without a start time.
    pub fn base_url(&self, filename: &str, table: &MetadataTable) -> Option<String> {
        let Some(episode) = episode_number(filename) else {
            debug!("No episode number in {:?}", filename);
            return None;
        };

        let Some(row) = self.find_row(&episode, table) else {
            debug!("No metadata row for episode {} ({:?})", episode, filename);
            return None;
        };

        let url = row.field(&self.url_column).value()?.to_string();
        let url = url.trim();
        if url.is_empty() {
            debug!("Metadata row for episode {} has no video URL", episode);
            return None;
        }

        Some(url.to_string())
    }

    /// The video URL for a transcript with the start time appended.
    pub fn resolve(&self, filename: &str, table: &MetadataTable, seconds: u64) -> Option<String> {
        self.base_url(filename, table)
            .map(|url| with_start_time(&url, seconds))
    }
}
