use crate::episode::{with_start_time, EpisodeResolver};
use crate::metadata::MetadataTable;
use crate::subtitle::TranscriptFile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub filename: String,
    /// Raw start timecode of the matching block.
    pub timestamp: String,
    pub seconds: u64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub video_url: Option<String>,
}

/// Loaded transcripts and metadata that can be searched repeatedly.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    transcripts: Vec<TranscriptFile>,
    metadata: MetadataTable,
    resolver: EpisodeResolver,
}

impl SearchSession {
    pub fn new(transcripts: Vec<TranscriptFile>, metadata: MetadataTable) -> Self {
        Self {
            transcripts,
            metadata,
            resolver: EpisodeResolver::default(),
        }
    }

    /// Use a resolver with different column names.
    pub fn with_resolver(mut self, resolver: EpisodeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn transcripts(&self) -> &[TranscriptFile] {
        &self.transcripts
    }

    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    pub fn resolver(&self) -> &EpisodeResolver {
        &self.resolver
    }

    /// Find every block containing `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_with_limit(query, None)
    }

    /// Like [`search`](Self::search) but stops once `limit` results are collected.
    ///
    /// Results keep discovery order: transcripts in load order, blocks in
    /// parse order. An empty or whitespace-only query returns nothing.
    pub fn search_with_limit(&self, query: &str, limit: Option<usize>) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        if limit == Some(0) {
            return results;
        }

        for file in &self.transcripts {
            // the row lookup depends on the filename only
            let mut base_url: Option<Option<String>> = None;

            for block in file.blocks() {
                if !block.text.to_lowercase().contains(&needle) {
                    continue;
                }

                let seconds = block.seconds();
                let video_url = base_url
                    .get_or_insert_with(|| self.resolver.base_url(&file.filename, &self.metadata))
                    .as_deref()
                    .map(|url| with_start_time(url, seconds));

                results.push(SearchResult {
                    filename: file.filename.clone(),
                    timestamp: block.start_time,
                    seconds,
                    text: block.text,
                    video_url,
                });

                if limit.is_some_and(|max| results.len() >= max) {
                    debug!("Result limit of {} reached", results.len());
                    return results;
                }
            }
        }

        debug!("Query {:?} matched {} blocks", needle, results.len());
        results
    }
}
