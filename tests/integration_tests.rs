//! Integration tests for scenefinder
//!
//! These tests drive the public API end to end on in-memory transcripts and
//! metadata tables.

use scenefinder::config::OutputFormat;
use scenefinder::episode::{episode_number, EpisodeResolver};
use scenefinder::metadata::{CellValue, MetadataRow, MetadataTable};
use scenefinder::report::create_formatter;
use scenefinder::subtitle::{parse_blocks, to_seconds, TranscriptFile};
use scenefinder::SearchSession;

const EPISODE_ONE: &str = "1
00:00:02,230 --> 00:00:04,640
Meryem, <i>nereye</i> gidiyorsun?

2
00:00:05,100 --> 00:00:07,000
Eve gidiyorum.

3
00:01:10,999 --> 00:01:12,000
- Meryem!
- Efendim?
";

const EPISODE_ELEVEN: &str = "1\r\n00:10:00,000 --> 00:10:02,000\r\nMERYEM burada.\r\n\r\n2\r\n00:10:03,000\r\nbroken block without an arrow\r\n\r\n3\r\n00:10:05,500 --> 00:10:07,000\r\nTamam.\r\n";

fn episode_table() -> MetadataTable {
    MetadataTable::new(vec![
        MetadataRow::from_cells([
            ("Title ", "Kızıl Goncalar 11. Bölüm"),
            (" Video url", "https://www.youtube.com/watch?v=eleven"),
        ]),
        MetadataRow::from_cells([
            ("Title", "Kızıl Goncalar 1. Bölüm"),
            ("Video url", "https://youtu.be/one"),
        ]),
    ])
}

fn transcripts() -> Vec<TranscriptFile> {
    vec![
        TranscriptFile::new(
            "Kızıl Goncalar 1. Bölüm (FULL HD)_Turkish (auto-generated).srt",
            EPISODE_ONE,
        ),
        TranscriptFile::new(
            "Kızıl Goncalar 11. Bölüm (FULL HD)_Turkish (auto-generated).srt",
            EPISODE_ELEVEN,
        ),
        TranscriptFile::new("fragman.srt", "1\n00:00:01,000 --> 00:00:02,000\nMeryem geliyor\n"),
    ]
}

// ============================================================================
// Parsing Tests
// ============================================================================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_parse_episode_transcript() {
        let blocks: Vec<_> = parse_blocks(EPISODE_ONE).collect();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Meryem, nereye gidiyorsun?");
        assert_eq!(blocks[2].text, "- Meryem! - Efendim?");
        assert_eq!(blocks[2].seconds(), 70);
    }

    #[test]
    fn test_parse_crlf_and_malformed_blocks() {
        let blocks: Vec<_> = parse_blocks(EPISODE_ELEVEN).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_time, "00:10:00,000");
        assert_eq!(blocks[1].text, "Tamam.");
    }

    #[test]
    fn test_transcript_blocks_reparse() {
        let file = TranscriptFile::new("a.srt", EPISODE_ONE);
        assert_eq!(file.blocks().collect::<Vec<_>>(), file.blocks().collect::<Vec<_>>());
    }

    #[test]
    fn test_timecode_truncation() {
        assert_eq!(to_seconds("00:00:02,999"), 2);
        assert_eq!(to_seconds("01:02:03.500"), 3723);
        assert_eq!(to_seconds("garbage"), 0);
    }
}

// ============================================================================
// Episode Resolution Tests
// ============================================================================

mod resolution_tests {
    use super::*;

    #[test]
    fn test_resolve_simple_filename() {
        let table = MetadataTable::new(vec![MetadataRow::from_cells([
            ("Title", "Show - 5. Bölüm"),
            ("Video url", "http://x/v"),
        ])]);
        let resolver = EpisodeResolver::default();

        assert_eq!(
            resolver.resolve("5. Bölüm.srt", &table, 42),
            Some("http://x/v?t=42s".to_string())
        );
    }

    #[test]
    fn test_digit_boundary_against_table() {
        let resolver = EpisodeResolver::default();
        let table = episode_table();

        let one = resolver.resolve("Kızıl Goncalar 1. Bölüm.srt", &table, 0);
        let eleven = resolver.resolve("Kızıl Goncalar 11. Bölüm.srt", &table, 0);

        assert_eq!(one.as_deref(), Some("https://youtu.be/one?t=0s"));
        assert_eq!(
            eleven.as_deref(),
            Some("https://www.youtube.com/watch?v=eleven&t=0s")
        );
    }

    #[test]
    fn test_unknown_episode_has_no_url() {
        let resolver = EpisodeResolver::default();
        assert_eq!(resolver.resolve("Kızıl Goncalar 2. Bölüm.srt", &episode_table(), 0), None);
        assert_eq!(episode_number("fragman.srt"), None);
    }

    #[test]
    fn test_numeric_url_cell_is_text() {
        let table = MetadataTable::new(vec![MetadataRow::from_cells([
            ("Title", CellValue::from("3. Bölüm")),
            ("Video url", CellValue::Number(12.0)),
        ])]);

        assert_eq!(
            EpisodeResolver::default().resolve("3. Bölüm.srt", &table, 1),
            Some("12?t=1s".to_string())
        );
    }
}

// ============================================================================
// Search Tests
// ============================================================================

mod search_tests {
    use super::*;

    fn session() -> SearchSession {
        SearchSession::new(transcripts(), episode_table())
    }

    #[test]
    fn test_search_across_files() {
        let results = session().search("meryem");

        let found: Vec<_> = results
            .iter()
            .map(|r| (r.filename.split(' ').nth(2).unwrap_or(r.filename.as_str()), r.seconds))
            .collect();
        assert_eq!(
            found,
            vec![("1.", 2), ("1.", 70), ("11.", 600), ("fragman.srt", 1)]
        );
    }

    #[test]
    fn test_search_result_count_matches_block_count() {
        let session = session();
        let expected: usize = session
            .transcripts()
            .iter()
            .flat_map(|t| t.blocks())
            .filter(|b| b.text.to_lowercase().contains("meryem"))
            .count();

        assert_eq!(session.search("MERYEM").len(), expected);
    }

    #[test]
    fn test_search_links() {
        let results = session().search("meryem");

        assert_eq!(results[0].video_url.as_deref(), Some("https://youtu.be/one?t=2s"));
        assert_eq!(results[1].video_url.as_deref(), Some("https://youtu.be/one?t=70s"));
        assert_eq!(
            results[2].video_url.as_deref(),
            Some("https://www.youtube.com/watch?v=eleven&t=600s")
        );
        assert_eq!(results[3].video_url, None);
    }

    #[test]
    fn test_empty_query() {
        assert!(session().search("").is_empty());
        assert!(session().search("  ").is_empty());
    }

    #[test]
    fn test_custom_resolver_columns() {
        let table = MetadataTable::new(vec![MetadataRow::from_cells([
            ("Bölüm Adı", "1. Bölüm"),
            ("Link", "http://x/1"),
        ])]);
        let session = SearchSession::new(transcripts(), table)
            .with_resolver(EpisodeResolver::new("Bölüm Adı", "Link"));

        let results = session.search("nereye");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].video_url.as_deref(), Some("http://x/1?t=2s"));
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_text_report() {
        let session = SearchSession::new(transcripts(), episode_table());
        let results = session.search("tamam");
        let report = create_formatter(OutputFormat::Text, false).format("tamam", &results);

        assert!(report.starts_with("1 results found.\n"));
        assert!(report.contains("[00:10:05,500]"));
        assert!(report.contains("https://www.youtube.com/watch?v=eleven&t=605s"));
    }

    #[test]
    fn test_json_report() {
        let session = SearchSession::new(transcripts(), episode_table());
        let results = session.search("meryem");
        let report = create_formatter(OutputFormat::Json, false).format("meryem", &results);

        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed["result_count"], 4);
        assert_eq!(parsed["results"][0]["timestamp"], "00:00:02,230");
        assert!(parsed["results"][3].get("video_url").is_none());
    }
}
