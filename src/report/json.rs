// JSON search report
use super::ResultFormatter;
use crate::search::SearchResult;
use serde::Serialize;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    result_count: usize,
    results: &'a [SearchResult],
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, query: &str, results: &[SearchResult]) -> String {
        let output = JsonOutput {
            query: query.trim(),
            result_count: results.len(),
            results,
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let results = vec![
            SearchResult {
                filename: "Show 1. Bölüm.srt".to_string(),
                timestamp: "00:00:02,230".to_string(),
                seconds: 2,
                text: "Hello there".to_string(),
                video_url: Some("http://x/v?t=2s".to_string()),
            },
            SearchResult {
                filename: "extras.srt".to_string(),
                timestamp: "00:00:10,000".to_string(),
                seconds: 10,
                text: "hello".to_string(),
                video_url: None,
            },
        ];

        let output = JsonFormatter.format(" hello ", &results);

        assert!(output.contains("\"query\": \"hello\""));
        assert!(output.contains("\"result_count\": 2"));
        assert!(output.contains("\"video_url\": \"http://x/v?t=2s\""));
        assert_eq!(output.matches("video_url").count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["results"][1]["seconds"], 10);
    }
}
