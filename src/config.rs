use crate::episode::{EpisodeResolver, DEFAULT_TITLE_COLUMN, DEFAULT_URL_COLUMN};
use crate::error::{Result, SceneFinderError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'text' or 'json'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata column holding the episode title.
    pub title_column: String,
    /// Metadata column holding the video URL.
    pub url_column: String,
    pub default_format: OutputFormat,
    /// Maximum number of results per search; unlimited when unset.
    pub result_limit: Option<usize>,
    /// Extension of transcript files to load.
    pub transcript_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title_column: DEFAULT_TITLE_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
            default_format: OutputFormat::default(),
            result_limit: None,
            transcript_extension: "srt".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields from environment-style variables.
    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(column) = var("SCENEFINDER_TITLE_COLUMN") {
            self.title_column = column;
        }
        if let Some(column) = var("SCENEFINDER_URL_COLUMN") {
            self.url_column = column;
        }
        if let Some(format) = var("SCENEFINDER_DEFAULT_FORMAT") {
            if let Ok(f) = format.parse() {
                self.default_format = f;
            }
        }
        if let Some(limit) = var("SCENEFINDER_RESULT_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.result_limit = Some(l);
            }
        }
        if let Some(ext) = var("SCENEFINDER_TRANSCRIPT_EXTENSION") {
            self.transcript_extension = ext;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title_column.trim().is_empty() {
            return Err(SceneFinderError::Config(
                "Title column name must not be empty".to_string(),
            ));
        }
        if self.url_column.trim().is_empty() {
            return Err(SceneFinderError::Config(
                "Video URL column name must not be empty".to_string(),
            ));
        }
        if self.transcript_extension.trim_start_matches('.').is_empty() {
            return Err(SceneFinderError::Config(
                "Transcript extension must not be empty".to_string(),
            ));
        }
        if self.result_limit == Some(0) {
            return Err(SceneFinderError::Config(
                "Result limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolver using the configured column names.
    pub fn resolver(&self) -> EpisodeResolver {
        EpisodeResolver::new(self.title_column.trim(), self.url_column.trim())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scenefinder").join("config.toml"))
    }
}
