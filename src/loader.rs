use crate::config::Config;
use crate::error::{Result, SceneFinderError};
use crate::metadata::MetadataTable;
use crate::search::SearchSession;
use crate::subtitle::TranscriptFile;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load every transcript with the given extension from `dir` (not recursive).
///
/// Files are ordered by name so repeated loads search in the same order.
/// Unreadable files are skipped with a warning.
pub fn load_transcripts(dir: &Path, extension: &str, show_progress: bool) -> Result<Vec<TranscriptFile>> {
    if !dir.is_dir() {
        return Err(SceneFinderError::FileNotFound(dir.display().to_string()));
    }

    let extension = extension.trim_start_matches('.').to_lowercase();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.to_lowercase() == extension);
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let pb = show_progress.then(|| {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Loading transcripts...");
        pb
    });

    let mut transcripts = Vec::with_capacity(paths.len());
    for path in &paths {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match fs::read(path) {
            Ok(bytes) => {
                debug!("Loaded {:?} ({} bytes)", path, bytes.len());
                transcripts.push(TranscriptFile::new(filename, decode_transcript(bytes, path)));
            }
            Err(e) => warn!("Skipping {:?}: {}", path, e),
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message(format!("✓ {} transcripts loaded", transcripts.len()));
    }

    info!("Loaded {} transcripts from {:?}", transcripts.len(), dir);
    Ok(transcripts)
}

/// Decode transcript bytes as UTF-8, falling back to Windows-1254 (Turkish).
pub fn decode_transcript(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (text, encoding, replacements) = encoding_rs::WINDOWS_1254.decode(&bytes);
            if replacements {
                warn!(
                    "Could not decode {:?} accurately with {}",
                    path,
                    encoding.name()
                );
            } else {
                debug!("Decoded {:?} as {}", path, encoding.name());
            }
            text.into_owned()
        }
    }
}

/// Load the episode metadata table from a spreadsheet (first sheet only) or
/// a CSV or JSON export of it.
pub fn load_metadata(path: &Path) -> Result<MetadataTable> {
    if !path.is_file() {
        return Err(SceneFinderError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => MetadataTable::from_workbook(path)?,
        "csv" => MetadataTable::from_csv_reader(fs::File::open(path)?)?,
        "json" => MetadataTable::from_json_reader(fs::File::open(path)?)?,
        _ => {
            return Err(SceneFinderError::UnsupportedMetadata(format!(
                "{} (expected .xlsx, .xls, .ods, .csv or .json)",
                path.display()
            )))
        }
    };

    info!("Loaded {} metadata rows from {:?}", table.len(), path);
    Ok(table)
}

/// Build a search session from a transcript directory and optional metadata file.
pub fn load_session(
    transcripts_dir: &Path,
    metadata: Option<&Path>,
    config: &Config,
    show_progress: bool,
) -> Result<SearchSession> {
    let transcripts = load_transcripts(transcripts_dir, &config.transcript_extension, show_progress)?;
    if transcripts.is_empty() {
        warn!("No .{} files found in {:?}", config.transcript_extension, transcripts_dir);
    }

    let metadata = match metadata {
        Some(path) => load_metadata(path)?,
        None => {
            debug!("No metadata file given, results will have no video links");
            MetadataTable::default()
        }
    };

    Ok(SearchSession::new(transcripts, metadata).with_resolver(config.resolver()))
}
