use anyhow::{Context, Result};
use clap::Parser;
use scenefinder::config::{Config, OutputFormat};
use scenefinder::interactive::run_search_loop;
use scenefinder::loader::load_session;
use scenefinder::report::create_formatter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "scenefinder")]
#[command(version, about = "Find the scene where a phrase is spoken")]
#[command(long_about = "Search a folder of SRT transcripts for a phrase and print a timestamped video link for every match.")]
struct Cli {
    /// Phrase to search for (starts interactive mode when omitted)
    query: Option<String>,

    /// Directory containing the transcript files
    #[arg(short, long)]
    transcripts: PathBuf,

    /// Episode metadata: a spreadsheet (.xlsx, .xls, .ods) or its CSV/JSON export
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long)]
    format: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Metadata column holding episode titles
    #[arg(long)]
    title_column: Option<String>,

    /// Metadata column holding video URLs
    #[arg(long)]
    url_column: Option<String>,

    /// Prompt for phrases interactively
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(ref column) = cli.title_column {
        config.title_column = column.clone();
    }
    if let Some(ref column) = cli.url_column {
        config.url_column = column.clone();
    }
    if let Some(ref format) = cli.format {
        config.default_format = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }
    if cli.limit.is_some() {
        config.result_limit = cli.limit;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli)?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let interactive = cli.interactive || cli.query.is_none();

    let session = load_session(
        &cli.transcripts,
        cli.metadata.as_deref(),
        &config,
        interactive,
    )
    .context("Failed to load transcripts")?;

    if interactive {
        return run_search_loop(&session, config.result_limit);
    }

    let query = cli.query.as_deref().unwrap_or_default();
    if query.trim().is_empty() {
        anyhow::bail!("Search phrase must not be empty");
    }

    let results = session.search_with_limit(query, config.result_limit);
    info!("{} results for {:?}", results.len(), query.trim());

    let color = cli.output.is_none()
        && config.default_format == OutputFormat::Text
        && console::Term::stdout().features().colors_supported();
    let report = create_formatter(config.default_format, color).format(query, &results);

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}
