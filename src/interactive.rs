use crate::report::text::{TextFormatter, NO_VIDEO_MESSAGE};
use crate::search::{SearchResult, SearchSession};
use console::style;
use dialoguer::{Input, Select};
use std::io;
use tracing::{debug, warn};

/// Prompt for phrases until an empty one is entered.
pub fn run_search_loop(session: &SearchSession, limit: Option<usize>) -> anyhow::Result<()> {
    print_header(session);

    loop {
        let query: String = Input::new()
            .with_prompt("Search phrase (leave empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        if query.trim().is_empty() {
            return Ok(());
        }

        let results = session.search_with_limit(&query, limit);
        if results.is_empty() {
            println!("{} No results found.\n", style("!").yellow());
            continue;
        }

        println!("{} {} results found.", style("✓").green(), results.len());
        pick_results(&query, &results)?;
    }
}

/// Let the user open results one after another until they ask for a new search.
fn pick_results(query: &str, results: &[SearchResult]) -> anyhow::Result<()> {
    let mut items: Vec<String> = results.iter().map(result_label).collect();
    items.push("New search...".to_string());

    let mut selection = 0;
    loop {
        selection = Select::new()
            .with_prompt(format!("Results for \"{}\"", query.trim()))
            .items(&items)
            .default(selection)
            .max_length(15)
            .interact()?;

        let Some(result) = results.get(selection) else {
            println!();
            return Ok(());
        };

        match open_result(result, |url| open::that(url)) {
            Some(url) => println!("  ▶ {}\n", style(url).cyan().underlined()),
            None => println!("  {} {}\n", style("!").yellow(), NO_VIDEO_MESSAGE),
        }
    }
}

/// Hand a result's video link to `opener`. Returns the link, or `None` when the
/// result has none. A failed launch is logged and the link is still returned so
/// it can be printed.
fn open_result<F>(result: &SearchResult, opener: F) -> Option<&str>
where
    F: FnOnce(&str) -> io::Result<()>,
{
    let url = result.video_url.as_deref()?;
    match opener(url) {
        Ok(()) => debug!("Opened {}", url),
        Err(e) => warn!("Could not open {} in a browser: {}", url, e),
    }
    Some(url)
}

fn result_label(result: &SearchResult) -> String {
    let header = TextFormatter { color: false }.header(result);
    let marker = if result.video_url.is_some() { "▶" } else { " " };
    format!("{} {}  {}", marker, header, result.text)
}

fn print_header(session: &SearchSession) {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║          scenefinder - Subtitle Scene Finder      ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!(
        "  {} transcripts, {} metadata rows\n",
        session.transcripts().len(),
        session.metadata().len()
    );
}
