//! `quotedeck status` — cache and endpoint state at a glance.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::controller::App;
use crate::view::{ApiStatus, StatusView};
use anyhow::Result;

pub fn run(config: &Config) -> Result<()> {
    let app = App::bootstrap(config)?;
    let status = app.status();

    if output::is_json() {
        output::print_json(&serde_json::to_value(&status)?);
        return Ok(());
    }
    print_status(&status);
    Ok(())
}

/// Human-readable status block, shared with the interactive session.
pub(crate) fn print_status(status: &StatusView) {
    let s = Styled::new();
    let api = match status.api {
        ApiStatus::Live => s.green("Live"),
        ApiStatus::Offline => s.red("Offline"),
        ApiStatus::Unknown => s.dim("Unknown"),
    };
    let freshness = if status.cache_fresh {
        s.green("fresh")
    } else {
        s.yellow("stale")
    };

    println!();
    println!("  {:<14} {}", "API:", api);
    println!(
        "  {:<14} {} (page {})",
        "Quotes:",
        status.total_quotes,
        status.source_page
    );
    println!("  {:<14} {} entries", "History:", status.history_len);
    println!("  {:<14} {}", "Next number:", status.next_display_number);
    match &status.last_scrape {
        Some(stamp) => println!("  {:<14} {} ({})", "Last scrape:", stamp, freshness),
        None => println!("  {:<14} {}", "Last scrape:", s.dim("never")),
    }
    println!(
        "  {:<14} tags {}, author link {}",
        "Display:",
        on_off(status.show_tags),
        on_off(status.show_author_link)
    );
    println!();
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
