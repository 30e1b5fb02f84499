//! `quotedeck share` — tweet link for the current quote.

use crate::cli::output;
use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use crate::export;
use crate::view::{Notice, UiSurface};
use anyhow::Result;

pub async fn run(config: &Config, image: bool) -> Result<()> {
    let mut ui = CliSurface::auto();

    // Direct image sharing has no backend yet.
    if image {
        ui.notify(&Notice::info("Sharing feature coming soon!"));
        ui.finish();
        return Ok(());
    }

    let app = App::bootstrap(config)?;
    let Some(quote) = app.current_quote() else {
        ui.notify(&Notice::warning("No quotes available. Please scrape first."));
        ui.finish();
        return Ok(());
    };

    let url = export::tweet_url(&quote.text, &quote.author);
    if output::is_json() {
        ui.finish_with(&[("tweet_url", serde_json::json!(url))]);
    } else {
        println!("  {url}");
        ui.finish();
    }
    Ok(())
}
