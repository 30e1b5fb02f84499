//! `quotedeck fetch` — scrape a page of quotes and show one.

use crate::acquisition::{PageSelector, DEFAULT_SETTLE};
use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use anyhow::Result;
use std::time::Duration;

/// Upper bound for the remote settle wait, in seconds.
pub const MAX_WAIT_SECS: f32 = 10.0;

pub async fn run(config: &Config, page: Option<u32>, wait_secs: f32) -> Result<()> {
    let mut app = App::bootstrap(config)?;
    let mut ui = CliSurface::auto();

    let selector = page.map(PageSelector::Page).unwrap_or(PageSelector::Random);
    let wait = if wait_secs.is_finite() {
        Duration::from_secs_f32(wait_secs.clamp(0.0, MAX_WAIT_SECS))
    } else {
        DEFAULT_SETTLE
    };

    app.fetch(selector, wait, &mut ui).await?;
    ui.finish();
    Ok(())
}
