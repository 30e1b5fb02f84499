//! `quotedeck quote` — show a random quote.

use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use anyhow::Result;

pub async fn run(config: &Config) -> Result<()> {
    let mut app = App::bootstrap(config)?;
    let mut ui = CliSurface::auto();
    app.startup(&mut ui).await?;
    ui.finish();
    Ok(())
}
