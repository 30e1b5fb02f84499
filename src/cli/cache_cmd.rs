//! `quotedeck cache` — cache maintenance.

use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use anyhow::Result;
use clap::Subcommand;

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CacheAction {
    /// Remove cached quotes, history, and the display counter
    Clear,
}

pub fn run(config: &Config, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Clear => {
            let mut app = App::bootstrap(config)?;
            let mut ui = CliSurface::auto();
            app.clear_cache(&mut ui)?;
            ui.finish();
            Ok(())
        }
    }
}
