//! `quotedeck history` — list past displays or reload one.

use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use anyhow::Result;

/// `index` is one-based, newest first, matching the listed order.
pub async fn run(config: &Config, index: Option<u32>) -> Result<()> {
    let mut app = App::bootstrap(config)?;
    let mut ui = CliSurface::auto();
    match index {
        Some(n) => app.show_history((n - 1) as usize, &mut ui),
        None => app.show_history_list(&mut ui),
    }
    ui.finish();
    Ok(())
}
