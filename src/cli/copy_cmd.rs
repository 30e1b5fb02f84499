//! `quotedeck copy` — put the current quote on the clipboard.

use crate::cli::export_cmd;
use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use crate::export::{self, clipboard};
use crate::view::{Notice, UiSurface};
use anyhow::Result;
use chrono::Utc;

pub async fn run(config: &Config, image: bool) -> Result<()> {
    let app = App::bootstrap(config)?;
    let mut ui = CliSurface::auto();

    let Some(quote) = app.current_quote().cloned() else {
        ui.notify(&Notice::warning("No quotes available. Please scrape first."));
        ui.finish();
        return Ok(());
    };

    let result = if image {
        let img = export_cmd::generate_card(&quote, &mut ui);
        match export_cmd::encode_generated(&img, &mut ui) {
            Ok(png) => copy_card_reporting(&png, &mut ui).await,
            Err(e) => Err(e),
        }
    } else {
        copy_text_reporting(&export::card_text(&quote.text, &quote.author), &mut ui).await
    };

    ui.finish();
    result
}

/// Copy PNG bytes and report how the copy landed.
pub(crate) async fn copy_card_reporting(png: &[u8], ui: &mut dyn UiSurface) -> Result<()> {
    match clipboard::copy_card(png, Utc::now()).await {
        Ok(clipboard::CopyOutcome::Image) => {
            ui.notify(&Notice::success("Image copied to clipboard!"));
            Ok(())
        }
        Ok(clipboard::CopyOutcome::TextFallback { path }) => {
            ui.notify(&Notice::success("Image path copied to clipboard!"));
            tracing::debug!("card written to {}", path.display());
            Ok(())
        }
        Err(e) => {
            ui.notify(&Notice::error("Failed to copy image"));
            Err(e)
        }
    }
}

pub(crate) async fn copy_text_reporting(text: &str, ui: &mut dyn UiSurface) -> Result<()> {
    match clipboard::copy_text(text).await {
        Ok(()) => {
            ui.notify(&Notice::success("Quote copied to clipboard!"));
            Ok(())
        }
        Err(e) => {
            ui.notify(&Notice::error("Failed to copy quote"));
            Err(e)
        }
    }
}
