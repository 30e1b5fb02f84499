//! `quotedeck export` — render the current quote to a PNG card.

use crate::cli::output;
use crate::cli::surface::CliSurface;
use crate::config::Config;
use crate::controller::App;
use crate::export::{self, preview};
use crate::quotes::Quote;
use crate::view::{Notice, UiSurface};
use anyhow::Result;
use chrono::Utc;
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub async fn run(
    config: &Config,
    dir: PathBuf,
    copy: bool,
    show_preview: bool,
) -> Result<()> {
    let app = App::bootstrap(config)?;
    let mut ui = CliSurface::auto();

    let Some(quote) = app.current_quote().cloned() else {
        ui.notify(&Notice::warning("No quotes available. Please scrape first."));
        ui.finish();
        return Ok(());
    };

    let img = generate_card(&quote, &mut ui);
    let path = match save_generated(&img, &dir, &mut ui) {
        Ok(path) => path,
        Err(e) => {
            ui.finish();
            return Err(e);
        }
    };

    if copy {
        let png = match encode_generated(&img, &mut ui) {
            Ok(png) => png,
            Err(e) => {
                ui.finish();
                return Err(e);
            }
        };
        if let Err(e) = crate::cli::copy_cmd::copy_card_reporting(&png, &mut ui).await {
            ui.finish();
            return Err(e);
        }
    }

    if show_preview && !output::is_json() {
        print!("{}", preview::ansi_preview(&img));
    }

    if output::is_json() {
        ui.finish_with(&[("saved", serde_json::json!(path.display().to_string()))]);
    } else {
        println!("  {}", path.display());
        ui.finish();
    }
    Ok(())
}

/// Render the card, reporting progress as notices.
pub(crate) fn generate_card(quote: &Quote, ui: &mut dyn UiSurface) -> RgbaImage {
    ui.notify(&Notice::info("Generating image..."));
    let img = export::render_card(&quote.text, &quote.author);
    ui.notify(&Notice::success("Image generated successfully!"));
    img
}

pub(crate) fn save_generated(
    img: &RgbaImage,
    dir: &Path,
    ui: &mut dyn UiSurface,
) -> Result<PathBuf> {
    match export::save_card(img, dir, Utc::now()) {
        Ok(path) => {
            ui.notify(&Notice::success("Image saved successfully!"));
            Ok(path)
        }
        Err(e) => {
            ui.notify(&Notice::error("Failed to save image"));
            Err(e)
        }
    }
}

pub(crate) fn encode_generated(img: &RgbaImage, ui: &mut dyn UiSurface) -> Result<Vec<u8>> {
    match export::encode_png(img) {
        Ok(png) => Ok(png),
        Err(e) => {
            ui.notify(&Notice::error("Failed to generate image"));
            Err(e)
        }
    }
}
