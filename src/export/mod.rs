//! Quote card rendering and export.
//!
//! Renders a 600x300 PNG card: white background, accent bar on the left
//! edge, the quote centered in dark text, the author below in accent
//! color, and a small watermark bottom right. Rendering is pure pixel
//! work on an [`RgbaImage`]; no display server is involved.

pub mod clipboard;
pub mod font;
pub mod layout;
pub mod preview;

use crate::export::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::export::layout::{
    measure, normalize, wrap, AUTHOR_GAP, AUTHOR_SCALE, CARD_HEIGHT, CARD_WIDTH, LINE_HEIGHT,
    QUOTE_SCALE, TEXT_MAX_WIDTH, WATERMARK_SCALE,
};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use url::Url;

const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
const ACCENT: Rgba<u8> = Rgba([0x43, 0x61, 0xEE, 0xFF]);
const TEXT_COLOR: Rgba<u8> = Rgba([0x21, 0x25, 0x29, 0xFF]);
const WATERMARK_COLOR: Rgba<u8> = Rgba([0xAD, 0xB5, 0xBD, 0xFF]);

const ACCENT_BAR_WIDTH: u32 = 6;
const WATERMARK: &str = "Generated by Quotedeck";

/// Render the card for one quote. `text` should carry no surrounding
/// quote marks.
pub fn render_card(text: &str, author: &str) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BACKGROUND);

    fill_rect(&mut img, 0, 0, ACCENT_BAR_WIDTH, CARD_HEIGHT, ACCENT);

    let body = normalize(text);
    let lines = wrap(&body, QUOTE_SCALE, TEXT_MAX_WIDTH);
    let start_y = CARD_HEIGHT as i32 / 2 - (lines.len() as i32 * LINE_HEIGHT as i32) / 2;

    let center_x = CARD_WIDTH as i32 / 2;
    for (i, line) in lines.iter().enumerate() {
        let center_y = start_y + i as i32 * LINE_HEIGHT as i32;
        draw_text_centered(&mut img, line, center_x, center_y, QUOTE_SCALE, TEXT_COLOR);
    }

    let byline = normalize(&format!("— {author}"));
    let byline_y = start_y + lines.len() as i32 * LINE_HEIGHT as i32 + AUTHOR_GAP as i32;
    draw_text_centered(&mut img, &byline, center_x, byline_y, AUTHOR_SCALE, ACCENT);

    draw_text_right_aligned(
        &mut img,
        WATERMARK,
        CARD_WIDTH as i32 - 20,
        CARD_HEIGHT as i32 - 15,
        WATERMARK_SCALE,
        WATERMARK_COLOR,
    );

    img
}

/// Encode a rendered card as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encoding card as PNG")?;
    Ok(buf)
}

/// Timestamped file name for a saved card, safe on every filesystem.
pub fn card_file_name(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("quote-{stamp}.png")
}

/// Write the card into `dir` under a timestamped name.
pub fn save_card(img: &RgbaImage, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    let path = dir.join(card_file_name(now));
    img.save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Plain-text form of a quote for clipboard use.
pub fn card_text(text: &str, author: &str) -> String {
    format!("\"{text}\"\n\n— {author}\n\nGenerated by Quotedeck")
}

/// Prefilled tweet composer URL for a quote.
pub fn tweet_url(text: &str, author: &str) -> String {
    let mut url = Url::parse("https://twitter.com/intent/tweet").unwrap();
    url.query_pairs_mut()
        .append_pair("text", &format!("\"{text}\" — {author}"))
        .append_pair("hashtags", "Quotes,Inspiration,Quotedeck");
    url.to_string()
}

// ── Pixel helpers ─────────────────────────────────────────────────────────

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(img.height()) {
        for px in x..(x + w).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draw one glyph with its top-left corner at (`left`, `top`). Pixels
/// falling outside the image are clipped.
fn draw_glyph(img: &mut RgbaImage, c: char, left: i32, top: i32, scale: u32, color: Rgba<u8>) {
    let rows = glyph(c);
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << col) == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    let x = left + (col * scale + sx) as i32;
                    let y = top + (row as u32 * scale + sy) as i32;
                    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                        img.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }
}

fn draw_text(img: &mut RgbaImage, text: &str, left: i32, top: i32, scale: u32, color: Rgba<u8>) {
    let advance = (GLYPH_WIDTH * scale) as i32;
    for (i, c) in text.chars().enumerate() {
        draw_glyph(img, c, left + i as i32 * advance, top, scale, color);
    }
}

/// Draw with the horizontal center at `center_x` and the vertical center
/// at `center_y`, like a canvas with middle baseline.
fn draw_text_centered(
    img: &mut RgbaImage,
    text: &str,
    center_x: i32,
    center_y: i32,
    scale: u32,
    color: Rgba<u8>,
) {
    let left = center_x - measure(text, scale) as i32 / 2;
    let top = center_y - (GLYPH_HEIGHT * scale) as i32 / 2;
    draw_text(img, text, left, top, scale, color);
}

fn draw_text_right_aligned(
    img: &mut RgbaImage,
    text: &str,
    right_x: i32,
    center_y: i32,
    scale: u32,
    color: Rgba<u8>,
) {
    let left = right_x - measure(text, scale) as i32;
    let top = center_y - (GLYPH_HEIGHT * scale) as i32 / 2;
    draw_text(img, text, left, top, scale, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ink_count(img: &RgbaImage, color: Rgba<u8>) -> usize {
        img.pixels().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_card_has_expected_geometry() {
        let img = render_card("Stay hungry.", "Steve Jobs");
        assert_eq!((img.width(), img.height()), (CARD_WIDTH, CARD_HEIGHT));

        // Accent bar spans the full left edge.
        assert_eq!(*img.get_pixel(0, 0), ACCENT);
        assert_eq!(*img.get_pixel(5, 299), ACCENT);
        assert_eq!(*img.get_pixel(6, 0), BACKGROUND);

        // Top-right corner stays clear of any text.
        assert_eq!(*img.get_pixel(599, 0), BACKGROUND);
    }

    #[test]
    fn test_card_draws_all_three_text_layers() {
        let img = render_card("Stay hungry.", "Steve Jobs");
        assert!(ink_count(&img, TEXT_COLOR) > 0);
        assert!(ink_count(&img, WATERMARK_COLOR) > 0);
        // Author ink on top of the 6x300 bar.
        assert!(ink_count(&img, ACCENT) > (ACCENT_BAR_WIDTH * CARD_HEIGHT) as usize);
    }

    #[test]
    fn test_long_quote_still_renders_within_bounds() {
        let text = "There are only two ways to live your life. One is as though \
                    nothing is a miracle. The other is as though everything is a miracle.";
        let img = render_card(text, "Albert Einstein");
        assert!(ink_count(&img, TEXT_COLOR) > 0);
    }

    #[test]
    fn test_card_file_name_is_filesystem_safe() {
        let now = Utc.with_ymd_and_hms(2026, 8, 22, 10, 30, 0).unwrap();
        let name = card_file_name(now);
        assert_eq!(name, "quote-2026-08-22T10-30-00-000Z.png");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_save_card_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let img = render_card("Stay hungry.", "Steve Jobs");
        let path = save_card(&img, dir.path(), Utc::now()).unwrap();

        assert!(path.exists());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_encode_png_magic() {
        let img = render_card("x", "y");
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_card_text_format() {
        assert_eq!(
            card_text("Stay hungry.", "Steve Jobs"),
            "\"Stay hungry.\"\n\n— Steve Jobs\n\nGenerated by Quotedeck"
        );
    }

    #[test]
    fn test_tweet_url_carries_text_and_hashtags() {
        let url = Url::parse(&tweet_url("Stay hungry.", "Steve Jobs")).unwrap();
        assert_eq!(url.host_str(), Some("twitter.com"));
        assert_eq!(url.path(), "/intent/tweet");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&(
            "text".to_string(),
            "\"Stay hungry.\" — Steve Jobs".to_string()
        )));
        assert!(pairs.contains(&(
            "hashtags".to_string(),
            "Quotes,Inspiration,Quotedeck".to_string()
        )));
    }
}
