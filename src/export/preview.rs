//! Inline terminal preview of a rendered card.
//!
//! Downsamples the card and prints it with half-block characters, two
//! pixel rows per text row, using 24-bit color escapes. Meant as a rough
//! proof of what was exported, not a faithful reproduction.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fmt::Write as _;

/// Preview width in terminal columns.
pub const PREVIEW_COLS: u32 = 64;

/// Render `img` as an ANSI string ready to print.
pub fn ansi_preview(img: &RgbaImage) -> String {
    let target_w = PREVIEW_COLS.min(img.width());
    let mut target_h = (img.height() * target_w / img.width()).max(2);
    if target_h % 2 != 0 {
        target_h += 1;
    }
    let small = imageops::resize(img, target_w, target_h, FilterType::Triangle);

    let mut out = String::new();
    for y in (0..target_h).step_by(2) {
        for x in 0..target_w {
            let top = small.get_pixel(x, y);
            let bottom = small.get_pixel(x, y + 1);
            let _ = write!(
                out,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                top[0], top[1], top[2], bottom[0], bottom[1], bottom[2]
            );
        }
        out.push_str("\x1b[0m\n");
    }
    out
}
