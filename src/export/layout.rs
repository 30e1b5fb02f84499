//! Card geometry and text layout.
//!
//! Mirrors the layout the web card used: fixed 600x300 canvas, centered
//! quote block wrapped greedily against a 520px column, author line below,
//! watermark bottom right. All measurement is exact because the font is
//! fixed width.

use crate::export::font::GLYPH_WIDTH;

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 300;

/// Horizontal budget for quote text, 40px margin each side.
pub const TEXT_MAX_WIDTH: u32 = CARD_WIDTH - 80;

/// Vertical distance between wrapped quote lines.
pub const LINE_HEIGHT: u32 = 32;

/// Gap between the last quote line and the author line.
pub const AUTHOR_GAP: u32 = 20;

/// Pixel scale factors: quote text renders at 24px, author at 16px,
/// watermark at 8px.
pub const QUOTE_SCALE: u32 = 3;
pub const AUTHOR_SCALE: u32 = 2;
pub const WATERMARK_SCALE: u32 = 1;

/// Replace typographic characters the font has no glyph for with ASCII
/// stand-ins. Anything still uncovered draws as `?`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// Rendered width of `text` at `scale`.
pub fn measure(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_WIDTH * scale
}

/// Greedy word wrap against `max_width`. The first word always starts the
/// first line, and a word longer than the budget gets a line of its own
/// rather than being split.
pub fn wrap(text: &str, scale: u32, max_width: u32) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut line = first.to_string();
    for word in words {
        let candidate = format!("{line} {word}");
        if measure(&candidate, scale) > max_width {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // 21 chars fit in the 520px column at quote scale, 22 do not.
    const FIT: usize = (TEXT_MAX_WIDTH / (GLYPH_WIDTH * QUOTE_SCALE)) as usize;

    #[test]
    fn test_measure_is_linear_in_chars_and_scale() {
        assert_eq!(measure("abcd", 1), 32);
        assert_eq!(measure("abcd", 3), 96);
        assert_eq!(measure("", 3), 0);
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        assert_eq!(
            wrap("Stay hungry", QUOTE_SCALE, TEXT_MAX_WIDTH),
            vec!["Stay hungry"]
        );
    }

    #[test]
    fn test_empty_text_yields_single_empty_line() {
        assert_eq!(wrap("", QUOTE_SCALE, TEXT_MAX_WIDTH), vec![""]);
        assert_eq!(wrap("   ", QUOTE_SCALE, TEXT_MAX_WIDTH), vec![""]);
    }

    #[test]
    fn test_break_happens_exactly_at_budget() {
        assert_eq!(FIT, 21);
        // "aaaaaaaaaa bbbbbbbbbb" is 21 chars: fits exactly.
        let text = format!("{} {}", "a".repeat(10), "b".repeat(10));
        assert_eq!(wrap(&text, QUOTE_SCALE, TEXT_MAX_WIDTH).len(), 1);
        // One more character pushes the second word to the next line.
        let text = format!("{} {}", "a".repeat(10), "b".repeat(11));
        assert_eq!(
            wrap(&text, QUOTE_SCALE, TEXT_MAX_WIDTH),
            vec!["a".repeat(10), "b".repeat(11)]
        );
    }

    #[test]
    fn test_every_line_fits_or_is_a_single_word() {
        let text = "The world as we have created it is a process of our thinking. \
                    It cannot be changed without changing our thinking.";
        let lines = wrap(text, QUOTE_SCALE, TEXT_MAX_WIDTH);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                measure(line, QUOTE_SCALE) <= TEXT_MAX_WIDTH || !line.contains(' '),
                "overfull multi-word line: {line:?}"
            );
        }
        // No content lost in the wrap.
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_keeps_its_own_line() {
        let long = "x".repeat(FIT + 5);
        let text = format!("short {long} tail");
        let lines = wrap(&text, QUOTE_SCALE, TEXT_MAX_WIDTH);
        assert_eq!(lines, vec!["short".to_string(), long, "tail".to_string()]);
    }

    #[test]
    fn test_normalize_maps_typographic_characters() {
        assert_eq!(normalize("“Be yourself”"), "\"Be yourself\"");
        assert_eq!(normalize("it’s time — now…"), "it's time - now...");
        assert_eq!(normalize("plain ascii"), "plain ascii");
    }
}
