//! Parse one scraped HTML fragment into a structured [`Quote`].
//!
//! Fragments arrive as opaque markup blobs from the scraping API, one per
//! quote. Parsing is total: a malformed fragment yields `None`, never a
//! panic, and never affects sibling fragments.

use crate::quotes::{next_quote_id, Quote, Tag};
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

/// Parse a fragment scraped from `page` into a quote.
///
/// Returns `None` when the fragment has no usable text or author. Relative
/// author/tag hrefs are made absolute against `origin` (no trailing slash).
pub fn parse_fragment(
    html: &str,
    origin: &str,
    page: u32,
    acquired_at: DateTime<Utc>,
) -> Option<Quote> {
    let doc = Html::parse_fragment(html);

    let text_sel = Selector::parse(".text").unwrap();
    let author_sel = Selector::parse(".author").unwrap();
    let author_link_sel = Selector::parse(r#"a[href^="/author/"]"#).unwrap();
    let tag_sel = Selector::parse(".tag").unwrap();

    let text = doc
        .select(&text_sel)
        .next()
        .map(|el| clean_text(&element_text(&el)))
        .unwrap_or_default();

    // An absent author marker defaults to Unknown; a present-but-empty one
    // leaves the fragment invalid.
    let author = match doc.select(&author_sel).next() {
        Some(el) => element_text(&el),
        None => "Unknown".to_string(),
    };

    if text.is_empty() || author.is_empty() {
        tracing::warn!("dropping quote fragment without text or author");
        return None;
    }

    let author_link = doc
        .select(&author_link_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| format!("{origin}{href}"))
        .unwrap_or_default();

    let tags: Vec<Tag> = doc
        .select(&tag_sel)
        .filter_map(|el| {
            let tag_text = element_text(&el);
            if tag_text.is_empty() {
                return None;
            }
            let link = el
                .value()
                .attr("href")
                .map(|href| format!("{origin}{href}"))
                .unwrap_or_default();
            Some(Tag {
                text: tag_text,
                link,
            })
        })
        .collect();

    Some(Quote {
        id: next_quote_id(),
        text,
        author,
        author_link,
        tags,
        acquired_at,
        source_page: page,
    })
}

/// Collect an element's text content, trimmed.
fn element_text(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Strip one leading and one trailing quote mark, if present.
fn clean_text(text: &str) -> String {
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_string()
}
