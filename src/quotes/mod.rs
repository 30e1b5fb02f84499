//! Quote domain model — parsed quotes, display history, fallback dataset.

pub mod parser;
pub mod repository;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single quote parsed from one scraped fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique enough for dedup within a working set and the history.
    pub id: u64,
    /// Quote text, trimmed, without surrounding quote marks.
    pub text: String,
    /// Author name; `"Unknown"` when the fragment carries no author marker.
    pub author: String,
    /// Absolute author page URL, or empty when the fragment has no author link.
    pub author_link: String,
    /// Ordered tags; may be empty.
    pub tags: Vec<Tag>,
    /// When the quote was acquired.
    pub acquired_at: DateTime<Utc>,
    /// Page index the fragment came from.
    pub source_page: u32,
}

/// A tag attached to a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub text: String,
    /// Absolute tag page URL, or empty when the tag element has no href.
    pub link: String,
}

/// A displayed quote plus the display counter value it was shown under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub quote: Quote,
    pub display_number: u64,
}

/// Generate a quote id from epoch milliseconds plus sub-millisecond entropy,
/// so two quotes parsed in the same batch still get distinct ids.
pub fn next_quote_id() -> u64 {
    let ms = Utc::now().timestamp_millis().max(0) as u64;
    ms * 1000 + rand::thread_rng().gen_range(0..1000)
}

/// The built-in dataset installed when acquisition fails. Never persisted.
pub fn fallback_quotes() -> Vec<Quote> {
    let now = Utc::now();
    vec![
        Quote {
            id: 1,
            text: "The world as we have created it is a process of our thinking. \
                   It cannot be changed without changing our thinking."
                .to_string(),
            author: "Albert Einstein".to_string(),
            author_link: "https://quotes.toscrape.com/author/Albert-Einstein".to_string(),
            tags: vec![
                tag("change"),
                tag("deep-thoughts"),
                tag("thinking"),
                tag("world"),
            ],
            acquired_at: now,
            source_page: 1,
        },
        Quote {
            id: 2,
            text: "It is our choices, Harry, that show what we truly are, \
                   far more than our abilities."
                .to_string(),
            author: "J.K. Rowling".to_string(),
            author_link: "https://quotes.toscrape.com/author/J-K-Rowling".to_string(),
            tags: vec![tag("abilities"), tag("choices")],
            acquired_at: now,
            source_page: 1,
        },
        Quote {
            id: 3,
            text: "There are only two ways to live your life. One is as though \
                   nothing is a miracle. The other is as though everything is a miracle."
                .to_string(),
            author: "Albert Einstein".to_string(),
            author_link: "https://quotes.toscrape.com/author/Albert-Einstein".to_string(),
            tags: vec![
                tag("inspirational"),
                tag("life"),
                tag("live"),
                tag("miracle"),
                tag("miracles"),
            ],
            acquired_at: now,
            source_page: 1,
        },
    ]
}

fn tag(text: &str) -> Tag {
    Tag {
        text: text.to_string(),
        link: format!("https://quotes.toscrape.com/tag/{text}/"),
    }
}
