// Copyright 2026 Quotedeck Contributors
// SPDX-License-Identifier: Apache-2.0

//! Presentation contracts shared by the terminal surface and JSON mode.
//!
//! Controllers emit [`QuoteView`]s and [`Notice`]s through the [`UiSurface`]
//! trait and never format text themselves. The terminal surface styles and
//! prints; the recording surface collects for JSON output and for tests.

use crate::quotes::{HistoryEntry, Tag};
use serde::Serialize;
use std::time::Duration;

// ── Notices ───────────────────────────────────────────────────────────────

/// How loudly a notice should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient status message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// How long a notice stays visible on surfaces that support timed dismissal.
pub const NOTICE_LINGER: Duration = Duration::from_secs(3);

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

// ── Quote view ────────────────────────────────────────────────────────────

/// What the tag row shows for the current quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "tags", rename_all = "snake_case")]
pub enum TagLine {
    /// Toggled off by the user.
    Hidden,
    /// Toggled on, but the quote has no tags.
    Empty,
    /// Toggled on with tags to show.
    Shown(Vec<Tag>),
}

/// A fully resolved quote ready to display. `text` carries no surrounding
/// quote marks; surfaces add their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
    pub text: String,
    pub author: String,
    /// `None` when the author row is toggled off or the source had no link.
    pub author_link: Option<String>,
    pub tags: TagLine,
    pub display_number: u64,
    pub total_quotes: usize,
    pub source_page: u32,
}

// ── Status ────────────────────────────────────────────────────────────────

/// Last known reachability of the scraping endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    Unknown,
    Live,
    Offline,
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStatus::Unknown => write!(f, "Unknown"),
            ApiStatus::Live => write!(f, "Live"),
            ApiStatus::Offline => write!(f, "Offline"),
        }
    }
}

/// Snapshot of the app state for the `status` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub api: ApiStatus,
    pub total_quotes: usize,
    pub history_len: usize,
    pub next_display_number: u64,
    /// RFC 3339 timestamp of the last live acquisition, if any.
    pub last_scrape: Option<String>,
    pub cache_fresh: bool,
    pub source_page: u32,
    pub show_tags: bool,
    pub show_author_link: bool,
}

// ── Surface trait ─────────────────────────────────────────────────────────

/// Where controller output lands.
pub trait UiSurface {
    fn render_quote(&mut self, view: &QuoteView);
    fn render_history(&mut self, entries: &[HistoryEntry]);
    fn notify(&mut self, notice: &Notice);
    /// Toggle a busy indicator. `message` applies when `active` is true.
    fn loading(&mut self, active: bool, message: &str);
}

/// Surface that records everything it is given. Backs `--json` output and
/// controller tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub quotes: Vec<QuoteView>,
    pub history_renders: Vec<Vec<HistoryEntry>>,
    pub notices: Vec<Notice>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_quote(&self) -> Option<&QuoteView> {
        self.quotes.last()
    }

    /// Notice messages in arrival order.
    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }

    /// JSON document for `--json` mode: the final quote view, the last
    /// rendered history list, and every notice emitted along the way.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "quote": self.last_quote(),
            "history": self.history_renders.last(),
            "notices": self.notices,
        })
    }
}

impl UiSurface for RecordingSurface {
    fn render_quote(&mut self, view: &QuoteView) {
        self.quotes.push(view.clone());
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.history_renders.push(entries.to_vec());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn loading(&mut self, _active: bool, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::success("ok").severity, Severity::Success);
        assert_eq!(Notice::error("no").severity, Severity::Error);
        assert_eq!(Notice::warning("hm").severity, Severity::Warning);
        assert_eq!(Notice::info("fyi").message, "fyi");
    }

    #[test]
    fn test_tag_line_serializes_tagged() {
        let hidden = serde_json::to_value(TagLine::Hidden).unwrap();
        assert_eq!(hidden, serde_json::json!({ "state": "hidden" }));

        let shown = serde_json::to_value(TagLine::Shown(vec![Tag {
            text: "life".to_string(),
            link: "https://quotes.toscrape.com/tag/life/".to_string(),
        }]))
        .unwrap();
        assert_eq!(shown["state"], "shown");
        assert_eq!(shown["tags"][0]["text"], "life");
    }

    #[test]
    fn test_recording_surface_collects_in_order() {
        let mut surface = RecordingSurface::new();
        surface.notify(&Notice::info("first"));
        surface.notify(&Notice::success("second"));
        assert_eq!(surface.messages(), vec!["first", "second"]);

        let view = QuoteView {
            text: "Simplicity is the soul of efficiency.".to_string(),
            author: "Austin Freeman".to_string(),
            author_link: None,
            tags: TagLine::Hidden,
            display_number: 4,
            total_quotes: 9,
            source_page: 2,
        };
        surface.render_quote(&view);
        assert_eq!(surface.last_quote(), Some(&view));

        let json = surface.to_json();
        assert_eq!(json["quote"]["display_number"], 4);
        assert_eq!(json["notices"][1]["severity"], "success");
    }
}
