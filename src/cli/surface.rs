//! Terminal rendering of quotes, history, and notices.

use crate::cli::output::{self, Styled};
use crate::quotes::HistoryEntry;
use crate::view::{Notice, QuoteView, RecordingSurface, Severity, TagLine, UiSurface};
use indicatif::ProgressBar;
use std::time::Duration;

/// How much quote text a history line shows before truncation.
const HISTORY_TEXT_LIMIT: usize = 80;

/// Interactive surface: quotes and history on stdout, notices and the
/// busy spinner on stderr.
pub struct TermSurface {
    style: Styled,
    quiet: bool,
    spinner: Option<ProgressBar>,
}

impl TermSurface {
    pub fn new() -> Self {
        Self {
            style: Styled::new(),
            quiet: output::is_quiet(),
            spinner: None,
        }
    }
}

impl Default for TermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSurface for TermSurface {
    fn render_quote(&mut self, view: &QuoteView) {
        let s = &self.style;
        println!();
        println!("  {}", s.bold(&format!("\"{}\"", view.text)));
        println!("      — {}", s.cyan(&view.author));
        if let Some(link) = &view.author_link {
            println!("        {}", s.dim(link));
        }
        match &view.tags {
            TagLine::Hidden => {}
            TagLine::Empty => println!("      {}", s.dim("No tags")),
            TagLine::Shown(tags) => {
                let names: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
                println!("      {} {}", s.dim("Tags:"), names.join(", "));
            }
        }
        println!(
            "      {}",
            s.dim(&format!(
                "#{} · {} quotes · page {}",
                view.display_number, view.total_quotes, view.source_page
            ))
        );
        println!();
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            println!("  No history yet. Start scraping quotes!");
            return;
        }
        println!();
        for (i, entry) in entries.iter().enumerate() {
            println!("  {}", history_line(i + 1, entry));
        }
        println!();
    }

    fn notify(&mut self, notice: &Notice) {
        if self.quiet && notice.severity != Severity::Error {
            return;
        }
        let s = &self.style;
        let sym = match notice.severity {
            Severity::Success => s.ok_sym(),
            Severity::Error => s.err_sym(),
            Severity::Warning => s.warn_sym(),
            Severity::Info => s.cyan("[..]"),
        };
        eprintln!("  {sym} {}", notice.message);
    }

    fn loading(&mut self, active: bool, message: &str) {
        if active {
            if self.quiet {
                return;
            }
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(80));
            pb.set_message(message.to_string());
            self.spinner = Some(pb);
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

fn history_line(position: usize, entry: &HistoryEntry) -> String {
    format!(
        "{position}. \"{}\" — {} (#{})",
        truncate_text(&entry.quote.text, HISTORY_TEXT_LIMIT),
        entry.quote.author,
        entry.display_number
    )
}

fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

// ── Mode-aware surface for one-shot commands ──────────────────────────────

/// Picks the right surface for the active output mode. JSON mode records
/// everything and dumps one document at the end.
pub enum CliSurface {
    Term(TermSurface),
    Json(RecordingSurface),
}

impl CliSurface {
    pub fn auto() -> Self {
        if output::is_json() {
            CliSurface::Json(RecordingSurface::new())
        } else {
            CliSurface::Term(TermSurface::new())
        }
    }

    /// Flush the JSON document, if any.
    pub fn finish(self) {
        self.finish_with(&[]);
    }

    /// Flush the JSON document with extra top-level fields merged in.
    pub fn finish_with(self, extra: &[(&str, serde_json::Value)]) {
        if let CliSurface::Json(rec) = self {
            let mut doc = rec.to_json();
            for (key, value) in extra {
                doc[*key] = value.clone();
            }
            output::print_json(&doc);
        }
    }
}

impl UiSurface for CliSurface {
    fn render_quote(&mut self, view: &QuoteView) {
        match self {
            CliSurface::Term(t) => t.render_quote(view),
            CliSurface::Json(r) => r.render_quote(view),
        }
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        match self {
            CliSurface::Term(t) => t.render_history(entries),
            CliSurface::Json(r) => r.render_history(entries),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        match self {
            CliSurface::Term(t) => t.notify(notice),
            CliSurface::Json(r) => r.notify(notice),
        }
    }

    fn loading(&mut self, active: bool, message: &str) {
        match self {
            CliSurface::Term(t) => t.loading(active, message),
            CliSurface::Json(r) => r.loading(active, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::Quote;
    use chrono::Utc;

    fn entry(text: &str, number: u64) -> HistoryEntry {
        HistoryEntry {
            quote: Quote {
                id: 7,
                text: text.to_string(),
                author: "Albert Einstein".to_string(),
                author_link: String::new(),
                tags: vec![],
                acquired_at: Utc::now(),
                source_page: 1,
            },
            display_number: number,
        }
    }

    #[test]
    fn test_truncate_keeps_short_text_intact() {
        let text = "a".repeat(80);
        assert_eq!(truncate_text(&text, 80), text);
    }

    #[test]
    fn test_truncate_cuts_long_text_with_ellipsis() {
        let text = "a".repeat(81);
        let cut = truncate_text(&text, 80);
        assert_eq!(cut.chars().count(), 83);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_history_line_format() {
        let line = history_line(2, &entry("Stay hungry.", 14));
        assert_eq!(line, "2. \"Stay hungry.\" — Albert Einstein (#14)");
    }
}
