//! Application controller: wires acquisition, the repository, and a UI
//! surface together.
//!
//! Every user-facing flow lives here so the terminal surface, JSON mode,
//! and the interactive session all drive the same logic. The controller
//! owns the current quote and the display preferences; surfaces only
//! render what they are handed.

use crate::acquisition::{
    AcquisitionService, AcquisitionStatus, PageSelector, QuoteFetcher, DEFAULT_SETTLE,
};
use crate::config::Config;
use crate::quotes::repository::QuoteRepository;
use crate::quotes::{HistoryEntry, Quote};
use crate::store::{FsStore, KvStore};
use crate::view::{ApiStatus, Notice, QuoteView, StatusView, TagLine, UiSurface};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use std::time::Duration;

/// Per-session display preferences.
#[derive(Debug, Clone, Copy)]
pub struct Preferences {
    pub show_tags: bool,
    pub show_author_link: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_tags: true,
            show_author_link: true,
        }
    }
}

/// The application core, generic over storage and quote source.
pub struct App<S: KvStore, F: QuoteFetcher> {
    repo: QuoteRepository<S>,
    fetcher: F,
    prefs: Preferences,
    api_status: ApiStatus,
    current: Option<(Quote, u64)>,
}

impl App<FsStore, AcquisitionService> {
    /// Build the production app from configuration.
    pub fn bootstrap(config: &Config) -> Result<Self> {
        let store = FsStore::open(config.store_dir())?;
        let fetcher = AcquisitionService::new(config)?;
        Ok(Self::new(QuoteRepository::open(store), fetcher))
    }
}

impl<S: KvStore, F: QuoteFetcher> App<S, F> {
    /// Wrap an already-loaded repository. The most recently displayed
    /// quote, if any, becomes the current one so `copy` and `export` have
    /// something to work with in one-shot invocations.
    pub fn new(repo: QuoteRepository<S>, fetcher: F) -> Self {
        let current = repo
            .history()
            .first()
            .map(|entry| (entry.quote.clone(), entry.display_number));
        Self {
            repo,
            fetcher,
            prefs: Preferences::default(),
            api_status: ApiStatus::Unknown,
            current,
        }
    }

    /// Entry flow: reuse a fresh cache, otherwise acquire live quotes.
    /// Either way a random quote ends up displayed.
    pub async fn startup(&mut self, ui: &mut dyn UiSurface) -> Result<()> {
        if !self.repo.is_empty() && self.repo.is_fresh(Utc::now()) {
            ui.notify(&Notice::info("Loaded quotes from cache"));
            self.select_random(ui)
        } else {
            self.fetch(PageSelector::Random, DEFAULT_SETTLE, ui).await
        }
    }

    /// Acquire quotes for `page` and display a random one. A live result
    /// replaces the cache; a fallback result replaces only the in-memory
    /// working set.
    pub async fn fetch(
        &mut self,
        page: PageSelector,
        wait: Duration,
        ui: &mut dyn UiSurface,
    ) -> Result<()> {
        ui.loading(true, "Scraping quotes...");
        let acquisition = self.fetcher.fetch(page, wait).await;
        ui.loading(false, "");

        let quotes = acquisition.quotes;
        let page = acquisition.page;
        match acquisition.status {
            AcquisitionStatus::Live => {
                self.repo.adopt_live(quotes, page, Utc::now())?;
                self.api_status = ApiStatus::Live;
                ui.notify(&Notice::success(format!(
                    "Successfully scraped {} quotes from page {}",
                    self.repo.len(),
                    page
                )));
            }
            AcquisitionStatus::Fallback { reason } => {
                self.api_status = ApiStatus::Offline;
                ui.notify(&Notice::error(format!(
                    "Scraping failed: {reason}. Using cached quotes."
                )));
                self.repo.adopt_fallback(quotes);
                ui.notify(&Notice::warning("Using fallback quotes"));
            }
        }
        self.select_random(ui)
    }

    /// Pick a random quote from the working set, record the display, and
    /// render it.
    pub fn select_random(&mut self, ui: &mut dyn UiSurface) -> Result<()> {
        if self.repo.is_empty() {
            ui.notify(&Notice::warning("No quotes available. Please scrape first."));
            return Ok(());
        }

        let index = rand::thread_rng().gen_range(0..self.repo.len());
        let quote = self.repo.working_set()[index].clone();
        let number = self.repo.record_display(&quote)?;
        ui.render_quote(&self.view_for(&quote, number));
        self.current = Some((quote, number));
        Ok(())
    }

    /// Re-display a history entry by zero-based index. Keeps the entry's
    /// original display number and advances nothing.
    pub fn show_history(&mut self, index: usize, ui: &mut dyn UiSurface) {
        let Some(entry) = self.repo.history().get(index).cloned() else {
            ui.notify(&Notice::warning("No such history entry"));
            return;
        };
        ui.render_quote(&self.view_for(&entry.quote, entry.display_number));
        self.current = Some((entry.quote, entry.display_number));
        ui.notify(&Notice::info("Loaded quote from history"));
    }

    /// Render the full history list.
    pub fn show_history_list(&self, ui: &mut dyn UiSurface) {
        ui.render_history(self.repo.history());
    }

    /// Drop every persisted key and reset in-memory state.
    pub fn clear_cache(&mut self, ui: &mut dyn UiSurface) -> Result<()> {
        self.repo.clear()?;
        self.current = None;
        ui.notify(&Notice::success("All cache cleared successfully!"));
        Ok(())
    }

    /// One OPTIONS round trip against the scraping endpoint. Updates the
    /// tracked API status and reports the outcome.
    pub async fn probe_api(&mut self, ui: &mut dyn UiSurface) -> bool {
        ui.notify(&Notice::info("Testing API connection..."));
        match self.fetcher.probe().await {
            Ok(status) if (200..300).contains(&status) => {
                self.api_status = ApiStatus::Live;
                ui.notify(&Notice::success("API connection successful!"));
                true
            }
            Ok(status) => {
                self.api_status = ApiStatus::Offline;
                ui.notify(&Notice::error(format!(
                    "API connection failed: HTTP {status}"
                )));
                false
            }
            Err(e) => {
                self.api_status = ApiStatus::Offline;
                ui.notify(&Notice::error(format!("API connection failed: {e}")));
                false
            }
        }
    }

    pub fn toggle_tags(&mut self, ui: &mut dyn UiSurface) -> bool {
        self.prefs.show_tags = !self.prefs.show_tags;
        self.rerender_current(ui);
        self.prefs.show_tags
    }

    pub fn toggle_author_link(&mut self, ui: &mut dyn UiSurface) -> bool {
        self.prefs.show_author_link = !self.prefs.show_author_link;
        self.rerender_current(ui);
        self.prefs.show_author_link
    }

    pub fn current_quote(&self) -> Option<&Quote> {
        self.current.as_ref().map(|(quote, _)| quote)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.repo.history()
    }

    pub fn status(&self) -> StatusView {
        StatusView {
            api: self.api_status,
            total_quotes: self.repo.len(),
            history_len: self.repo.history().len(),
            next_display_number: self.repo.counter(),
            last_scrape: self
                .repo
                .last_scrape()
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            cache_fresh: self.repo.is_fresh(Utc::now()),
            source_page: self.repo.current_page(),
            show_tags: self.prefs.show_tags,
            show_author_link: self.prefs.show_author_link,
        }
    }

    fn rerender_current(&self, ui: &mut dyn UiSurface) {
        if let Some((quote, number)) = &self.current {
            ui.render_quote(&self.view_for(quote, *number));
        }
    }

    fn view_for(&self, quote: &Quote, display_number: u64) -> QuoteView {
        let tags = if !self.prefs.show_tags {
            TagLine::Hidden
        } else if quote.tags.is_empty() {
            TagLine::Empty
        } else {
            TagLine::Shown(quote.tags.clone())
        };

        let author_link = if self.prefs.show_author_link && !quote.author_link.is_empty() {
            Some(quote.author_link.clone())
        } else {
            None
        };

        QuoteView {
            text: quote.text.clone(),
            author: quote.author.clone(),
            author_link,
            tags,
            display_number,
            total_quotes: self.repo.len(),
            source_page: quote.source_page,
        }
    }
}
