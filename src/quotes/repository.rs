//! Working set, display history, and display counter, mirrored to the store.
//!
//! Every mutation persists immediately under fixed keys, so a restart
//! rehydrates the exact state the previous run left behind. Cached quotes
//! stay valid for six hours; after that the working set is considered stale
//! and callers should re-acquire.

use crate::quotes::{HistoryEntry, Quote};
use crate::store::KvStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// Store key holding the serialized working set.
pub const KEY_CACHED_QUOTES: &str = "cachedQuotes";
/// Store key holding the RFC 3339 timestamp of the last successful scrape.
pub const KEY_LAST_SCRAPE: &str = "lastScrapeTime";
/// Store key holding the display history.
pub const KEY_HISTORY: &str = "quotesHistory";
/// Store key holding the display counter.
pub const KEY_COUNTER: &str = "quoteCounter";

/// How long a cached working set stays fresh.
pub const FRESHNESS_SECS: i64 = 6 * 60 * 60;

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// In-memory quote state mirrored to a [`KvStore`].
pub struct QuoteRepository<S: KvStore> {
    store: S,
    working_set: Vec<Quote>,
    history: Vec<HistoryEntry>,
    counter: u64,
    last_scrape: Option<DateTime<Utc>>,
    current_page: u32,
}

impl<S: KvStore> QuoteRepository<S> {
    /// Open the repository, rehydrating whatever the store holds.
    ///
    /// Corrupt or unreadable values are treated as absent so one bad file
    /// never bricks startup.
    pub fn open(store: S) -> Self {
        let working_set: Vec<Quote> = load_json(&store, KEY_CACHED_QUOTES).unwrap_or_default();
        let history: Vec<HistoryEntry> = load_json(&store, KEY_HISTORY).unwrap_or_default();
        let counter = load_string(&store, KEY_COUNTER)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1);
        let last_scrape = load_string(&store, KEY_LAST_SCRAPE).and_then(|v| {
            DateTime::parse_from_rfc3339(v.trim().trim_matches('"'))
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| tracing::warn!("ignoring unparseable {KEY_LAST_SCRAPE}: {e}"))
                .ok()
        });

        tracing::debug!(
            "repository opened: {} cached quote(s), {} history entr(ies), counter {}",
            working_set.len(),
            history.len(),
            counter
        );

        Self {
            store,
            working_set,
            history,
            counter,
            last_scrape,
            current_page: 1,
        }
    }

    /// Replace the working set with freshly acquired quotes and persist.
    pub fn adopt_live(&mut self, quotes: Vec<Quote>, page: u32, now: DateTime<Utc>) -> Result<()> {
        self.working_set = quotes;
        self.current_page = page;
        self.last_scrape = Some(now);

        let json = serde_json::to_string(&self.working_set)
            .context("failed to serialize working set")?;
        self.store.set(KEY_CACHED_QUOTES, &json)?;
        self.store.set(KEY_LAST_SCRAPE, &now.to_rfc3339())?;
        Ok(())
    }

    /// Replace the working set with the fallback dataset. Nothing persists:
    /// the cache on disk keeps whatever the last live acquisition wrote.
    pub fn adopt_fallback(&mut self, quotes: Vec<Quote>) {
        self.working_set = quotes;
    }

    /// Record one display: returns the entry's display number, advances the
    /// counter, and prepends a deduplicated history entry.
    pub fn record_display(&mut self, quote: &Quote) -> Result<u64> {
        let display_number = self.counter;

        self.history.retain(|entry| entry.quote.id != quote.id);
        self.history.insert(
            0,
            HistoryEntry {
                quote: quote.clone(),
                display_number,
            },
        );
        self.history.truncate(HISTORY_LIMIT);

        self.counter += 1;
        self.store.set(KEY_COUNTER, &self.counter.to_string())?;
        let json = serde_json::to_string(&self.history).context("failed to serialize history")?;
        self.store.set(KEY_HISTORY, &json)?;

        Ok(display_number)
    }

    /// Whether the cached working set is still inside the freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.last_scrape {
            Some(t) => now.signed_duration_since(t).num_seconds() < FRESHNESS_SECS,
            None => false,
        }
    }

    /// Drop all state and remove every persisted key.
    pub fn clear(&mut self) -> Result<()> {
        self.working_set.clear();
        self.history.clear();
        self.counter = 1;
        self.last_scrape = None;

        self.store.remove(KEY_CACHED_QUOTES)?;
        self.store.remove(KEY_LAST_SCRAPE)?;
        self.store.remove(KEY_HISTORY)?;
        self.store.remove(KEY_COUNTER)?;
        Ok(())
    }

    // ── Accessors ─────────────────────────

    pub fn working_set(&self) -> &[Quote] {
        &self.working_set
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Next display number to be handed out.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn last_scrape(&self) -> Option<DateTime<Utc>> {
        self.last_scrape
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }
}

fn load_string<S: KvStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to read {key} from store: {e:#}");
            None
        }
    }
}

fn load_json<S: KvStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = load_string(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring corrupt {key} in store: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::fallback_quotes;
    use crate::store::MemStore;
    use chrono::Duration;

    fn repo() -> QuoteRepository<MemStore> {
        QuoteRepository::open(MemStore::new())
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let repo = repo();
        assert!(repo.is_empty());
        assert!(repo.history().is_empty());
        assert_eq!(repo.counter(), 1);
        assert!(!repo.is_fresh(Utc::now()));
    }

    #[test]
    fn test_adopt_live_persists_and_rehydrates() {
        let store = MemStore::new();
        let mut repo = QuoteRepository::open(store);
        let now = Utc::now();
        repo.adopt_live(fallback_quotes(), 4, now).unwrap();
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.current_page(), 4);

        // A second repository over the same store sees the same state.
        let QuoteRepository { store, .. } = repo;
        let reopened = QuoteRepository::open(store);
        assert_eq!(reopened.len(), 3);
        assert!(reopened.is_fresh(now));
    }

    #[test]
    fn test_adopt_fallback_does_not_persist() {
        let mut repo = repo();
        repo.adopt_fallback(fallback_quotes());
        assert_eq!(repo.len(), 3);

        let QuoteRepository { store, .. } = repo;
        assert!(store.get(KEY_CACHED_QUOTES).unwrap().is_none());
        assert!(store.get(KEY_LAST_SCRAPE).unwrap().is_none());
    }

    #[test]
    fn test_record_display_counter_and_history() {
        let mut repo = repo();
        let quotes = fallback_quotes();

        // Display numbers are sampled before the counter advances.
        assert_eq!(repo.record_display(&quotes[0]).unwrap(), 1);
        assert_eq!(repo.record_display(&quotes[1]).unwrap(), 2);
        assert_eq!(repo.counter(), 3);

        // Most recent first.
        assert_eq!(repo.history()[0].quote.id, quotes[1].id);
        assert_eq!(repo.history()[1].quote.id, quotes[0].id);
    }

    #[test]
    fn test_history_dedup_moves_entry_to_front() {
        let mut repo = repo();
        let quotes = fallback_quotes();
        repo.record_display(&quotes[0]).unwrap();
        repo.record_display(&quotes[1]).unwrap();
        repo.record_display(&quotes[0]).unwrap();

        assert_eq!(repo.history().len(), 2);
        assert_eq!(repo.history()[0].quote.id, quotes[0].id);
        // The re-display carries the new number.
        assert_eq!(repo.history()[0].display_number, 3);
    }

    #[test]
    fn test_history_is_capped() {
        let mut repo = repo();
        let base = fallback_quotes().remove(0);
        for i in 0..25u64 {
            let mut q = base.clone();
            q.id = 1000 + i;
            repo.record_display(&q).unwrap();
        }
        assert_eq!(repo.history().len(), HISTORY_LIMIT);
        // Newest entry first, oldest entries dropped.
        assert_eq!(repo.history()[0].quote.id, 1024);
        assert_eq!(repo.history()[HISTORY_LIMIT - 1].quote.id, 1015);
    }

    #[test]
    fn test_counter_survives_reload() {
        let store = MemStore::new();
        let mut repo = QuoteRepository::open(store);
        let q = fallback_quotes().remove(0);
        repo.record_display(&q).unwrap();
        repo.record_display(&q).unwrap();

        let QuoteRepository { store, .. } = repo;
        let reopened = QuoteRepository::open(store);
        assert_eq!(reopened.counter(), 3);
        assert_eq!(reopened.history().len(), 1);
    }

    #[test]
    fn test_freshness_window() {
        let store = MemStore::new();
        let mut repo = QuoteRepository::open(store);
        let scraped_at = Utc::now();
        repo.adopt_live(fallback_quotes(), 1, scraped_at).unwrap();

        assert!(repo.is_fresh(scraped_at + Duration::hours(3)));
        assert!(!repo.is_fresh(scraped_at + Duration::hours(7)));
        // Exactly at the boundary counts as stale.
        assert!(!repo.is_fresh(scraped_at + Duration::hours(6)));
    }

    #[test]
    fn test_clear_resets_and_removes_keys() {
        let store = MemStore::new();
        let mut repo = QuoteRepository::open(store);
        repo.adopt_live(fallback_quotes(), 2, Utc::now()).unwrap();
        let q = repo.working_set()[0].clone();
        repo.record_display(&q).unwrap();

        repo.clear().unwrap();
        assert!(repo.is_empty());
        assert!(repo.history().is_empty());
        assert_eq!(repo.counter(), 1);

        let QuoteRepository { store, .. } = repo;
        for key in [KEY_CACHED_QUOTES, KEY_LAST_SCRAPE, KEY_HISTORY, KEY_COUNTER] {
            assert!(store.get(key).unwrap().is_none(), "{key} should be gone");
        }
    }

    #[test]
    fn test_corrupt_cache_is_ignored() {
        let store = MemStore::new();
        store.set(KEY_CACHED_QUOTES, "not json at all").unwrap();
        store.set(KEY_COUNTER, "minus five").unwrap();
        let repo = QuoteRepository::open(store);
        assert!(repo.is_empty());
        assert_eq!(repo.counter(), 1);
    }

    #[test]
    fn test_zero_counter_resets_to_one() {
        let store = MemStore::new();
        store.set(KEY_COUNTER, "0").unwrap();
        let repo = QuoteRepository::open(store);
        assert_eq!(repo.counter(), 1);
    }
}
