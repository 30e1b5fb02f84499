//! Quote acquisition: remote scraping with a built-in fallback set.
//!
//! The service never surfaces a failed acquisition to callers. Any error on
//! the live path collapses into the bundled fallback quotes plus a status
//! explaining what went wrong; the caller always gets something to show.

pub mod client;

pub use client::ScrapeClient;

use crate::config::Config;
use crate::quotes::{self, parser, Quote};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

/// Highest page number worth asking the source for.
pub const MAX_PAGE: u32 = 10;

/// Default settle wait handed to the remote browser.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

// ── Page selection ────────────────────────────────────────────────────────

/// Which source page an acquisition targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// A specific page, `1..=MAX_PAGE`.
    Page(u32),
    /// Pick one uniformly at random.
    Random,
}

impl PageSelector {
    /// Resolve to a concrete page number.
    pub fn resolve(self) -> u32 {
        match self {
            PageSelector::Page(n) => n,
            PageSelector::Random => rand::thread_rng().gen_range(1..=MAX_PAGE),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Why a live acquisition failed.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("scraper endpoint returned HTTP {status}")]
    Http { status: u16 },

    #[error("unexpected response shape: {0}")]
    Protocol(String),

    #[error("page {page} produced no quotes")]
    NoQuotes { page: u32 },
}

// ── Acquisition outcome ───────────────────────────────────────────────────

/// Where the quotes in an [`Acquisition`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionStatus {
    /// Fresh from the live source.
    Live,
    /// Bundled fallback set, with the reason the live path failed.
    Fallback { reason: String },
}

/// Result of one acquisition attempt. Always carries quotes.
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub quotes: Vec<Quote>,
    pub page: u32,
    pub status: AcquisitionStatus,
}

impl Acquisition {
    pub fn is_live(&self) -> bool {
        matches!(self.status, AcquisitionStatus::Live)
    }
}

// ── Fetcher trait ─────────────────────────────────────────────────────────

/// Source of quotes. The production implementation talks to the scraping
/// API; tests substitute a stub.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Acquire quotes for the selected page. Infallible by contract: a
    /// failed live fetch yields the fallback set instead.
    async fn fetch(&self, page: PageSelector, wait: Duration) -> Acquisition;

    /// Probe endpoint reachability. Returns the HTTP status on a completed
    /// round trip.
    async fn probe(&self) -> Result<u16, ScrapeError>;
}

// ── Live service ──────────────────────────────────────────────────────────

/// Production fetcher backed by [`ScrapeClient`].
pub struct AcquisitionService {
    client: ScrapeClient,
}

impl AcquisitionService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ScrapeClient::new(config)?,
        })
    }

    /// The live path: fetch fragments, parse each one, reject empty pages.
    async fn try_acquire(&self, page: u32, wait: Duration) -> Result<Vec<Quote>, ScrapeError> {
        let fragments = self.client.fetch_fragments(page, wait).await?;
        let now = Utc::now();
        let origin = self.client.source_origin();

        let parsed: Vec<Quote> = fragments
            .iter()
            .filter_map(|html| parser::parse_fragment(html, origin, page, now))
            .collect();

        tracing::debug!(
            "page {page}: {} fragments, {} parsed",
            fragments.len(),
            parsed.len()
        );

        if parsed.is_empty() {
            return Err(ScrapeError::NoQuotes { page });
        }
        Ok(parsed)
    }
}

#[async_trait]
impl QuoteFetcher for AcquisitionService {
    async fn fetch(&self, page: PageSelector, wait: Duration) -> Acquisition {
        let page = page.resolve();
        match self.try_acquire(page, wait).await {
            Ok(quotes) => Acquisition {
                quotes,
                page,
                status: AcquisitionStatus::Live,
            },
            Err(e) => {
                tracing::warn!("live acquisition failed, using fallback set: {e}");
                Acquisition {
                    quotes: quotes::fallback_quotes(),
                    page: 1,
                    status: AcquisitionStatus::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    async fn probe(&self) -> Result<u16, ScrapeError> {
        self.client.probe().await
    }
}
