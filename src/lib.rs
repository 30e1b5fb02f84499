// Copyright 2026 Quotedeck Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quotedeck — scrape quotes through a rendering proxy, cache them locally,
//! and restyle them as terminal output or shareable PNG cards.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod controller;
pub mod export;
pub mod quotes;
pub mod store;
pub mod view;

pub use acquisition::{AcquisitionService, PageSelector, QuoteFetcher};
pub use config::Config;
pub use controller::App;
pub use quotes::repository::QuoteRepository;
pub use quotes::{HistoryEntry, Quote, Tag};
pub use store::{FsStore, KvStore, MemStore};
