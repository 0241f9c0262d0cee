//! Scan pipeline: fetch, extract, fetch books, rank.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::extract::{Extractor, Skip};
use super::rank::Ranker;
use crate::domain::{
    candidate::RankedResult, id::TokenId, scan::ScanConfig, scan::ScanRules, skip::Rejection,
};
use crate::port::outbound::exchange::{BookSource, EventSource};

/// Everything one scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Ranked survivors, best first.
    pub results: Vec<RankedResult>,
    /// Category labels seen on every fetched event.
    pub categories: BTreeSet<String>,
    pub skipped: Vec<Skip>,
    pub rejected: Vec<(TokenId, Rejection)>,
    pub events_scanned: usize,
    /// Candidates handed to the ranking engine.
    pub candidates: usize,
}

impl ScanReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Runs the full scan against a pair of market data sources.
pub struct Scanner {
    events: Arc<dyn EventSource>,
    books: Arc<dyn BookSource>,
    extractor: Extractor,
    ranker: Ranker,
    event_limit: usize,
}

impl Scanner {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventSource>,
        books: Arc<dyn BookSource>,
        rules: ScanRules,
        event_limit: usize,
    ) -> Self {
        Self {
            events,
            books,
            extractor: Extractor::new(rules.clone()),
            ranker: Ranker::new(rules),
            event_limit,
        }
    }

    /// Scan as of the current time.
    pub async fn scan(&self, config: &ScanConfig) -> ScanReport {
        self.scan_at(config, Utc::now()).await
    }

    /// Scan with an explicit clock.
    ///
    /// Books are requested only for tokens that survived extraction.
    pub async fn scan_at(&self, config: &ScanConfig, now: DateTime<Utc>) -> ScanReport {
        info!(
            exchange = self.events.exchange_name(),
            capital = %config.capital(),
            excluded = config.excluded().len(),
            limit = self.event_limit,
            "Starting scan"
        );

        let events = self.events.fetch_events(self.event_limit).await;
        if events.is_empty() {
            warn!("Event catalog returned nothing");
        }

        let extraction = self.extractor.extract(&events, config, now);
        let token_ids = extraction.token_ids();
        let candidates = token_ids.len();

        let books = if token_ids.is_empty() {
            debug!("No candidates, skipping book fetch");
            Default::default()
        } else {
            self.books.fetch_books(&token_ids).await
        };
        debug!(
            requested = candidates,
            received = books.len(),
            "Fetched order books"
        );

        let ranking = self
            .ranker
            .rank(extraction.candidates, &books, config.capital());

        info!(
            events = events.len(),
            candidates,
            results = ranking.results.len(),
            rejected = ranking.rejected.len(),
            "Scan complete"
        );

        ScanReport {
            results: ranking.results,
            categories: extraction.categories,
            skipped: extraction.skipped,
            rejected: ranking.rejected,
            events_scanned: events.len(),
            candidates,
        }
    }
}
