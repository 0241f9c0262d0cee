//! Operator session state.
//!
//! A session lives for one CLI invocation. It remembers every category label
//! seen so far, the most recent ranked results, and audits already paid for,
//! so that an interactive loop neither rescans nor re-audits needlessly.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use super::audit::Auditor;
use super::cache::ScanCache;
use super::scanner::{ScanReport, Scanner};
use crate::domain::{candidate::RankedResult, id::TokenId, scan::ScanConfig};
use crate::error::{Error, Result};

pub struct Session {
    scanner: Arc<Scanner>,
    cache: Arc<ScanCache>,
    categories: BTreeSet<String>,
    last: Option<Arc<ScanReport>>,
    audits: HashMap<TokenId, String>,
}

impl Session {
    /// Start a session with `seed` labels already known.
    pub fn new<I, S>(scanner: Arc<Scanner>, cache: Arc<ScanCache>, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scanner,
            cache,
            categories: seed.into_iter().map(Into::into).collect(),
            last: None,
            audits: HashMap::new(),
        }
    }

    /// Scan through the cache and fold discovered labels into the session.
    pub async fn scan(&mut self, config: &ScanConfig) -> Arc<ScanReport> {
        let report = self.cache.get_or_scan(config, &self.scanner).await;
        let before = self.categories.len();
        self.categories.extend(report.categories.iter().cloned());
        debug!(
            new_labels = self.categories.len() - before,
            results = report.results.len(),
            "Session updated"
        );
        self.last = Some(Arc::clone(&report));
        report
    }

    /// Every label known to the session, sorted.
    #[must_use]
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Results of the latest scan, best first.
    #[must_use]
    pub fn results(&self) -> &[RankedResult] {
        self.last
            .as_ref()
            .map_or(&[][..], |report| report.results.as_slice())
    }

    /// Result at 1-based `rank` in the latest scan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchResult`] when `rank` is zero or past the end.
    pub fn result(&self, rank: usize) -> Result<&RankedResult> {
        let results = self.results();
        rank.checked_sub(1)
            .and_then(|index| results.get(index))
            .ok_or(Error::NoSuchResult {
                rank,
                available: results.len(),
            })
    }

    /// Audit text already produced for a token in this session.
    #[must_use]
    pub fn cached_audit(&self, token_id: &TokenId) -> Option<&str> {
        self.audits.get(token_id).map(String::as_str)
    }

    /// Audit the result at `rank`, reusing an earlier answer for the same
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchResult`] for a bad rank and propagates
    /// auditor failures. Failures are not memoised.
    pub async fn audit(&mut self, auditor: &Auditor, rank: usize) -> Result<String> {
        let result = self.result(rank)?.clone();
        let token_id = result.candidate.token_id.clone();

        if let Some(text) = self.audits.get(&token_id) {
            debug!(token_id = %token_id, "Reusing audit from this session");
            return Ok(text.clone());
        }

        let text = auditor.audit(&result).await?;
        self.audits.insert(token_id, text.clone());
        Ok(text)
    }
}
