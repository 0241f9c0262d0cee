//! Short-lived memo of scan reports.
//!
//! Repeating a scan with the same capital and exclusion set inside the TTL
//! returns the stored report instead of hitting the exchange again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::application::scanner::{ScanReport, Scanner};
use crate::domain::scan::ScanConfig;

/// Thread-safe TTL cache of scan reports keyed by scan inputs.
pub struct ScanCache {
    ttl: Duration,
    entries: Mutex<HashMap<ScanConfig, (Instant, Arc<ScanReport>)>>,
}

impl ScanCache {
    /// A zero TTL disables caching.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh report for `config`, if any.
    #[must_use]
    pub fn get(&self, config: &ScanConfig) -> Option<Arc<ScanReport>> {
        self.get_at(config, Instant::now())
    }

    /// Same as [`ScanCache::get`] with an explicit clock.
    #[must_use]
    pub fn get_at(&self, config: &ScanConfig, now: Instant) -> Option<Arc<ScanReport>> {
        let entries = self.entries.lock();
        entries
            .get(config)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(_, report)| Arc::clone(report))
    }

    /// Store a report, dropping expired entries on the way.
    pub fn insert(&self, config: ScanConfig, report: ScanReport) -> Arc<ScanReport> {
        self.insert_at(config, report, Instant::now())
    }

    /// Same as [`ScanCache::insert`] with an explicit clock.
    pub fn insert_at(&self, config: ScanConfig, report: ScanReport, now: Instant) -> Arc<ScanReport> {
        let report = Arc::new(report);
        if self.ttl.is_zero() {
            return report;
        }

        let mut entries = self.entries.lock();
        entries.retain(|_, (stored, _)| now.saturating_duration_since(*stored) < self.ttl);
        entries.insert(config, (now, Arc::clone(&report)));
        report
    }

    /// Cached report, or a fresh scan stored for next time.
    ///
    /// The lock is not held while scanning; two concurrent misses both scan
    /// and the later one wins.
    pub async fn get_or_scan(&self, config: &ScanConfig, scanner: &Scanner) -> Arc<ScanReport> {
        if let Some(report) = self.get(config) {
            debug!(capital = %config.capital(), "Scan cache hit");
            return report;
        }
        let report = scanner.scan(config).await;
        self.insert(config.clone(), report)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
