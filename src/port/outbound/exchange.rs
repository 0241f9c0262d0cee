//! Market data ports.
//!
//! Both sources are infallible by contract. Transport failures are retried
//! and logged inside the adapter, which then returns whatever it managed to
//! collect. A short or empty result is a normal answer that callers must
//! handle, never an error.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{book::Book, event::Event, id::TokenId};

/// Catalog of events, most traded first.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch up to `limit` active, open events ordered by volume descending.
    async fn fetch_events(&self, limit: usize) -> Vec<Event>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}

/// Point-in-time order book snapshots.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetch books for the given tokens, keyed by the id the exchange echoes.
    ///
    /// Tokens whose batch failed are simply missing from the map.
    async fn fetch_books(&self, token_ids: &[TokenId]) -> HashMap<TokenId, Book>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}
