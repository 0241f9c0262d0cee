//! Polymarket REST API client.
//!
//! Supports two API surfaces:
//! - **Gamma API** (`gamma-api.polymarket.com`) - paginated event catalog,
//!   most traded first
//! - **CLOB API** (`clob.polymarket.com`) - batched order-book snapshots
//!
//! Transport failures never escape this module. Each request is retried on
//! timeouts, connection errors and throttling or gateway statuses; once the
//! attempts run out the client logs and returns whatever it has collected.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::dto::response::{BookEntry, BookRequest, GammaEvent};
use super::settings::PolymarketConfig;
use crate::domain::{book::Book, event::Event, id::TokenId};
use crate::error::{Error, Result};
use crate::port::outbound::exchange::{BookSource, EventSource};

/// Statuses worth another attempt.
const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Bounded exponential retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included. Never below one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each one after.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << exponent)
    }

    #[must_use]
    pub fn is_retryable_status(status: StatusCode) -> bool {
        RETRY_STATUSES.contains(&status)
    }

    fn is_retryable_error(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }
}

/// One decoded catalog page.
struct Page {
    events: Vec<Event>,
    /// Number of records the server sent, decodable or not.
    raw_len: usize,
}

/// HTTP client for the Polymarket REST APIs.
pub struct PolymarketClient {
    http: HttpClient,
    gamma_url: String,
    clob_url: String,
    page_size: usize,
    book_batch_size: usize,
    events_timeout: Duration,
    books_timeout: Duration,
    retry: RetryPolicy,
}

impl PolymarketClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &PolymarketConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .user_agent(config.http.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            gamma_url: config.gamma_url.trim_end_matches('/').to_string(),
            clob_url: config.clob_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
            book_batch_size: config.book_batch_size.max(1),
            events_timeout: Duration::from_millis(config.http.events_timeout_ms),
            books_timeout: Duration::from_millis(config.http.books_timeout_ms),
            retry: RetryPolicy {
                max_attempts: config.http.retry_max_attempts.max(1),
                base_backoff: Duration::from_millis(config.http.retry_backoff_ms),
            },
        })
    }

    async fn send_with_retry<T, F>(&self, what: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let max_attempts = self.retry.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            let (err, retryable) = match build().send().await {
                Ok(response) if response.status().is_success() => {
                    return response.json::<T>().await.map_err(Error::from);
                }
                Ok(response) => {
                    let status = response.status();
                    (
                        Error::Connection(format!("{what} returned {status}")),
                        RetryPolicy::is_retryable_status(status),
                    )
                }
                Err(err) => {
                    let retryable = RetryPolicy::is_retryable_error(&err);
                    (Error::from(err), retryable)
                }
            };

            if !retryable || attempt >= max_attempts {
                return Err(err);
            }

            let delay = self.retry.delay(attempt);
            warn!(
                request = what,
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "HTTP request failed, retrying"
            );
            sleep(delay).await;
        }
    }

    /// Fetch one catalog page. Undecodable events are dropped individually.
    async fn get_events_page(&self, offset: usize) -> Result<Page> {
        let url = format!("{}/events", self.gamma_url);
        let query = [
            ("limit", self.page_size.to_string()),
            ("active", "true".to_string()),
            ("closed", "false".to_string()),
            ("order", "volume".to_string()),
            ("ascending", "false".to_string()),
            ("offset", offset.to_string()),
        ];

        let raw: Vec<Value> = self
            .send_with_retry("events", || {
                self.http
                    .get(&url)
                    .query(&query)
                    .timeout(self.events_timeout)
            })
            .await?;

        let raw_len = raw.len();
        let events: Vec<Event> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<GammaEvent>(value) {
                Ok(event) => Some(Event::from(event)),
                Err(err) => {
                    debug!(offset, error = %err, "Dropping undecodable event");
                    None
                }
            })
            .collect();

        Ok(Page { events, raw_len })
    }

    async fn post_books(&self, chunk: &[TokenId]) -> Result<Vec<BookEntry>> {
        let url = format!("{}/books", self.clob_url);
        let body: Vec<BookRequest<'_>> = chunk
            .iter()
            .map(|id| BookRequest {
                token_id: id.as_str(),
            })
            .collect();

        self.send_with_retry("books", || {
            self.http
                .post(&url)
                .json(&body)
                .timeout(self.books_timeout)
        })
        .await
    }
}

#[async_trait]
impl EventSource for PolymarketClient {
    async fn fetch_events(&self, limit: usize) -> Vec<Event> {
        info!(url = %self.gamma_url, limit, "Fetching events (Gamma)");

        let mut events = Vec::new();
        let mut offset = 0;

        while events.len() < limit {
            let page = match self.get_events_page(offset).await {
                Ok(page) => page,
                Err(err) => {
                    error!(offset, error = %err, "Event fetch failed, keeping partial results");
                    break;
                }
            };

            if page.raw_len == 0 {
                break;
            }
            events.extend(page.events);
            offset += self.page_size;

            if page.raw_len < self.page_size {
                break;
            }
        }

        events.truncate(limit);
        info!(count = events.len(), "Fetched raw events");
        events
    }

    fn exchange_name(&self) -> &'static str {
        "Polymarket"
    }
}

#[async_trait]
impl BookSource for PolymarketClient {
    async fn fetch_books(&self, token_ids: &[TokenId]) -> HashMap<TokenId, Book> {
        let unique: Vec<TokenId> = token_ids
            .iter()
            .filter(|id| !id.is_blank())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        info!(url = %self.clob_url, tokens = unique.len(), "Fetching order books (CLOB)");

        let mut books = HashMap::with_capacity(unique.len());
        for (batch, chunk) in unique.chunks(self.book_batch_size).enumerate() {
            match self.post_books(chunk).await {
                Ok(entries) => {
                    for entry in entries {
                        if let Some(id) = entry.token_id() {
                            books.insert(id.clone(), entry.into_book(id));
                        }
                    }
                }
                Err(err) => {
                    warn!(batch, size = chunk.len(), error = %err, "Order book batch failed");
                }
            }
        }

        debug!(received = books.len(), "Fetched order books");
        books
    }

    fn exchange_name(&self) -> &'static str {
        "Polymarket"
    }
}
