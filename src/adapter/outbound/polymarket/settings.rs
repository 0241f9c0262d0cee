//! Polymarket endpoint configuration.

use serde::{Deserialize, Serialize};

/// Polymarket HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolymarketHttpConfig {
    /// Timeout for one event catalog page, in milliseconds.
    #[serde(default = "default_events_timeout_ms")]
    pub events_timeout_ms: u64,
    /// Timeout for one order-book batch, in milliseconds.
    #[serde(default = "default_books_timeout_ms")]
    pub books_timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts per request, first try included.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Base backoff between retries in milliseconds. Doubles per retry.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_events_timeout_ms() -> u64 {
    10_000
}

const fn default_books_timeout_ms() -> u64 {
    5000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "MispricedOps/Scanner-2.0".into()
}

impl Default for PolymarketHttpConfig {
    fn default() -> Self {
        Self {
            events_timeout_ms: default_events_timeout_ms(),
            books_timeout_ms: default_books_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Polymarket exchange configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolymarketConfig {
    /// Gamma REST API URL (event catalog).
    #[serde(default = "default_polymarket_gamma_url")]
    pub gamma_url: String,
    /// CLOB REST API URL (order books).
    #[serde(default = "default_polymarket_clob_url")]
    pub clob_url: String,
    /// Base of public event pages; the event slug is appended.
    #[serde(default = "default_polymarket_market_url")]
    pub market_url: String,
    /// Events requested per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Token ids per order-book request.
    #[serde(default = "default_book_batch_size")]
    pub book_batch_size: usize,
    /// HTTP client configuration for REST API calls.
    #[serde(default)]
    pub http: PolymarketHttpConfig,
}

fn default_polymarket_gamma_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_polymarket_clob_url() -> String {
    "https://clob.polymarket.com".into()
}

fn default_polymarket_market_url() -> String {
    "https://polymarket.com/event".into()
}

const fn default_page_size() -> usize {
    100
}

const fn default_book_batch_size() -> usize {
    20
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            gamma_url: default_polymarket_gamma_url(),
            clob_url: default_polymarket_clob_url(),
            market_url: default_polymarket_market_url(),
            page_size: default_page_size(),
            book_batch_size: default_book_batch_size(),
            http: PolymarketHttpConfig::default(),
        }
    }
}
