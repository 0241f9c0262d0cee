//! Mispriced - a prediction market scanner for high-probability outcomes
//! that can actually be filled at size.
//!
//! A scan pulls open events from the Polymarket catalog, keeps the markets
//! with one outcome priced in a high-probability band, simulates buying that
//! outcome against the live order book, and ranks what survives by ROI.
//! Any single result can then be handed to an LLM for an adversarial review.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure types and rules: events, books, the fill simulator,
//!   scan configuration, skip and rejection reasons
//! - [`port`] - Outbound traits for market data and text completion
//! - [`application`] - Extraction, ranking, the scan pipeline, audits, and
//!   the per-invocation cache and session
//! - [`adapter`] - Polymarket and OpenAI clients, and the CLI
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use mispriced::domain::scan::ScanConfig;
//! use mispriced::infrastructure::bootstrap;
//! use mispriced::infrastructure::config::settings::Config;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> mispriced::error::Result<()> {
//! let config = Config::default();
//! let scanner = bootstrap::build_scanner(&config)?;
//! let scan = ScanConfig::try_new(dec!(2000), ["Sports"])?;
//! let report = scanner.scan(&scan).await;
//! for result in &report.results {
//!     println!("{} {}", result.candidate.title, result.roi_pct);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
