//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from an optional TOML file; every field has a
//! default, and the OpenAI key only ever comes from the environment.
//!
//! # Example
//!
//! ```no_run
//! use mispriced::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::scanner::ScannerConfig;
use crate::adapter::outbound::polymarket::settings::PolymarketConfig;
use crate::domain::scan::{MAX_CAPITAL, MIN_CAPITAL};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Polymarket endpoints and HTTP behaviour.
    #[serde(default)]
    pub polymarket: PolymarketConfig,

    /// Scan thresholds and defaults.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Audit model settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] or [`ConfigError::InvalidValue`]
    /// for the first problem found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_url("polymarket.gamma_url", &self.polymarket.gamma_url)?;
        validate_url("polymarket.clob_url", &self.polymarket.clob_url)?;
        validate_url("polymarket.market_url", &self.polymarket.market_url)?;
        validate_url("llm.api_url", &self.llm.api_url)?;

        if self.polymarket.page_size == 0 {
            return Err(invalid("polymarket.page_size", "must be greater than 0"));
        }
        if self.polymarket.book_batch_size == 0 {
            return Err(invalid("polymarket.book_batch_size", "must be greater than 0"));
        }
        if self.polymarket.http.retry_max_attempts == 0 {
            return Err(invalid(
                "polymarket.http.retry_max_attempts",
                "must be greater than 0",
            ));
        }
        if self.polymarket.http.events_timeout_ms == 0 || self.polymarket.http.books_timeout_ms == 0
        {
            return Err(invalid("polymarket.http", "timeouts must be greater than 0"));
        }

        let scanner = &self.scanner;
        if scanner.event_limit == 0 {
            return Err(invalid("scanner.event_limit", "must be greater than 0"));
        }
        if scanner.min_days < 0 || scanner.min_days > scanner.max_days {
            return Err(invalid(
                "scanner.min_days",
                "must be non-negative and not above max_days",
            ));
        }
        if scanner.min_price <= Decimal::ZERO
            || scanner.max_price > Decimal::ONE
            || scanner.min_price > scanner.max_price
        {
            return Err(invalid(
                "scanner.min_price",
                "price band must satisfy 0 < min_price <= max_price <= 1",
            ));
        }
        if scanner.min_fill <= Decimal::ZERO || scanner.min_fill > Decimal::ONE {
            return Err(invalid("scanner.min_fill", "must be in (0, 1]"));
        }
        if scanner.max_slippage < Decimal::ZERO || scanner.max_slippage > Decimal::ONE {
            return Err(invalid("scanner.max_slippage", "must be between 0 and 1"));
        }
        if scanner.max_top_gap < Decimal::ZERO {
            return Err(invalid("scanner.max_top_gap", "must be 0 or greater"));
        }
        if scanner.min_levels < 2 {
            return Err(invalid("scanner.min_levels", "must be at least 2"));
        }
        if scanner.default_capital < MIN_CAPITAL || scanner.default_capital > MAX_CAPITAL {
            return Err(invalid(
                "scanner.default_capital",
                format!("must be between {MIN_CAPITAL} and {MAX_CAPITAL}"),
            ));
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "llm.model" }.into());
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(invalid("llm.temperature", "must be between 0 and 2"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    let url = Url::parse(value).map_err(|e| invalid(field, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(field, format!("unsupported scheme '{other}'"))),
    }
}
