//! Scanner thresholds and defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{fill::FillSimulator, scan::ScanRules};

/// Category labels excluded unless the operator says otherwise.
pub const DEFAULT_EXCLUDES: [&str; 8] = [
    "Sports",
    "Memecoin",
    "Twitter",
    "Tweets",
    "Tweet Markets",
    "Pop Culture",
    "Gaming",
    "Social",
];

/// Labels known before any scan has run.
pub const SEED_CATEGORIES: [&str; 4] = ["Crypto", "Music", "NFTs", "Politics"];

/// `[scanner]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerConfig {
    /// Maximum events pulled from the catalog per scan.
    #[serde(default = "default_event_limit")]
    pub event_limit: usize,
    #[serde(default = "default_min_days")]
    pub min_days: i64,
    #[serde(default = "default_max_days")]
    pub max_days: i64,
    #[serde(default = "default_min_price")]
    pub min_price: Decimal,
    #[serde(default = "default_max_price")]
    pub max_price: Decimal,
    /// Fraction of capital that must find liquidity.
    #[serde(default = "default_min_fill")]
    pub min_fill: Decimal,
    #[serde(default = "default_max_slippage")]
    pub max_slippage: Decimal,
    /// Fewer ask levels than this marks the book as thin.
    #[serde(default = "default_min_levels")]
    pub min_levels: usize,
    /// Widest allowed gap between the two best asks.
    #[serde(default = "default_max_top_gap")]
    pub max_top_gap: Decimal,
    /// Bet size in USD when none is given on the command line.
    #[serde(default = "default_capital")]
    pub default_capital: Decimal,
    #[serde(default = "default_excludes")]
    pub default_excludes: Vec<String>,
    /// Seconds a scan result is reused for identical inputs.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Category labels shown per result.
    #[serde(default = "default_max_labels")]
    pub max_labels: usize,
}

const fn default_event_limit() -> usize {
    400
}

const fn default_min_days() -> i64 {
    1
}

const fn default_max_days() -> i64 {
    30
}

fn default_min_price() -> Decimal {
    dec!(0.85)
}

fn default_max_price() -> Decimal {
    dec!(0.99)
}

fn default_min_fill() -> Decimal {
    dec!(0.95)
}

fn default_max_slippage() -> Decimal {
    dec!(0.03)
}

const fn default_min_levels() -> usize {
    3
}

fn default_max_top_gap() -> Decimal {
    dec!(0.05)
}

fn default_capital() -> Decimal {
    dec!(2000)
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect()
}

const fn default_cache_ttl_secs() -> u64 {
    60
}

const fn default_max_labels() -> usize {
    3
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            event_limit: default_event_limit(),
            min_days: default_min_days(),
            max_days: default_max_days(),
            min_price: default_min_price(),
            max_price: default_max_price(),
            min_fill: default_min_fill(),
            max_slippage: default_max_slippage(),
            min_levels: default_min_levels(),
            max_top_gap: default_max_top_gap(),
            default_capital: default_capital(),
            default_excludes: default_excludes(),
            cache_ttl_secs: default_cache_ttl_secs(),
            max_labels: default_max_labels(),
        }
    }
}

impl ScannerConfig {
    /// Rules handed to the extractor and ranking engine.
    #[must_use]
    pub fn rules(&self) -> ScanRules {
        ScanRules {
            min_price: self.min_price,
            max_price: self.max_price,
            min_days: self.min_days,
            max_days: self.max_days,
            min_fill: self.min_fill,
            max_slippage: self.max_slippage,
            max_labels: self.max_labels,
            simulator: FillSimulator {
                min_levels: self.min_levels,
                max_top_gap: self.max_top_gap,
            },
        }
    }
}
