//! Scan candidates and ranked results.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::fill::Fill;
use super::id::TokenId;
use super::money::{Price, Volume};

/// One tradable outcome picked out of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub token_id: TokenId,
    pub title: String,
    pub description: String,
    /// First few category labels of the parent event, for display.
    pub categories: Vec<String>,
    /// Outcome name, e.g. "Yes".
    pub outcome: String,
    /// Quoted outcome price from the catalog.
    pub quoted_price: Price,
    /// Whole days until resolution.
    pub days_left: i64,
    /// Short resolution date, e.g. "Jan 12".
    pub end_label: String,
    pub slug: String,
    pub volume: Volume,
    /// End date exactly as the catalog reported it.
    pub end_date: String,
}

/// A candidate that survived simulation and every ranking gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Simulated average entry price.
    pub entry_price: Price,
    pub slippage: Decimal,
    pub roi_pct: Decimal,
    /// Profit in USD if the outcome resolves at 1.0.
    pub profit: Decimal,
    /// Total notional depth of the ask side.
    pub max_liquidity: Decimal,
}

impl RankedResult {
    /// Enrich a candidate with a simulated fill.
    ///
    /// The fill must have a positive average entry.
    #[must_use]
    pub fn new(candidate: Candidate, fill: &Fill, capital: Decimal) -> Self {
        let entry = fill.avg_entry;
        Self {
            candidate,
            entry_price: entry,
            slippage: fill.slippage,
            roi_pct: (Decimal::ONE - entry) / entry * dec!(100),
            profit: capital / entry - capital,
            max_liquidity: fill.max_liquidity,
        }
    }

    /// Ranking order: higher ROI first, then deeper books.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .roi_pct
            .cmp(&self.roi_pct)
            .then_with(|| other.max_liquidity.cmp(&self.max_liquidity))
    }

    /// Entry price as an implied probability in percent.
    #[must_use]
    pub fn implied_probability_pct(&self) -> Decimal {
        self.entry_price * dec!(100)
    }

    /// Public page of the parent event.
    #[must_use]
    pub fn market_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.candidate.slug)
    }

    /// Book depth relative to the bet: `Deep` beyond three times capital.
    #[must_use]
    pub fn depth_label(&self, capital: Decimal) -> &'static str {
        if capital > Decimal::ZERO && self.max_liquidity / capital > dec!(3) {
            "Deep"
        } else {
            "Moderate"
        }
    }
}
