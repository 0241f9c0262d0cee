//! Per-scan inputs and the rules a scan applies.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::DomainError;
use super::fill::FillSimulator;

/// Smallest supported bet size in USD.
pub const MIN_CAPITAL: Decimal = dec!(500);
/// Largest supported bet size in USD.
pub const MAX_CAPITAL: Decimal = dec!(50000);

/// Caller-supplied parameters of one scan.
///
/// Excluded terms match category labels as case-insensitive substrings, so
/// excluding `sport` also drops `Sports News`. This over-matches on purpose
/// and is a known source of false positives (`art` matches `Smart Contracts`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScanConfig {
    capital: Decimal,
    /// Lowercased, trimmed, non-blank exclusion terms.
    excluded: Vec<String>,
}

impl ScanConfig {
    /// Validate and build a scan configuration.
    ///
    /// Blank exclusion terms are dropped since an empty substring would
    /// match every label.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CapitalOutOfRange`] when `capital` is outside
    /// [`MIN_CAPITAL`]..=[`MAX_CAPITAL`].
    pub fn try_new<I, S>(capital: Decimal, excluded: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if capital < MIN_CAPITAL || capital > MAX_CAPITAL {
            return Err(DomainError::CapitalOutOfRange {
                capital,
                min: MIN_CAPITAL,
                max: MAX_CAPITAL,
            });
        }

        let mut terms: Vec<String> = excluded
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        terms.sort();
        terms.dedup();

        Ok(Self {
            capital,
            excluded: terms,
        })
    }

    #[must_use]
    pub const fn capital(&self) -> Decimal {
        self.capital
    }

    /// Normalized exclusion terms, sorted and deduplicated.
    #[must_use]
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// First `(label, term)` pair where the label contains an excluded term.
    #[must_use]
    pub fn exclusion_match<'a>(&'a self, labels: &'a [String]) -> Option<(&'a str, &'a str)> {
        labels.iter().find_map(|label| {
            let lowered = label.to_lowercase();
            self.excluded
                .iter()
                .find(|term| lowered.contains(term.as_str()))
                .map(|term| (label.as_str(), term.as_str()))
        })
    }
}

/// Thresholds applied by the extractor and the ranking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRules {
    /// Lowest quoted or simulated price considered.
    pub min_price: Decimal,
    /// Highest quoted or simulated price considered.
    pub max_price: Decimal,
    /// Earliest resolution, in days from now.
    pub min_days: i64,
    /// Latest resolution, in days from now.
    pub max_days: i64,
    /// Fraction of capital that must be deployable.
    pub min_fill: Decimal,
    /// Largest tolerated gap between average entry and best ask.
    pub max_slippage: Decimal,
    /// Category labels kept on each candidate.
    pub max_labels: usize,
    pub simulator: FillSimulator,
}

impl ScanRules {
    /// True when `price` lies inside the target band (inclusive).
    #[must_use]
    pub fn in_band(&self, price: Decimal) -> bool {
        price >= self.min_price && price <= self.max_price
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvertedBand`] when a lower bound exceeds its
    /// upper bound.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_price > self.max_price {
            return Err(DomainError::InvertedBand {
                name: "price",
                low: self.min_price,
                high: self.max_price,
            });
        }
        if self.min_days > self.max_days {
            return Err(DomainError::InvertedBand {
                name: "resolution window",
                low: Decimal::from(self.min_days),
                high: Decimal::from(self.max_days),
            });
        }
        Ok(())
    }
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            min_price: dec!(0.85),
            max_price: dec!(0.99),
            min_days: 1,
            max_days: 30,
            min_fill: dec!(0.95),
            max_slippage: dec!(0.03),
            max_labels: 3,
            simulator: FillSimulator::default(),
        }
    }
}
