//! Domain validation errors.
//!
//! Returned by constructors that validate caller-supplied inputs.
//!
//! ```
//! use mispriced::domain::error::DomainError;
//! use mispriced::domain::scan::ScanConfig;
//! use rust_decimal_macros::dec;
//!
//! let result = ScanConfig::try_new(dec!(100), Vec::<String>::new());
//! assert!(matches!(result, Err(DomainError::CapitalOutOfRange { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bet size must sit inside the supported range.
    #[error("capital {capital} is outside the supported range {min}..={max}")]
    CapitalOutOfRange {
        capital: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// A lower bound must not exceed its upper bound.
    #[error("invalid {name} band: {low} > {high}")]
    InvertedBand {
        name: &'static str,
        low: Decimal,
        high: Decimal,
    },
}
