//! Per-record outcomes of a scan.
//!
//! A scan never fails because one record is bad. Each event or market the
//! extractor passes over carries a [`SkipReason`], and each candidate the
//! ranking engine drops carries a [`Rejection`], so callers and tests can
//! see exactly why something did not make the list.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why an event or market produced no candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("category '{label}' matches excluded term '{term}'")]
    ExcludedCategory { label: String, term: String },

    #[error("event has no end date")]
    MissingEndDate,

    #[error("unparsable end date '{raw}'")]
    UnparsableEndDate { raw: String },

    #[error("resolves in {days} days, outside the {min_days}..={max_days} day window")]
    OutsideWindow {
        days: i64,
        min_days: i64,
        max_days: i64,
    },

    #[error("event has no markets")]
    NoMarkets,

    #[error("failed to decode {field}: {reason}")]
    Undecodable { field: &'static str, reason: String },

    #[error("{field} is empty")]
    EmptyField { field: &'static str },

    #[error("length mismatch: {outcomes} outcomes, {prices} prices, {tokens} token ids")]
    LengthMismatch {
        outcomes: usize,
        prices: usize,
        tokens: usize,
    },

    #[error("no outcome priced inside the target band")]
    NoPriceInBand,
}

/// Why a candidate was dropped by the ranking engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("no order book returned")]
    MissingBook,

    #[error("order book too thin or spread too wide")]
    ThinBook,

    #[error("only {fill_pct} of capital can be deployed")]
    Underfilled { fill_pct: Decimal },

    #[error("slippage {slippage} exceeds {max}")]
    ExcessSlippage { slippage: Decimal, max: Decimal },

    #[error("average entry {entry} is outside the target band")]
    EntryOutOfBand { entry: Decimal },
}
