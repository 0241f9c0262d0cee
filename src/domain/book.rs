//! Order book snapshot types.
//!
//! - [`PriceLevel`] - A single price level with size
//! - [`Book`] - Ask side of the order book for a single token
//!
//! Books are point-in-time snapshots fetched once per scan. Only the ask
//! side is kept since the scanner only ever simulates buying.
//!
//! # Examples
//!
//! ```
//! use mispriced::domain::book::{Book, PriceLevel};
//! use mispriced::domain::id::TokenId;
//! use rust_decimal_macros::dec;
//!
//! let book = Book::new(
//!     TokenId::new("yes-token"),
//!     vec![
//!         PriceLevel::new(dec!(0.93), dec!(300)),
//!         PriceLevel::new(dec!(0.92), dec!(150)),
//!     ],
//! );
//!
//! assert_eq!(book.best_ask().unwrap().price(), dec!(0.92));
//! ```

use rust_decimal::Decimal;

use super::id::TokenId;
use super::money::{Price, Volume};

/// A single price level in an order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    price: Price,
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the number of shares offered at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// Notional value of the level (`price * size`), or `None` when the
    /// product does not fit in a [`Decimal`].
    #[must_use]
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.size)
    }

    /// Both price and size are strictly positive.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.price > Decimal::ZERO && self.size > Decimal::ZERO
    }
}

/// Ask side of the order book for one token.
///
/// Levels are kept sorted by price ascending regardless of the order the
/// exchange returned them in.
#[derive(Debug, Clone)]
pub struct Book {
    token_id: TokenId,
    asks: Vec<PriceLevel>,
}

impl Book {
    /// Creates a book, sorting the ask levels by price ascending.
    #[must_use]
    pub fn new(token_id: TokenId, mut asks: Vec<PriceLevel>) -> Self {
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { token_id, asks }
    }

    /// Returns the token ID for this book.
    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Returns all ask levels (sorted by price ascending).
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Returns the best ask (lowest sell price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}
