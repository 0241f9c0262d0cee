use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use mispriced::domain::{Book, PriceLevel, TokenId};

pub fn book(token_id: &str, asks: &[(Decimal, Decimal)]) -> Book {
    Book::new(
        TokenId::from(token_id),
        asks.iter()
            .map(|(price, size)| PriceLevel::new(*price, *size))
            .collect(),
    )
}

/// Three tight levels, each deep enough to fill any supported capital.
pub fn deep_book(token_id: &str, best: Decimal) -> Book {
    book(
        token_id,
        &[
            (best, dec!(100000)),
            (best + dec!(0.01), dec!(100000)),
            (best + dec!(0.02), dec!(100000)),
        ],
    )
}
