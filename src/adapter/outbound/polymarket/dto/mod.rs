//! Polymarket data transfer objects.
//!
//! - Gamma API responses (events, tags, markets)
//! - CLOB API order-book batch requests and responses

pub mod response;
