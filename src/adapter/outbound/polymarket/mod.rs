//! Polymarket exchange integration.
//!
//! [`client::PolymarketClient`] implements both market data ports: the
//! Gamma event catalog and the CLOB order-book batch endpoint.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::PolymarketClient;
pub use settings::PolymarketConfig;
