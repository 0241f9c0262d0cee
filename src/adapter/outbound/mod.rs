//! Outbound adapters (driven side).

pub mod llm;
pub mod polymarket;
