//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - the `mispriced` command line
//! - [`outbound`] - Polymarket REST and OpenAI clients

pub mod inbound;
pub mod outbound;
