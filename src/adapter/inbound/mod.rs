//! Inbound adapters: the ways an operator drives the scanner.

pub mod cli;
