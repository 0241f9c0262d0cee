//! Runtime caches used by application services.
//!
//! - [`scan::ScanCache`]: Scan reports with TTL-based expiration

pub mod scan;

pub use scan::ScanCache;
