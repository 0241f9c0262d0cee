//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases:
//!
//! - [`extract`] - catalog events to candidates
//! - [`rank`] - fill simulation, gating and ordering
//! - [`scanner`] - the end-to-end scan pipeline
//! - [`audit`] - forensic review of one result through an LLM
//! - [`cache`] and [`session`] - per-invocation memoisation

pub mod audit;
pub mod cache;
pub mod extract;
pub mod rank;
pub mod scanner;
pub mod session;

pub use audit::{AuditBrief, Auditor};
pub use extract::{Extraction, Extractor, Skip};
pub use rank::{Ranker, Ranking};
pub use scanner::{ScanReport, Scanner};
pub use session::Session;
