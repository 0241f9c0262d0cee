//! Exchange-agnostic domain types and rules.
//!
//! Everything here is pure: no I/O, no clocks. The fill simulator and the
//! scan rules are the two pieces of business logic that live at this level;
//! extraction and ranking compose them in [`crate::application`].

pub mod book;
pub mod candidate;
pub mod error;
pub mod event;
pub mod fill;
pub mod id;
pub mod money;
pub mod scan;
pub mod skip;

pub use book::{Book, PriceLevel};
pub use candidate::{Candidate, RankedResult};
pub use event::{EncodedList, Event, Market};
pub use fill::{Fill, FillSimulator};
pub use id::TokenId;
pub use scan::{ScanConfig, ScanRules};
pub use skip::{Rejection, SkipReason};
