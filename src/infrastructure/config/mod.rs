//! Infrastructure configuration modules.

pub mod llm;
pub mod logging;
pub mod scanner;
pub mod settings;

pub use settings::Config;
