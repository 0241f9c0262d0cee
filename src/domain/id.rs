//! Domain identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instrument identifier for one tradable outcome (a CLOB token id).
///
/// Ids are stored trimmed so that a token id taken from a market listing
/// and the `asset_id` echoed back by the order-book endpoint compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    /// Create a new `TokenId`, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the token ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id carries no characters after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_is_trimmed() {
        assert_eq!(TokenId::new("  123 ").as_str(), "123");
        assert_eq!(TokenId::from("123"), TokenId::new("123\n"));
    }

    #[test]
    fn blank_token_id() {
        assert!(TokenId::new("   ").is_blank());
        assert!(!TokenId::new("0x1").is_blank());
    }
}
