//! Raw catalog records: events and their markets.
//!
//! These mirror what the event catalog returns with the transport details
//! stripped off. Field decoding that can fail (encoded outcome lists, end
//! dates) is deferred to the extractor so that a bad record is skipped with
//! a reason instead of failing the whole page.

use serde_json::Value;

use super::money::Volume;
use super::skip::SkipReason;

/// A list field that may arrive as a native array or as a JSON-encoded
/// string holding that array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EncodedList {
    /// Field absent or null.
    #[default]
    Missing,
    /// Native array, items already stringified.
    Items(Vec<String>),
    /// JSON text such as `["Yes", "No"]`.
    Json(String),
}

impl EncodedList {
    /// Build from native JSON array items.
    ///
    /// Numbers are kept in their textual form so prices like `0.97` and
    /// `"0.97"` decode identically.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::Items(values.into_iter().map(value_to_string).collect())
    }

    /// Decode into a list of strings.
    ///
    /// A missing field decodes to an empty list; emptiness is checked by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::Undecodable`] when the encoded text is not a
    /// JSON array of strings or numbers.
    pub fn decode(&self, field: &'static str) -> Result<Vec<String>, SkipReason> {
        match self {
            Self::Missing => Ok(Vec::new()),
            Self::Items(items) => Ok(items.clone()),
            Self::Json(raw) => {
                let values: Vec<Value> =
                    serde_json::from_str(raw).map_err(|e| SkipReason::Undecodable {
                        field,
                        reason: e.to_string(),
                    })?;
                values
                    .into_iter()
                    .map(|value| match value {
                        Value::String(s) => Ok(s),
                        Value::Number(n) => Ok(n.to_string()),
                        other => Err(SkipReason::Undecodable {
                            field,
                            reason: format!("unexpected item {other}"),
                        }),
                    })
                    .collect()
            }
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One market inside an event.
#[derive(Debug, Clone, Default)]
pub struct Market {
    /// Market question, used for logging only.
    pub question: Option<String>,
    pub outcomes: EncodedList,
    pub prices: EncodedList,
    pub token_ids: EncodedList,
    /// All-time traded volume in USD.
    pub volume: Volume,
}

/// A catalog event grouping one or more markets.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub title: String,
    pub description: String,
    /// URL slug of the event's public page.
    pub slug: String,
    /// Raw ISO-8601 resolution timestamp.
    pub end_date: Option<String>,
    /// Category labels in catalog order.
    pub categories: Vec<String>,
    pub markets: Vec<Market>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_json_encoded_strings() {
        let list = EncodedList::Json(r#"["Yes", "No"]"#.into());
        assert_eq!(list.decode("outcomes").unwrap(), vec!["Yes", "No"]);
    }

    #[test]
    fn decode_json_encoded_numbers() {
        let list = EncodedList::Json("[0.97, 0.03]".into());
        assert_eq!(list.decode("outcomePrices").unwrap(), vec!["0.97", "0.03"]);
    }

    #[test]
    fn native_and_encoded_forms_agree() {
        let native = EncodedList::from_values(vec![json!("0.97"), json!(0.03)]);
        let encoded = EncodedList::Json(r#"["0.97", "0.03"]"#.into());
        assert_eq!(
            native.decode("outcomePrices").unwrap(),
            encoded.decode("outcomePrices").unwrap()
        );
    }

    #[test]
    fn missing_decodes_empty() {
        assert!(EncodedList::Missing.decode("outcomes").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_skip_reason() {
        let err = EncodedList::Json("[invalid".into())
            .decode("clobTokenIds")
            .unwrap_err();
        assert!(matches!(
            err,
            SkipReason::Undecodable {
                field: "clobTokenIds",
                ..
            }
        ));
    }

    #[test]
    fn nested_items_are_rejected() {
        let err = EncodedList::Json(r#"[["a"]]"#.into())
            .decode("outcomes")
            .unwrap_err();
        assert!(matches!(err, SkipReason::Undecodable { .. }));
    }
}
