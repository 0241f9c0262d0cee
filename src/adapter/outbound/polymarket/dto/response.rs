//! Polymarket API request and response types.
//!
//! Two API surfaces:
//! - **Gamma API** (`gamma-api.polymarket.com`) - event catalog with nested
//!   markets. Uses [`GammaEvent`] and [`GammaMarket`].
//! - **CLOB API** (`clob.polymarket.com`) - batched order books. Uses
//!   [`BookRequest`] and [`BookEntry`].
//!
//! Gamma is loose about types: list fields show up as native arrays or as
//! JSON text, numbers as strings or numbers, and anything may be null. The
//! DTOs accept all of these and leave validation to the extractor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{
    book::{Book, PriceLevel},
    event::{EncodedList, Event, Market},
    id::TokenId,
    money::{parse_or_zero, Volume},
};

/// Convert a list field sent either natively or JSON-encoded in a string.
///
/// Any other shape is kept as text so that decoding fails later, per market.
fn encoded_list(raw: Option<Value>) -> EncodedList {
    match raw {
        None | Some(Value::Null) => EncodedList::Missing,
        Some(Value::Array(values)) => EncodedList::from_values(values),
        Some(Value::String(text)) => EncodedList::Json(text),
        Some(other) => EncodedList::Json(other.to_string()),
    }
}

/// Event from the Gamma `/events` endpoint.
///
/// Response format: flat JSON array (no wrapper object).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEvent {
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub slug: String,
    /// ISO-8601 resolution timestamp.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub tags: Vec<GammaTag>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub markets: Vec<GammaMarket>,
}

/// Category tag attached to an event.
///
/// Only string labels are used; other shapes are ignored rather than
/// failing the whole event.
#[derive(Debug, Deserialize)]
pub struct GammaTag {
    #[serde(default)]
    pub label: Option<Value>,
}

impl GammaTag {
    /// The label when it is a non-blank string.
    #[must_use]
    pub fn into_label(self) -> Option<String> {
        match self.label? {
            Value::String(label) if !label.trim().is_empty() => Some(label),
            _ => None,
        }
    }
}

/// Market nested inside a Gamma event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub question: Option<String>,
    /// Outcome names (e.g., `["Yes", "No"]`).
    #[serde(default)]
    pub outcomes: Option<Value>,
    /// Outcome prices (e.g., `["0.65", "0.35"]`).
    #[serde(default)]
    pub outcome_prices: Option<Value>,
    /// CLOB token ids, parallel to `outcomes`.
    #[serde(default)]
    pub clob_token_ids: Option<Value>,
    /// All-time volume in USD, as a string or a number.
    #[serde(default)]
    pub volume: Option<Value>,
}

impl From<GammaMarket> for Market {
    fn from(m: GammaMarket) -> Self {
        Self {
            question: m.question,
            outcomes: encoded_list(m.outcomes),
            prices: encoded_list(m.outcome_prices),
            token_ids: encoded_list(m.clob_token_ids),
            volume: m.volume.as_ref().map(decimal_or_zero).unwrap_or_default(),
        }
    }
}

impl From<GammaEvent> for Event {
    fn from(e: GammaEvent) -> Self {
        Self {
            title: e.title,
            description: e.description,
            slug: e.slug,
            end_date: e.end_date,
            categories: e
                .tags
                .into_iter()
                .filter_map(GammaTag::into_label)
                .collect(),
            markets: e.markets.into_iter().map(Market::from).collect(),
        }
    }
}

/// One entry of the CLOB `/books` batch request body.
#[derive(Debug, Serialize)]
pub struct BookRequest<'a> {
    pub token_id: &'a str,
}

/// One book from the CLOB `/books` batch response.
#[derive(Debug, Deserialize)]
pub struct BookEntry {
    #[serde(default)]
    pub asset_id: Option<Value>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub asks: Vec<BookLevel>,
}

/// Price level as returned by the CLOB (strings or numbers).
#[derive(Debug, Deserialize)]
pub struct BookLevel {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub size: Option<Value>,
}

impl BookEntry {
    /// Token id the exchange echoed back, if any.
    #[must_use]
    pub fn token_id(&self) -> Option<TokenId> {
        let id = match self.asset_id.as_ref()? {
            Value::String(s) => TokenId::new(s.as_str()),
            Value::Number(n) => TokenId::new(n.to_string()),
            _ => return None,
        };
        (!id.is_blank()).then_some(id)
    }

    /// Convert into a domain book; unparsable numbers become zero.
    #[must_use]
    pub fn into_book(self, token_id: TokenId) -> Book {
        let asks = self
            .asks
            .iter()
            .map(|level| {
                PriceLevel::new(
                    level.price.as_ref().map(decimal_or_zero).unwrap_or_default(),
                    level.size.as_ref().map(decimal_or_zero).unwrap_or_default(),
                )
            })
            .collect();
        Book::new(token_id, asks)
    }
}

fn decimal_or_zero(value: &Value) -> Volume {
    match value {
        Value::String(s) => parse_or_zero(s),
        Value::Number(n) => parse_or_zero(&n.to_string()),
        _ => Volume::ZERO,
    }
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn event_with_encoded_lists() {
        let json = r#"{
            "id": "123",
            "title": "Fed decision in March?",
            "description": "Resolves per the FOMC statement.",
            "slug": "fed-decision-in-march",
            "endDate": "2026-03-18T00:00:00Z",
            "tags": [{"id": "1", "label": "Economy"}, {"label": null}, {"label": "Fed"}],
            "markets": [{
                "question": "No change?",
                "outcomes": "[\"Yes\", \"No\"]",
                "outcomePrices": "[\"0.93\", \"0.07\"]",
                "clobTokenIds": "[\"111\", \"222\"]",
                "volume": "1523401.77"
            }]
        }"#;

        let event = Event::from(serde_json::from_str::<GammaEvent>(json).unwrap());

        assert_eq!(event.title, "Fed decision in March?");
        assert_eq!(event.categories, vec!["Economy", "Fed"]);
        assert_eq!(event.end_date.as_deref(), Some("2026-03-18T00:00:00Z"));
        let market = &event.markets[0];
        assert_eq!(market.volume, dec!(1523401.77));
        assert_eq!(market.prices.decode("outcomePrices").unwrap(), vec!["0.93", "0.07"]);
        assert_eq!(market.token_ids.decode("clobTokenIds").unwrap(), vec!["111", "222"]);
    }

    #[test]
    fn event_with_native_lists_and_numeric_volume() {
        let json = r#"{
            "title": "T",
            "markets": [{
                "outcomes": ["Yes", "No"],
                "outcomePrices": [0.9, 0.1],
                "clobTokenIds": ["a", "b"],
                "volume": 42.5
            }]
        }"#;

        let event = Event::from(serde_json::from_str::<GammaEvent>(json).unwrap());
        let market = &event.markets[0];

        assert_eq!(market.outcomes.decode("outcomes").unwrap(), vec!["Yes", "No"]);
        assert_eq!(market.prices.decode("outcomePrices").unwrap(), vec!["0.9", "0.1"]);
        assert_eq!(market.volume, dec!(42.5));
        assert!(event.end_date.is_none());
        assert!(event.categories.is_empty());
    }

    #[test]
    fn nulls_and_garbage_degrade() {
        let json = r#"{
            "title": null,
            "tags": null,
            "markets": [{"volume": "n/a", "outcomes": null}]
        }"#;

        let event = Event::from(serde_json::from_str::<GammaEvent>(json).unwrap());

        assert_eq!(event.title, "");
        assert_eq!(event.markets[0].volume, Volume::ZERO);
        assert_eq!(event.markets[0].outcomes, EncodedList::Missing);
    }

    #[test]
    fn unexpected_list_shape_fails_on_decode() {
        let json = r#"{"markets": [{"outcomes": 7}]}"#;
        let event = Event::from(serde_json::from_str::<GammaEvent>(json).unwrap());
        assert!(event.markets[0].outcomes.decode("outcomes").is_err());
    }

    #[test]
    fn book_entry_parses_string_levels() {
        let json = r#"{
            "market": "0xabc",
            "asset_id": "111",
            "bids": [{"price": "0.90", "size": "10"}],
            "asks": [
                {"price": "0.95", "size": "100"},
                {"price": "0.93", "size": "250.5"},
                {"price": "bad", "size": "1"}
            ]
        }"#;

        let entry: BookEntry = serde_json::from_str(json).unwrap();
        let id = entry.token_id().unwrap();
        let book = entry.into_book(id);

        assert_eq!(book.token_id().as_str(), "111");
        let prices: Vec<_> = book.asks().iter().map(PriceLevel::price).collect();
        assert_eq!(prices, vec![dec!(0), dec!(0.93), dec!(0.95)]);
        assert_eq!(book.asks()[1].size(), dec!(250.5));
    }

    #[test]
    fn book_entry_without_asset_id() {
        let entry: BookEntry = serde_json::from_str(r#"{"asks": []}"#).unwrap();
        assert!(entry.token_id().is_none());

        let blank: BookEntry = serde_json::from_str(r#"{"asset_id": "  "}"#).unwrap();
        assert!(blank.token_id().is_none());
    }

    #[test]
    fn book_request_shape() {
        let body = vec![BookRequest { token_id: "1" }, BookRequest { token_id: "2" }];
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"[{"token_id":"1"},{"token_id":"2"}]"#
        );
    }

    #[test]
    fn non_string_tag_labels_are_ignored() {
        let json = r#"{
            "title": "T",
            "tags": [{"label": 42}, {"label": "Weather"}, {"label": {"en": "x"}}, {}]
        }"#;

        let event = Event::from(serde_json::from_str::<GammaEvent>(json).unwrap());
        assert_eq!(event.categories, vec!["Weather"]);
    }

    #[test]
    fn oversized_book_sizes_simulate_without_panicking() {
        use crate::domain::fill::FillSimulator;

        let json = r#"{
            "asset_id": "t",
            "asks": [
                {"price": "0.90", "size": "70000000000000000000000000000"},
                {"price": "0.91", "size": "70000000000000000000000000000"},
                {"price": "0.92", "size": "70000000000000000000000000000"}
            ]
        }"#;

        let entry: BookEntry = serde_json::from_str(json).unwrap();
        let id = entry.token_id().unwrap();
        let book = entry.into_book(id);
        let fill = FillSimulator::default().simulate(book.asks(), dec!(2000));

        assert!(!fill.thin_book);
        assert_eq!(fill.fill_pct, Decimal::ONE);
        assert!(fill.max_liquidity > dec!(1000000));
    }
}
