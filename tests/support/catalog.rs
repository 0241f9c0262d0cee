use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use mispriced::domain::{EncodedList, Event, Market};

/// Fixed clock for every scan in the integration tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap()
}

/// RFC 3339 end date `days` (plus one hour) after [`now`].
pub fn end_in(days: i64) -> String {
    (now() + Duration::days(days) + Duration::hours(1)).to_rfc3339()
}

fn list(items: &[&str]) -> EncodedList {
    EncodedList::Items(items.iter().map(ToString::to_string).collect())
}

pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            event: Event {
                title: title.to_string(),
                description: format!("Resolves YES if {title}"),
                slug: title.to_lowercase().replace(' ', "-"),
                end_date: Some(end_in(10)),
                categories: vec!["Politics".to_string()],
                markets: Vec::new(),
            },
        }
    }

    pub fn labels(mut self, labels: &[&str]) -> Self {
        self.event.categories = labels.iter().map(ToString::to_string).collect();
        self
    }

    pub fn ends_in(mut self, days: i64) -> Self {
        self.event.end_date = Some(end_in(days));
        self
    }

    /// End date relative to the wall clock, for code paths that call
    /// `Scanner::scan` rather than `scan_at`.
    pub fn ends_in_live(mut self, days: i64) -> Self {
        let end = Utc::now() + Duration::days(days) + Duration::hours(1);
        self.event.end_date = Some(end.to_rfc3339());
        self
    }

    pub fn end_date(mut self, raw: Option<&str>) -> Self {
        self.event.end_date = raw.map(ToString::to_string);
        self
    }

    pub fn market(self, outcomes: &[&str], prices: &[&str], tokens: &[&str]) -> Self {
        self.market_with_volume(outcomes, prices, tokens, dec!(25000))
    }

    pub fn market_with_volume(
        mut self,
        outcomes: &[&str],
        prices: &[&str],
        tokens: &[&str],
        volume: Decimal,
    ) -> Self {
        self.event.markets.push(Market {
            question: Some(self.event.title.clone()),
            outcomes: list(outcomes),
            prices: list(prices),
            token_ids: list(tokens),
            volume,
        });
        self
    }

    /// Market whose three lists arrive as JSON-encoded strings.
    pub fn encoded_market(mut self, outcomes: &str, prices: &str, tokens: &str) -> Self {
        self.event.markets.push(Market {
            question: Some(self.event.title.clone()),
            outcomes: EncodedList::Json(outcomes.to_string()),
            prices: EncodedList::Json(prices.to_string()),
            token_ids: EncodedList::Json(tokens.to_string()),
            volume: dec!(25000),
        });
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

/// Yes/No event with `yes_price` on the `token` outcome.
pub fn binary_event(title: &str, token: &str, yes_price: &str) -> Event {
    let no_price = (Decimal::ONE - yes_price.parse::<Decimal>().unwrap()).to_string();
    let no_token = format!("{token}-no");
    EventBuilder::new(title)
        .market(
            &["Yes", "No"],
            &[yes_price, no_price.as_str()],
            &[token, no_token.as_str()],
        )
        .build()
}

/// Like [`binary_event`] but ending ten days from the wall clock.
pub fn live_binary_event(title: &str, token: &str, yes_price: &str) -> Event {
    let mut event = binary_event(title, token, yes_price);
    event.end_date = Some((Utc::now() + Duration::days(10) + Duration::hours(1)).to_rfc3339());
    event
}
