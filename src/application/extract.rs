//! Candidate filter and extractor.
//!
//! Walks raw catalog events and picks at most one tradable outcome per
//! market: the first outcome, in listing order, whose quoted price sits in
//! the target band. Events are filtered on category and resolution date
//! before their markets are looked at.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::domain::{
    candidate::Candidate,
    event::{Event, Market},
    id::TokenId,
    money::{parse_decimal, parse_or_zero},
    scan::{ScanConfig, ScanRules},
    skip::SkipReason,
};

/// An event or market that produced no candidate, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    /// Title of the event the record belongs to.
    pub event: String,
    /// Market question when the skip concerns a single market.
    pub market: Option<String>,
    pub reason: SkipReason,
}

/// Output of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<Candidate>,
    /// Every category label seen, filtered or not.
    pub categories: BTreeSet<String>,
    pub skipped: Vec<Skip>,
}

impl Extraction {
    /// Token ids of all candidates, in candidate order.
    #[must_use]
    pub fn token_ids(&self) -> Vec<TokenId> {
        self.candidates.iter().map(|c| c.token_id.clone()).collect()
    }
}

/// Market fields resolved for the chosen outcome.
struct Pick {
    token_id: TokenId,
    outcome: String,
    price: rust_decimal::Decimal,
}

/// Applies category, date and price rules to catalog events.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    rules: ScanRules,
}

impl Extractor {
    #[must_use]
    pub const fn new(rules: ScanRules) -> Self {
        Self { rules }
    }

    /// Extract candidates from `events` as of `now`.
    ///
    /// Holds no state between calls; the same input always yields the same
    /// output.
    #[must_use]
    pub fn extract(&self, events: &[Event], config: &ScanConfig, now: DateTime<Utc>) -> Extraction {
        let mut extraction = Extraction::default();

        for event in events {
            extraction.categories.extend(
                event
                    .categories
                    .iter()
                    .map(|label| label.trim())
                    .filter(|label| !label.is_empty())
                    .map(ToOwned::to_owned),
            );

            let end = match self.check_event(event, config, now) {
                Ok(end) => end,
                Err(reason) => {
                    debug!(event = %event.title, reason = %reason, "Skipping event");
                    extraction.skipped.push(Skip {
                        event: event.title.clone(),
                        market: None,
                        reason,
                    });
                    continue;
                }
            };

            let days_left = (end - now).num_days();
            let end_label = end.format("%b %d").to_string();
            let categories: Vec<String> = event
                .categories
                .iter()
                .take(self.rules.max_labels)
                .cloned()
                .collect();

            for market in &event.markets {
                match self.pick_outcome(market) {
                    Ok(pick) => extraction.candidates.push(Candidate {
                        token_id: pick.token_id,
                        title: event.title.clone(),
                        description: event.description.clone(),
                        categories: categories.clone(),
                        outcome: pick.outcome,
                        quoted_price: pick.price,
                        days_left,
                        end_label: end_label.clone(),
                        slug: event.slug.clone(),
                        volume: market.volume,
                        end_date: event.end_date.clone().unwrap_or_default(),
                    }),
                    Err(reason) => {
                        debug!(
                            event = %event.title,
                            market = market.question.as_deref().unwrap_or(""),
                            reason = %reason,
                            "Skipping market"
                        );
                        extraction.skipped.push(Skip {
                            event: event.title.clone(),
                            market: market.question.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        debug!(
            events = events.len(),
            candidates = extraction.candidates.len(),
            skipped = extraction.skipped.len(),
            "Extraction complete"
        );
        extraction
    }

    /// Event-level gates; returns the parsed resolution time.
    fn check_event(
        &self,
        event: &Event,
        config: &ScanConfig,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SkipReason> {
        if let Some((label, term)) = config.exclusion_match(&event.categories) {
            return Err(SkipReason::ExcludedCategory {
                label: label.to_string(),
                term: term.to_string(),
            });
        }

        let raw = event
            .end_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(SkipReason::MissingEndDate)?;
        let end = parse_end_date(raw).ok_or_else(|| SkipReason::UnparsableEndDate {
            raw: raw.to_string(),
        })?;

        let earliest = now + Duration::days(self.rules.min_days);
        let latest = now + Duration::days(self.rules.max_days);
        if end < earliest || end > latest {
            return Err(SkipReason::OutsideWindow {
                days: (end - now).num_days(),
                min_days: self.rules.min_days,
                max_days: self.rules.max_days,
            });
        }

        if event.markets.is_empty() {
            return Err(SkipReason::NoMarkets);
        }

        Ok(end)
    }

    /// Decode a market's parallel lists and pick the first in-band outcome.
    fn pick_outcome(&self, market: &Market) -> Result<Pick, SkipReason> {
        let outcomes = market.outcomes.decode("outcomes")?;
        let prices = market.prices.decode("outcomePrices")?;
        let token_ids = market.token_ids.decode("clobTokenIds")?;

        for (field, len) in [
            ("outcomes", outcomes.len()),
            ("outcomePrices", prices.len()),
            ("clobTokenIds", token_ids.len()),
        ] {
            if len == 0 {
                return Err(SkipReason::EmptyField { field });
            }
        }
        if outcomes.len() != prices.len() || prices.len() != token_ids.len() {
            return Err(SkipReason::LengthMismatch {
                outcomes: outcomes.len(),
                prices: prices.len(),
                tokens: token_ids.len(),
            });
        }

        let index = prices
            .iter()
            .position(|raw| parse_decimal(raw).is_some_and(|price| self.rules.in_band(price)))
            .ok_or(SkipReason::NoPriceInBand)?;

        Ok(Pick {
            token_id: TokenId::new(token_ids[index].as_str()),
            outcome: outcomes[index].clone(),
            price: parse_or_zero(&prices[index]),
        })
    }
}

/// Parse a catalog timestamp.
///
/// Accepts RFC 3339 (with `Z` or an offset). Naive timestamps and bare
/// dates are read as UTC.
#[must_use]
pub fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
