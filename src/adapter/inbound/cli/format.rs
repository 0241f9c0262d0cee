//! Human formatting for prices, money and result rows.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{json, Value};
use tabled::Tabled;

use crate::domain::candidate::RankedResult;

/// Price in cents with one decimal, e.g. `95.2¢`.
#[must_use]
pub fn cents(price: Decimal) -> String {
    format!("{:.1}¢", (price * Decimal::ONE_HUNDRED).round_dp(1))
}

/// Whole dollars with thousands separators, e.g. `$12,345`.
#[must_use]
pub fn usd(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Percentage with two decimals and an explicit sign, e.g. `+5.26%`.
#[must_use]
pub fn signed_pct(value: Decimal) -> String {
    let value = value.round_dp(2);
    if value.is_sign_negative() {
        format!("{value:.2}%")
    } else {
        format!("+{value:.2}%")
    }
}

/// Fraction rendered as a percentage, e.g. `0.0123` as `1.23%`.
#[must_use]
pub fn fraction_pct(value: Decimal) -> String {
    format!("{:.2}%", (value * Decimal::ONE_HUNDRED).round_dp(2))
}

#[derive(Tabled)]
pub struct ResultRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Market")]
    pub title: String,
    #[tabled(rename = "Outcome")]
    pub outcome: String,
    #[tabled(rename = "Entry")]
    pub entry: String,
    #[tabled(rename = "ROI")]
    pub roi: String,
    #[tabled(rename = "Profit")]
    pub profit: String,
    #[tabled(rename = "Volume")]
    pub volume: String,
    #[tabled(rename = "Depth")]
    pub depth: &'static str,
    #[tabled(rename = "Ends")]
    pub ends: String,
}

const TITLE_WIDTH: usize = 48;

impl ResultRow {
    #[must_use]
    pub fn new(rank: usize, result: &RankedResult, capital: Decimal) -> Self {
        Self {
            rank,
            title: truncate(&result.candidate.title, TITLE_WIDTH),
            outcome: result.candidate.outcome.to_uppercase(),
            entry: cents(result.entry_price),
            roi: signed_pct(result.roi_pct),
            profit: usd(result.profit),
            volume: usd(result.candidate.volume),
            depth: result.depth_label(capital),
            ends: result.candidate.end_label.clone(),
        }
    }
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Machine-readable view of one result.
#[must_use]
pub fn result_json(rank: usize, result: &RankedResult, capital: Decimal, market_base: &str) -> Value {
    json!({
        "rank": rank,
        "token_id": result.candidate.token_id,
        "title": result.candidate.title,
        "outcome": result.candidate.outcome,
        "categories": result.candidate.categories,
        "quoted_price": result.candidate.quoted_price,
        "entry_price": result.entry_price,
        "slippage": result.slippage,
        "roi_pct": result.roi_pct.round_dp(4),
        "profit": result.profit.round_dp(2),
        "max_liquidity": result.max_liquidity,
        "depth": result.depth_label(capital),
        "volume": result.candidate.volume,
        "days_left": result.candidate.days_left,
        "end_date": result.candidate.end_date,
        "url": result.market_url(market_base),
    })
}
