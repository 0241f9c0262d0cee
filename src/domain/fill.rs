//! Market-buy fill simulation against an ask ladder.
//!
//! Walking the book answers the question the quoted price cannot: what does
//! it actually cost to put the whole bet on? The simulator spends capital
//! from the best ask upward and reports the average entry, the slippage
//! over the best ask, how much of the capital could be placed, and the total
//! notional depth of the book.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::book::PriceLevel;

/// Decimal places kept on simulated ratios and prices.
const RATIO_DP: u32 = 10;

/// Result of simulating a market buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fill {
    /// Fraction of capital that found liquidity (0..=1).
    pub fill_pct: Decimal,
    /// Average price paid per share.
    pub avg_entry: Decimal,
    /// `avg_entry - best ask`.
    pub slippage: Decimal,
    /// Total notional across all well-formed ask levels.
    pub max_liquidity: Decimal,
    /// Book too shallow or too wide to trade.
    pub thin_book: bool,
}

impl Fill {
    fn thin_book() -> Self {
        Self {
            thin_book: true,
            ..Self::default()
        }
    }

    /// True when any shares were acquired.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.fill_pct > Decimal::ZERO
    }
}

/// Simulates market buys with a thin-book guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillSimulator {
    /// Fewer ask levels than this trips the thin-book guard.
    pub min_levels: usize,
    /// A gap between the two best asks above this trips the guard.
    pub max_top_gap: Decimal,
}

impl Default for FillSimulator {
    fn default() -> Self {
        Self {
            min_levels: 3,
            max_top_gap: dec!(0.05),
        }
    }
}

impl FillSimulator {
    /// Simulate spending `capital` against `asks`.
    ///
    /// Levels are sorted by price first, so callers may pass them in any
    /// order. Levels with a non-positive price or size, or a notional too
    /// large to represent, are skipped while walking, but still count toward
    /// the thin-book level check. Arithmetic never panics on exchange data.
    #[must_use]
    pub fn simulate(&self, asks: &[PriceLevel], capital: Decimal) -> Fill {
        if asks.is_empty() || capital <= Decimal::ZERO {
            return Fill::default();
        }

        let mut levels = asks.to_vec();
        levels.sort_by(|a, b| a.price().cmp(&b.price()));

        if levels.len() < self.min_levels.max(2) {
            return Fill::thin_book();
        }

        let best_price = levels[0].price();
        match levels[1].price().checked_sub(best_price) {
            Some(gap) if gap <= self.max_top_gap => {}
            _ => return Fill::thin_book(),
        }

        let mut spent = Decimal::ZERO;
        let mut shares = Decimal::ZERO;
        let mut max_liquidity = Decimal::ZERO;

        for level in levels.iter().filter(|level| level.is_well_formed()) {
            let Some(notional) = level.notional() else {
                continue;
            };
            max_liquidity = max_liquidity.saturating_add(notional);

            let remaining = capital - spent;
            if remaining <= Decimal::ZERO {
                continue;
            }

            let (bought, cost) = if notional >= remaining {
                match remaining.checked_div(level.price()) {
                    Some(bought) => (bought, remaining),
                    None => continue,
                }
            } else {
                (level.size(), notional)
            };
            if let (Some(next_shares), Some(next_spent)) =
                (shares.checked_add(bought), spent.checked_add(cost))
            {
                shares = next_shares;
                spent = next_spent;
            }
        }

        let avg_entry = match spent.checked_div(shares) {
            Some(avg) if shares > Decimal::ZERO => avg.round_dp(RATIO_DP),
            _ => {
                return Fill {
                    max_liquidity,
                    ..Fill::default()
                }
            }
        };
        Fill {
            fill_pct: (spent / capital).round_dp(RATIO_DP),
            avg_entry,
            slippage: avg_entry.saturating_sub(best_price),
            max_liquidity,
            thin_book: false,
        }
    }
}
