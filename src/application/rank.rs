//! Ranking engine.
//!
//! Runs the fill simulator for every candidate against its book, drops the
//! ones that cannot take the bet cleanly, and orders the survivors.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{
    book::Book,
    candidate::{Candidate, RankedResult},
    id::TokenId,
    scan::ScanRules,
    skip::Rejection,
};

/// Ranked survivors plus every rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    /// Sorted by ROI descending, then max liquidity descending.
    pub results: Vec<RankedResult>,
    pub rejected: Vec<(TokenId, Rejection)>,
}

/// Gates and orders simulated candidates.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    rules: ScanRules,
}

impl Ranker {
    #[must_use]
    pub const fn new(rules: ScanRules) -> Self {
        Self { rules }
    }

    /// Simulate, gate and sort.
    ///
    /// Ties keep candidate order.
    #[must_use]
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        books: &HashMap<TokenId, Book>,
        capital: Decimal,
    ) -> Ranking {
        let mut ranking = Ranking::default();

        for candidate in candidates {
            match self.evaluate(&candidate, books, capital) {
                Ok(fill) => ranking
                    .results
                    .push(RankedResult::new(candidate, &fill, capital)),
                Err(rejection) => {
                    debug!(
                        token_id = %candidate.token_id,
                        title = %candidate.title,
                        reason = %rejection,
                        "Rejected candidate"
                    );
                    ranking.rejected.push((candidate.token_id, rejection));
                }
            }
        }

        ranking.results.sort_by(RankedResult::rank_cmp);
        ranking
    }

    fn evaluate(
        &self,
        candidate: &Candidate,
        books: &HashMap<TokenId, Book>,
        capital: Decimal,
    ) -> Result<crate::domain::fill::Fill, Rejection> {
        let book = books
            .get(&candidate.token_id)
            .ok_or(Rejection::MissingBook)?;

        let fill = self.rules.simulator.simulate(book.asks(), capital);
        if fill.thin_book {
            return Err(Rejection::ThinBook);
        }
        if fill.fill_pct < self.rules.min_fill {
            return Err(Rejection::Underfilled {
                fill_pct: fill.fill_pct,
            });
        }
        if fill.slippage > self.rules.max_slippage {
            return Err(Rejection::ExcessSlippage {
                slippage: fill.slippage,
                max: self.rules.max_slippage,
            });
        }
        if !self.rules.in_band(fill.avg_entry) {
            return Err(Rejection::EntryOutOfBand {
                entry: fill.avg_entry,
            });
        }
        Ok(fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::PriceLevel;
    use rust_decimal_macros::dec;

    fn candidate(token: &str) -> Candidate {
        Candidate {
            token_id: TokenId::new(token),
            title: format!("Event {token}"),
            description: String::new(),
            categories: vec![],
            outcome: "Yes".into(),
            quoted_price: dec!(0.90),
            days_left: 5,
            end_label: "Mar 06".into(),
            slug: token.into(),
            volume: dec!(1000),
            end_date: "2026-03-06T00:00:00Z".into(),
        }
    }

    fn book(token: &str, levels: &[(Decimal, Decimal)]) -> (TokenId, Book) {
        let id = TokenId::new(token);
        let asks = levels
            .iter()
            .map(|&(price, size)| PriceLevel::new(price, size))
            .collect();
        (id.clone(), Book::new(id, asks))
    }

    fn deep(token: &str, best: Decimal) -> (TokenId, Book) {
        book(
            token,
            &[
                (best, dec!(100000)),
                (best + dec!(0.01), dec!(100000)),
                (best + dec!(0.02), dec!(100000)),
            ],
        )
    }

    #[test]
    fn ranks_by_roi() {
        let books: HashMap<_, _> = [deep("a", dec!(0.95)), deep("b", dec!(0.88))].into();
        let ranking = Ranker::default().rank(
            vec![candidate("a"), candidate("b")],
            &books,
            dec!(2000),
        );

        let order: Vec<_> = ranking
            .results
            .iter()
            .map(|r| r.candidate.token_id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a"]);
        assert!(ranking.rejected.is_empty());
    }

    #[test]
    fn equal_roi_breaks_on_liquidity() {
        let shallow = book(
            "shallow",
            &[
                (dec!(0.90), dec!(5000)),
                (dec!(0.91), dec!(100)),
                (dec!(0.92), dec!(100)),
            ],
        );
        let books: HashMap<_, _> = [shallow, deep("deep", dec!(0.90))].into();
        let ranking = Ranker::default().rank(
            vec![candidate("shallow"), candidate("deep")],
            &books,
            dec!(2000),
        );

        assert_eq!(ranking.results[0].candidate.token_id.as_str(), "deep");
    }

    #[test]
    fn missing_book_is_rejected() {
        let ranking = Ranker::default().rank(vec![candidate("a")], &HashMap::new(), dec!(2000));
        assert_eq!(
            ranking.rejected,
            vec![(TokenId::new("a"), Rejection::MissingBook)]
        );
    }

    #[test]
    fn thin_book_is_rejected() {
        let books: HashMap<_, _> = [book("a", &[(dec!(0.90), dec!(10000))])].into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(2000));
        assert_eq!(ranking.rejected[0].1, Rejection::ThinBook);
    }

    #[test]
    fn underfilled_is_rejected() {
        let books: HashMap<_, _> = [book(
            "a",
            &[
                (dec!(0.90), dec!(100)),
                (dec!(0.91), dec!(100)),
                (dec!(0.92), dec!(100)),
            ],
        )]
        .into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(2000));
        assert!(matches!(
            ranking.rejected[0].1,
            Rejection::Underfilled { .. }
        ));
    }

    #[test]
    fn excess_slippage_is_rejected() {
        // 90 at 0.86, the rest deep at 0.91 and 0.95
        let books: HashMap<_, _> = [book(
            "a",
            &[
                (dec!(0.86), dec!(100)),
                (dec!(0.91), dec!(100)),
                (dec!(0.95), dec!(100000)),
            ],
        )]
        .into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(2000));
        assert!(matches!(
            ranking.rejected[0].1,
            Rejection::ExcessSlippage { .. }
        ));
    }

    #[test]
    fn entry_above_band_is_rejected() {
        let books: HashMap<_, _> = [deep("a", dec!(0.995))].into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(2000));
        assert!(matches!(
            ranking.rejected[0].1,
            Rejection::EntryOutOfBand { .. }
        ));
    }

    #[test]
    fn results_are_inside_gates() {
        let books: HashMap<_, _> = [
            deep("a", dec!(0.86)),
            deep("b", dec!(0.93)),
            deep("c", dec!(0.97)),
        ]
        .into();
        let rules = ScanRules::default();
        let ranking = Ranker::new(rules.clone()).rank(
            vec![candidate("a"), candidate("b"), candidate("c")],
            &books,
            dec!(50000),
        );

        for result in &ranking.results {
            assert!(rules.in_band(result.entry_price));
            assert!(result.slippage <= rules.max_slippage);
        }
        for pair in ranking.results.windows(2) {
            assert!(pair[0].roi_pct >= pair[1].roi_pct);
        }
    }

    #[test]
    fn slippage_at_limit_is_kept() {
        // 360 + 188 + 382 = 930 for exactly 1000 shares, average 0.93.
        let books: HashMap<_, _> = [book(
            "a",
            &[
                (dec!(0.90), dec!(400)),
                (dec!(0.94), dec!(200)),
                (dec!(0.955), dec!(100000)),
            ],
        )]
        .into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(930));

        assert!(ranking.rejected.is_empty(), "{:?}", ranking.rejected);
        assert_eq!(ranking.results[0].entry_price, dec!(0.93));
        assert_eq!(ranking.results[0].slippage, dec!(0.03));
    }

    #[test]
    fn fill_at_minimum_is_kept() {
        // 900 + 90 + 910 = 1900 of 2000.
        let books: HashMap<_, _> = [book(
            "a",
            &[
                (dec!(0.90), dec!(1000)),
                (dec!(0.90), dec!(100)),
                (dec!(0.91), dec!(1000)),
            ],
        )]
        .into();
        let ranking = Ranker::default().rank(vec![candidate("a")], &books, dec!(2000));

        assert!(ranking.rejected.is_empty(), "{:?}", ranking.rejected);
        assert_eq!(ranking.results.len(), 1);
    }

    #[test]
    fn entry_at_band_edges_is_kept() {
        let books: HashMap<_, _> = [deep("low", dec!(0.85)), deep("high", dec!(0.99))].into();
        let ranking = Ranker::default().rank(
            vec![candidate("low"), candidate("high")],
            &books,
            dec!(2000),
        );

        assert!(ranking.rejected.is_empty(), "{:?}", ranking.rejected);
        let entries: Vec<_> = ranking.results.iter().map(|r| r.entry_price).collect();
        assert_eq!(entries, vec![dec!(0.85), dec!(0.99)]);
    }
}
