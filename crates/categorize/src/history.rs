use budgie_core::{CategorizedTransaction, PendingTransaction};
use rust_decimal::Decimal;

use crate::similarity::similarity;

/// Keep candidates whose amount is within ±20% of the target. Coarse
/// pre-filter only — never a match signal on its own.
///
/// The window is computed in `Decimal` so cent boundaries are exact, and the
/// two scaled bounds are re-ordered because scaling a negative target flips
/// them (target -10000 → [-12000, -8000]).
pub fn filter_by_amount(
    target_cents: i64,
    pool: &[CategorizedTransaction],
) -> Vec<&CategorizedTransaction> {
    let target = Decimal::from(target_cents);
    let low_scale = Decimal::new(8, 1); // 0.8
    let high_scale = Decimal::new(12, 1); // 1.2

    let a = target * low_scale;
    let b = target * high_scale;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    pool.iter()
        .filter(|c| {
            let amount = Decimal::from(c.amount_cents);
            lo <= amount && amount <= hi
        })
        .collect()
}

/// A history candidate that cleared the acceptance threshold.
#[derive(Debug, Clone)]
pub struct HistoryMatch<'a> {
    pub candidate: &'a CategorizedTransaction,
    pub score: f64,
}

/// Fuzzy-searches a user's categorization history for the closest previous
/// transaction.
pub struct HistoryMatcher {
    /// Minimum score a candidate must reach to be returned at all.
    pub accept_threshold: f64,
    /// Score at which the scan stops immediately — a near-perfect hit is
    /// taken over a possibly-perfect one later in the list.
    pub short_circuit_threshold: f64,
}

impl Default for HistoryMatcher {
    fn default() -> Self {
        Self {
            accept_threshold: 0.7,
            short_circuit_threshold: 0.95,
        }
    }
}

impl HistoryMatcher {
    pub fn new(accept_threshold: f64, short_circuit_threshold: f64) -> Self {
        Self {
            accept_threshold,
            short_circuit_threshold,
        }
    }

    /// Find the best history match for `target`, or `None` if nothing scores
    /// at least `accept_threshold`.
    ///
    /// The pool must be ordered most-recent-first (the LOAD contract); the
    /// scan preserves that order, so on tied scores the more recent
    /// transaction wins.
    pub fn find_best_match<'a>(
        &self,
        target: &PendingTransaction,
        pool: &'a [CategorizedTransaction],
    ) -> Option<HistoryMatch<'a>> {
        self.find_best_match_with(target, pool, |a, b| similarity(a, b))
    }

    /// Same as [`find_best_match`](Self::find_best_match) but with the scorer
    /// injected, which lets tests observe how many candidates were evaluated.
    pub fn find_best_match_with<'a, F>(
        &self,
        target: &PendingTransaction,
        pool: &'a [CategorizedTransaction],
        mut score: F,
    ) -> Option<HistoryMatch<'a>>
    where
        F: FnMut(&str, &str) -> f64,
    {
        let mut candidates = filter_by_amount(target.amount_cents, pool);
        if candidates.is_empty() {
            // An overly narrow amount window must not produce "no match" by
            // itself; rescan everything.
            candidates = pool.iter().collect();
        }

        let mut best: Option<HistoryMatch<'a>> = None;

        for candidate in candidates {
            let s = score(&target.description, &candidate.description);

            if s >= self.short_circuit_threshold {
                return Some(HistoryMatch { candidate, score: s });
            }

            if s >= self.accept_threshold && best.as_ref().map_or(true, |b| s > b.score) {
                best = Some(HistoryMatch { candidate, score: s });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgie_core::{CategoryId, MajorCategoryId, TransactionId};
    use chrono::NaiveDate;

    fn history(id: i64, desc: &str, amount_cents: i64) -> CategorizedTransaction {
        CategorizedTransaction {
            id: TransactionId(id),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: desc.to_string(),
            amount_cents,
            bank: "chase".to_string(),
            major_id: MajorCategoryId(1),
            category_id: CategoryId(10),
        }
    }

    fn pending(desc: &str, amount_cents: i64) -> PendingTransaction {
        PendingTransaction {
            id: TransactionId(999),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            description: desc.to_string(),
            amount_cents,
            bank: "chase".to_string(),
        }
    }

    #[test]
    fn amount_window_is_inclusive_and_handles_negatives() {
        let pool = vec![
            history(1, "a", -8000),
            history(2, "b", -10000),
            history(3, "c", -12000),
            history(4, "d", -7500),
            history(5, "e", -13000),
        ];
        let kept = filter_by_amount(-10000, &pool);
        let ids: Vec<i64> = kept.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn amount_window_positive_target() {
        let pool = vec![
            history(1, "a", 800),
            history(2, "b", 1200),
            history(3, "c", 799),
            history(4, "d", 1201),
        ];
        let kept = filter_by_amount(1000, &pool);
        let ids: Vec<i64> = kept.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_window_falls_back_to_full_pool() {
        // Amount is way off for every candidate, but the description still
        // matches — the pre-filter alone must not cause a miss.
        let pool = vec![history(1, "NETFLIX.COM", -500)];
        let matcher = HistoryMatcher::default();
        let result = matcher.find_best_match(&pending("NETFLIX.COM", -99900), &pool);
        assert_eq!(result.unwrap().candidate.id.0, 1);
    }

    #[test]
    fn short_circuits_on_near_perfect_score() {
        let pool = vec![
            history(1, "one", -1000),
            history(2, "two", -1000),
            history(3, "three", -1000),
        ];
        let matcher = HistoryMatcher::default();
        let mut calls = 0;
        let result = matcher.find_best_match_with(&pending("x", -1000), &pool, |_, b| {
            calls += 1;
            if b == "two" {
                0.95
            } else {
                1.0 // would beat 0.95, but must never be reached
            }
        });
        assert_eq!(calls, 2, "scan must stop at the second candidate");
        assert_eq!(result.unwrap().candidate.id.0, 2);
    }

    #[test]
    fn accepts_exactly_at_threshold_rejects_just_below() {
        let pool = vec![history(1, "one", -1000)];
        let matcher = HistoryMatcher::default();

        let hit = matcher.find_best_match_with(&pending("x", -1000), &pool, |_, _| 0.7);
        assert!(hit.is_some());

        let miss = matcher.find_best_match_with(&pending("x", -1000), &pool, |_, _| 0.69);
        assert!(miss.is_none());
    }

    #[test]
    fn earlier_candidate_wins_ties() {
        let pool = vec![history(1, "one", -1000), history(2, "two", -1000)];
        let matcher = HistoryMatcher::default();
        let result = matcher.find_best_match_with(&pending("x", -1000), &pool, |_, _| 0.8);
        assert_eq!(result.unwrap().candidate.id.0, 1);
    }

    #[test]
    fn real_scorer_finds_recurring_merchant() {
        let pool = vec![
            history(1, "SHELL OIL 5734", -4200),
            history(2, "SPOTIFY USA", -1099),
            history(3, "NETFLIX.COM 866-579-7172", -1599),
        ];
        let matcher = HistoryMatcher::default();
        let result = matcher
            .find_best_match(&pending("NETFLIX.COM", -1599), &pool)
            .unwrap();
        assert_eq!(result.candidate.id.0, 3);
        assert!(result.score >= 0.7);
    }
}
