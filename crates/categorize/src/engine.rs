use serde::Serialize;

use budgie_core::{
    CategorizedTransaction, CategoryAssignment, CategoryPair, KeywordRule, PendingTransaction,
    Provenance,
};

use crate::batch::{BulkUpdate, CategorizationBatcher};
use crate::history::HistoryMatcher;
use crate::merchants::MerchantTable;
use crate::resolve::CategoryIndex;
use crate::rules::match_description;

/// Counts reported back to the caller after a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorizeSummary {
    /// How many pending transactions the pass considered.
    pub pending_total: usize,
    pub merchant: usize,
    pub rule: usize,
    pub history: usize,
}

impl CategorizeSummary {
    pub fn matched(&self) -> usize {
        self.merchant + self.rule + self.history
    }

    fn count(&mut self, provenance: Provenance) {
        match provenance {
            Provenance::Merchant => self.merchant += 1,
            Provenance::Rule => self.rule += 1,
            Provenance::History => self.history += 1,
        }
    }
}

/// Everything the MATCH + BATCH phases produce; the caller commits `updates`
/// and reports `summary`.
#[derive(Debug)]
pub struct CategorizationOutcome {
    pub updates: Vec<BulkUpdate>,
    pub summary: CategorizeSummary,
}

/// The pure matching pipeline: merchant table → user rules → history
/// similarity, with grouped updates out the other end. No I/O; the storage
/// layer supplies the pools and applies the result.
pub struct Categorizer {
    merchants: MerchantTable,
    matcher: HistoryMatcher,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self {
            merchants: MerchantTable::builtin(),
            matcher: HistoryMatcher::default(),
        }
    }
}

impl Categorizer {
    pub fn new(merchants: MerchantTable, matcher: HistoryMatcher) -> Self {
        Self { merchants, matcher }
    }

    /// Run one pass over `pending`.
    ///
    /// Ordering contracts (asserted by the storage tests, relied on here):
    /// `rules` newest-first, `history` most-recent-first.
    ///
    /// Each transaction gets exactly one outcome. A rule hit whose category
    /// names are missing from `index` is logged and skipped for this pass —
    /// it does not abort the run and does not fall through to history.
    pub fn run(
        &self,
        rules: &[KeywordRule],
        history: &[CategorizedTransaction],
        pending: &[PendingTransaction],
        index: &CategoryIndex,
    ) -> CategorizationOutcome {
        let mut batcher = CategorizationBatcher::new();
        let mut summary = CategorizeSummary {
            pending_total: pending.len(),
            ..Default::default()
        };

        for tx in pending {
            let assignment = self.match_one(tx, rules, history, index);
            if let Some(assignment) = assignment {
                summary.count(assignment.provenance);
                batcher.add(assignment);
            }
        }

        CategorizationOutcome {
            updates: batcher.flush(),
            summary,
        }
    }

    fn match_one(
        &self,
        tx: &PendingTransaction,
        rules: &[KeywordRule],
        history: &[CategorizedTransaction],
        index: &CategoryIndex,
    ) -> Option<CategoryAssignment> {
        if let Some(hit) = match_description(&tx.description, &self.merchants, rules) {
            return match index.resolve(hit.major_category, hit.category) {
                Some(categories) => Some(CategoryAssignment {
                    transaction_id: tx.id,
                    categories,
                    provenance: hit.provenance,
                }),
                None => {
                    tracing::warn!(
                        transaction = %tx.id,
                        major = hit.major_category,
                        category = hit.category,
                        "rule hit names an unknown category; skipping transaction"
                    );
                    None
                }
            };
        }

        self.matcher
            .find_best_match(tx, history)
            .map(|m| CategoryAssignment {
                transaction_id: tx.id,
                categories: CategoryPair {
                    major_id: m.candidate.major_id,
                    category_id: m.candidate.category_id,
                },
                provenance: Provenance::History,
            })
    }
}
