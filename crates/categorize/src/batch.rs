use std::collections::HashMap;

use budgie_core::{CategoryAssignment, CategoryPair, Provenance, TransactionId};

/// One grouped storage write: every listed transaction receives the same
/// category pair, gets status flipped to categorized, and its review flag
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUpdate {
    pub categories: CategoryPair,
    pub provenance: Provenance,
    pub transaction_ids: Vec<TransactionId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BatchKey {
    provenance: Provenance,
    categories: CategoryPair,
}

/// Accumulates per-transaction assignments into groups keyed by
/// (provenance, category pair), so a pass over N transactions commits
/// one update per distinct outcome instead of one per row.
///
/// A local value owned by a single categorization pass; `flush` consumes it.
/// Groups come out in first-insertion order.
#[derive(Debug, Default)]
pub struct CategorizationBatcher {
    groups: HashMap<BatchKey, Vec<TransactionId>>,
    order: Vec<BatchKey>,
}

impl CategorizationBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, assignment: CategoryAssignment) {
        let key = BatchKey {
            provenance: assignment.provenance,
            categories: assignment.categories,
        };
        let ids = self.groups.entry(key).or_insert_with(|| {
            self.order.push(key);
            Vec::new()
        });
        ids.push(assignment.transaction_id);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn flush(mut self) -> Vec<BulkUpdate> {
        self.order
            .iter()
            .map(|key| BulkUpdate {
                categories: key.categories,
                provenance: key.provenance,
                transaction_ids: self.groups.remove(key).unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgie_core::{CategoryId, MajorCategoryId};

    fn assignment(tx: i64, major: i64, category: i64, provenance: Provenance) -> CategoryAssignment {
        CategoryAssignment {
            transaction_id: TransactionId(tx),
            categories: CategoryPair {
                major_id: MajorCategoryId(major),
                category_id: CategoryId(category),
            },
            provenance,
        }
    }

    #[test]
    fn same_outcome_collapses_to_one_update() {
        let mut batcher = CategorizationBatcher::new();
        for tx in 1..=5 {
            batcher.add(assignment(tx, 1, 10, Provenance::Merchant));
        }
        let updates = batcher.flush();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].transaction_ids.len(), 5);
    }

    #[test]
    fn provenance_splits_identical_categories() {
        let mut batcher = CategorizationBatcher::new();
        batcher.add(assignment(1, 1, 10, Provenance::Merchant));
        batcher.add(assignment(2, 1, 10, Provenance::History));
        let updates = batcher.flush();
        assert_eq!(updates.len(), 2);
    }

    #[test]
    fn groups_flush_in_first_insertion_order() {
        let mut batcher = CategorizationBatcher::new();
        batcher.add(assignment(1, 2, 20, Provenance::Rule));
        batcher.add(assignment(2, 1, 10, Provenance::Merchant));
        batcher.add(assignment(3, 2, 20, Provenance::Rule));
        let updates = batcher.flush();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].provenance, Provenance::Rule);
        assert_eq!(
            updates[0].transaction_ids,
            vec![TransactionId(1), TransactionId(3)]
        );
        assert_eq!(updates[1].provenance, Provenance::Merchant);
    }

    #[test]
    fn empty_batcher_flushes_nothing() {
        let batcher = CategorizationBatcher::new();
        assert!(batcher.is_empty());
        assert!(batcher.flush().is_empty());
    }
}
