use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryPair;
use super::transaction::TransactionId;

/// A keyword → category rule. Category targets are stored by name and
/// resolved to ids at categorization time.
///
/// Ordering contract: rule lists handed to the engine are newest-first, so
/// user-created rules are scanned before the seeded defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub id: Option<i64>,
    pub keyword: String,
    pub major_category: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub is_default: bool,
}

impl KeywordRule {
    pub fn new(keyword: &str, major_category: &str, category: &str) -> Self {
        KeywordRule {
            id: None,
            keyword: keyword.to_string(),
            major_category: major_category.to_string(),
            category: category.to_string(),
            subcategory: None,
            is_default: false,
        }
    }
}

/// Which matching strategy produced a category assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    Merchant,
    Rule,
    History,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Merchant => write!(f, "merchant"),
            Provenance::Rule => write!(f, "rule"),
            Provenance::History => write!(f, "history"),
        }
    }
}

/// The outcome of matching one pending transaction. Lives for the duration
/// of a single categorization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAssignment {
    pub transaction_id: TransactionId,
    pub categories: CategoryPair,
    pub provenance: Provenance,
}
