use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MajorCategoryId(pub i64);

impl fmt::Display for MajorCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved (major, category) identifier pair — what a categorization
/// ultimately writes onto a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPair {
    pub major_id: MajorCategoryId,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub major_id: MajorCategoryId,
    pub name: String,
}

/// Seed taxonomy installed on first run. Merchant-table and default-rule
/// targets must name pairs from this list so they resolve out of the box.
pub const DEFAULT_TAXONOMY: &[(&str, &str)] = &[
    ("Food & Dining", "Groceries"),
    ("Food & Dining", "Restaurants"),
    ("Food & Dining", "Coffee"),
    ("Shopping", "Online"),
    ("Shopping", "Clothing"),
    ("Shopping", "Electronics"),
    ("Entertainment", "Streaming"),
    ("Entertainment", "Events"),
    ("Transport", "Fuel"),
    ("Transport", "Rideshare"),
    ("Transport", "Public Transit"),
    ("Housing", "Rent"),
    ("Housing", "Utilities"),
    ("Housing", "Internet & Phone"),
    ("Health", "Pharmacy"),
    ("Health", "Fitness"),
    ("Income", "Salary"),
    ("Income", "Other Income"),
    ("Miscellaneous", "Uncategorized"),
];
