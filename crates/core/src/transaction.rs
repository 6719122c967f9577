use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::{CategoryId, MajorCategoryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub i64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Categorized,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Categorized => write!(f, "categorized"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "categorized" => Ok(TransactionStatus::Categorized),
            other => Err(format!("Unknown transaction status: '{other}'")),
        }
    }
}

/// An imported bank transaction awaiting categorization. Read-only to the
/// matching engine; only its id is referenced to decide an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    /// Signed: negative for debits, positive for credits.
    pub amount_cents: i64,
    pub bank: String,
}

/// A previously categorized transaction. Serves only as the similarity
/// corpus for history matching; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
    pub bank: String,
    pub major_id: MajorCategoryId,
    pub category_id: CategoryId,
}
