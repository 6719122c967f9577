pub mod category;
pub mod rule;
pub mod transaction;

pub use category::{Category, CategoryId, CategoryPair, MajorCategoryId, DEFAULT_TAXONOMY};
pub use rule::{CategoryAssignment, KeywordRule, Provenance};
pub use transaction::{
    CategorizedTransaction, PendingTransaction, TransactionId, TransactionStatus,
};
