pub mod batch;
pub mod engine;
pub mod history;
pub mod merchants;
pub mod resolve;
pub mod rules;
pub mod similarity;

pub use batch::{BulkUpdate, CategorizationBatcher};
pub use engine::{CategorizationOutcome, Categorizer, CategorizeSummary};
pub use history::{filter_by_amount, HistoryMatch, HistoryMatcher};
pub use merchants::{MerchantMapping, MerchantTable, MerchantTableError};
pub use resolve::CategoryIndex;
pub use rules::{match_description, RuleHit};
pub use similarity::similarity;
