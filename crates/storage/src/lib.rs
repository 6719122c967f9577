pub mod autocat;
pub mod db;

pub use autocat::{auto_categorize, AutoCategorizeError};
pub use db::{
    apply_updates, create_db, get_category_index, get_pending_transactions,
    get_recent_categorized, get_rules, insert_categorized_transaction,
    insert_pending_transaction, save_rule, seed_default_rules, seed_default_taxonomy, DbPool,
};
