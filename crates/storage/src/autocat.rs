use thiserror::Error;

use budgie_categorize::{Categorizer, CategorizeSummary};

use crate::db::{
    apply_updates, get_category_index, get_pending_transactions, get_recent_categorized,
    get_rules, DbPool,
};

#[derive(Debug, Error)]
pub enum AutoCategorizeError {
    /// A storage read failed; nothing was matched or written.
    #[error("Failed to load categorization inputs: {0}")]
    Load(#[source] sqlx::Error),
    /// The bulk update failed; the database rolled back, so no assignment
    /// from this pass is applied and no counts are valid.
    #[error("Failed to commit categorization updates: {0}")]
    Commit(#[source] sqlx::Error),
}

/// One full categorization pass: LOAD → MATCH → BATCH → COMMIT → REPORT.
///
/// `history_cap` bounds the similarity corpus (most recent N categorized
/// transactions). Matching itself is pure and in-memory; the only awaits are
/// the reads up front and the single commit at the end.
pub async fn auto_categorize(
    pool: &DbPool,
    categorizer: &Categorizer,
    history_cap: u32,
) -> Result<CategorizeSummary, AutoCategorizeError> {
    let rules = get_rules(pool).await.map_err(AutoCategorizeError::Load)?;
    let history = get_recent_categorized(pool, history_cap)
        .await
        .map_err(AutoCategorizeError::Load)?;
    let pending = get_pending_transactions(pool)
        .await
        .map_err(AutoCategorizeError::Load)?;
    let index = get_category_index(pool)
        .await
        .map_err(AutoCategorizeError::Load)?;

    tracing::info!(
        pending = pending.len(),
        history = history.len(),
        rules = rules.len(),
        "starting categorization pass"
    );

    let outcome = categorizer.run(&rules, &history, &pending, &index);

    if !outcome.updates.is_empty() {
        apply_updates(pool, &outcome.updates)
            .await
            .map_err(AutoCategorizeError::Commit)?;
    }

    tracing::info!(
        merchant = outcome.summary.merchant,
        rule = outcome.summary.rule,
        history = outcome.summary.history,
        unmatched = outcome.summary.pending_total - outcome.summary.matched(),
        groups = outcome.updates.len(),
        "categorization pass committed"
    );

    Ok(outcome.summary)
}
