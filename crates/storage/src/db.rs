use budgie_categorize::{BulkUpdate, CategoryIndex};
use budgie_core::{
    CategorizedTransaction, CategoryId, KeywordRule, MajorCategoryId, PendingTransaction,
    TransactionId, DEFAULT_TAXONOMY,
};
use chrono::NaiveDate;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

pub type DbPool = Pool<Sqlite>;

pub async fn create_db(path: &Path) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&format!("sqlite:{}?mode=rwc", path.display()))
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS major_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            major_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            UNIQUE (major_id, name),
            FOREIGN KEY (major_id) REFERENCES major_categories(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount_cents INTEGER NOT NULL,
            bank TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            major_category_id INTEGER,
            category_id INTEGER,
            flagged INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (major_category_id) REFERENCES major_categories(id),
            FOREIGN KEY (category_id) REFERENCES categories(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            keyword TEXT NOT NULL,
            major_category TEXT NOT NULL,
            category TEXT NOT NULL,
            subcategory TEXT,
            is_default INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn seed_default_taxonomy(pool: &DbPool) -> Result<(), sqlx::Error> {
    for (major, category) in DEFAULT_TAXONOMY {
        sqlx::query("INSERT OR IGNORE INTO major_categories (name) VALUES (?)")
            .bind(major)
            .execute(pool)
            .await?;

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO categories (major_id, name)
            SELECT id, ? FROM major_categories WHERE name = ?
            "#,
        )
        .bind(category)
        .bind(major)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Seed keyword rules installed alongside the taxonomy. Users shadow these
/// by creating their own rules later (newer rules are scanned first).
const DEFAULT_RULES: &[(&str, &str, &str)] = &[
    ("grocery", "Food & Dining", "Groceries"),
    ("supermarket", "Food & Dining", "Groceries"),
    ("pharmacy", "Health", "Pharmacy"),
    ("gym", "Health", "Fitness"),
    ("rent", "Housing", "Rent"),
    ("electric", "Housing", "Utilities"),
    ("payroll", "Income", "Salary"),
    ("parking", "Transport", "Public Transit"),
];

pub async fn seed_default_rules(pool: &DbPool) -> Result<(), sqlx::Error> {
    let (existing,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM rules WHERE is_default = 1")
            .fetch_one(pool)
            .await?;
    if existing > 0 {
        return Ok(());
    }

    for (keyword, major, category) in DEFAULT_RULES {
        sqlx::query(
            "INSERT INTO rules (keyword, major_category, category, is_default) VALUES (?, ?, ?, 1)",
        )
        .bind(keyword)
        .bind(major)
        .bind(category)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn save_rule(pool: &DbPool, rule: &KeywordRule) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO rules (keyword, major_category, category, subcategory, is_default)
        VALUES (?, ?, ?, ?, ?) RETURNING id
        "#,
    )
    .bind(&rule.keyword)
    .bind(&rule.major_category)
    .bind(&rule.category)
    .bind(&rule.subcategory)
    .bind(rule.is_default)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// All rules, newest-first. This ordering is the contract the matcher relies
/// on: user-created rules land after the seeded defaults and therefore come
/// back first.
pub async fn get_rules(pool: &DbPool) -> Result<Vec<KeywordRule>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64, String, String, String, Option<String>, i64)>(
        r#"
        SELECT id, keyword, major_category, category, subcategory, is_default
        FROM rules ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| KeywordRule {
            id: Some(r.0),
            keyword: r.1,
            major_category: r.2,
            category: r.3,
            subcategory: r.4,
            is_default: r.5 != 0,
        })
        .collect())
}

/// The similarity corpus: categorized transactions, most-recent-first,
/// capped. The cap bounds pass latency on large accounts at the cost of
/// recall; callers tune it (default 500).
///
/// Rows with unparseable dates are skipped with a warning rather than
/// failing the load.
pub async fn get_recent_categorized(
    pool: &DbPool,
    cap: u32,
) -> Result<Vec<CategorizedTransaction>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64, String, String, i64, String, i64, i64)>(
        r#"
        SELECT id, date, description, amount_cents, bank, major_category_id, category_id
        FROM transactions
        WHERE status = 'categorized'
          AND major_category_id IS NOT NULL AND category_id IS NOT NULL
        ORDER BY date DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(cap))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|r| {
            parse_date(r.0, &r.1).map(|date| CategorizedTransaction {
                id: TransactionId(r.0),
                date,
                description: r.2,
                amount_cents: r.3,
                bank: r.4,
                major_id: MajorCategoryId(r.5),
                category_id: CategoryId(r.6),
            })
        })
        .collect())
}

pub async fn get_pending_transactions(
    pool: &DbPool,
) -> Result<Vec<PendingTransaction>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64, String, String, i64, String)>(
        r#"
        SELECT id, date, description, amount_cents, bank
        FROM transactions
        WHERE status = 'pending'
        ORDER BY date DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|r| {
            parse_date(r.0, &r.1).map(|date| PendingTransaction {
                id: TransactionId(r.0),
                date,
                description: r.2,
                amount_cents: r.3,
                bank: r.4,
            })
        })
        .collect())
}

fn parse_date(id: i64, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(transaction = id, date = raw, "skipping row with malformed date");
            None
        }
    }
}

/// One taxonomy read per pass; rule hits resolve against this in memory.
pub async fn get_category_index(pool: &DbPool) -> Result<CategoryIndex, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, String, i64, i64)>(
        r#"
        SELECT m.name, c.name, m.id, c.id
        FROM categories c
        JOIN major_categories m ON c.major_id = m.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(CategoryIndex::from_entries(rows.into_iter().map(
        |(major, category, major_id, category_id)| {
            (major, category, MajorCategoryId(major_id), CategoryId(category_id))
        },
    )))
}

pub async fn insert_pending_transaction(
    pool: &DbPool,
    date: NaiveDate,
    description: &str,
    amount_cents: i64,
    bank: &str,
) -> Result<TransactionId, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO transactions (date, description, amount_cents, bank, status)
        VALUES (?, ?, ?, ?, 'pending') RETURNING id
        "#,
    )
    .bind(date.to_string())
    .bind(description)
    .bind(amount_cents)
    .bind(bank)
    .fetch_one(pool)
    .await?;

    Ok(TransactionId(row.0))
}

pub async fn insert_categorized_transaction(
    pool: &DbPool,
    date: NaiveDate,
    description: &str,
    amount_cents: i64,
    bank: &str,
    major_id: MajorCategoryId,
    category_id: CategoryId,
) -> Result<TransactionId, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO transactions
            (date, description, amount_cents, bank, status, major_category_id, category_id)
        VALUES (?, ?, ?, ?, 'categorized', ?, ?) RETURNING id
        "#,
    )
    .bind(date.to_string())
    .bind(description)
    .bind(amount_cents)
    .bind(bank)
    .bind(major_id.0)
    .bind(category_id.0)
    .fetch_one(pool)
    .await?;

    Ok(TransactionId(row.0))
}

/// Apply a pass's grouped updates as one database transaction: every group
/// lands or none do. Each group is a single `UPDATE … WHERE id IN (…)`.
pub async fn apply_updates(pool: &DbPool, updates: &[BulkUpdate]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for update in updates {
        if update.transaction_ids.is_empty() {
            continue;
        }

        let placeholders = vec!["?"; update.transaction_ids.len()].join(", ");
        let sql = format!(
            "UPDATE transactions \
             SET major_category_id = ?, category_id = ?, status = 'categorized', flagged = 0 \
             WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql)
            .bind(update.categories.major_id.0)
            .bind(update.categories.category_id.0);
        for id in &update.transaction_ids {
            query = query.bind(id.0);
        }
        query.execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(())
}
