use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use budgie_categorize::{Categorizer, HistoryMatcher, MerchantTable};

/// Auto-categorize pending transactions in a budgie database.
#[derive(Debug, Parser)]
#[command(name = "budgie", version, about)]
struct Args {
    /// Database file. Defaults to budgie.db in the platform data directory.
    #[arg(long)]
    db: Option<PathBuf>,

    /// How many recent categorized transactions to search for history
    /// matches. Larger values improve recall on old merchants at the cost
    /// of pass latency.
    #[arg(long, default_value_t = 500)]
    history_cap: u32,

    /// TOML file replacing the built-in merchant table.
    #[arg(long)]
    merchants: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let db_path = match args.db {
        Some(path) => path,
        None => {
            let dirs = directories::ProjectDirs::from("com", "budgie", "Budgie")
                .context("Failed to locate platform data directory")?;
            let data_dir = dirs.data_dir().to_path_buf();
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create {}", data_dir.display()))?;
            data_dir.join("budgie.db")
        }
    };

    tracing::info!("Using database at {}", db_path.display());

    let pool = budgie_storage::create_db(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    budgie_storage::seed_default_taxonomy(&pool)
        .await
        .context("Failed to seed category taxonomy")?;
    budgie_storage::seed_default_rules(&pool)
        .await
        .context("Failed to seed default rules")?;

    let merchants = match args.merchants {
        Some(path) => {
            let toml = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            MerchantTable::from_toml(&toml)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => MerchantTable::builtin(),
    };
    let categorizer = Categorizer::new(merchants, HistoryMatcher::default());

    let summary = budgie_storage::auto_categorize(&pool, &categorizer, args.history_cap)
        .await
        .context("Categorization pass failed")?;

    println!(
        "Categorized {} of {} pending transactions ({} merchant, {} rule, {} history)",
        summary.matched(),
        summary.pending_total,
        summary.merchant,
        summary.rule,
        summary.history,
    );

    Ok(())
}
