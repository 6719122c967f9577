use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One keyword → category mapping in the merchant table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantMapping {
    pub keyword: String,
    pub major_category: String,
    pub category: String,
}

#[derive(Debug, Error)]
pub enum MerchantTableError {
    #[error("Failed to parse merchant table TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Immutable, ordered keyword → category table for well-known merchants.
///
/// Built once at startup and injected into matching; scan order is the
/// defined order, first substring hit wins. These mappings outrank user
/// rules because a known-merchant hit is the highest-confidence signal.
#[derive(Debug, Clone)]
pub struct MerchantTable {
    entries: Vec<MerchantMapping>,
}

impl MerchantTable {
    pub fn new(entries: Vec<MerchantMapping>) -> Self {
        Self { entries }
    }

    /// The built-in table. Targets only name pairs from
    /// `budgie_core::DEFAULT_TAXONOMY` so they resolve on a fresh install.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_MERCHANTS
                .iter()
                .map(|(keyword, major, category)| MerchantMapping {
                    keyword: (*keyword).to_string(),
                    major_category: (*major).to_string(),
                    category: (*category).to_string(),
                })
                .collect(),
        )
    }

    /// Load a replacement table from TOML — an array of
    /// `{ keyword, major_category, category }` tables under `[[merchants]]`.
    pub fn from_toml(toml_content: &str) -> Result<Self, MerchantTableError> {
        #[derive(Deserialize)]
        struct TableFile {
            merchants: Vec<MerchantMapping>,
        }
        let file: TableFile = toml::from_str(toml_content)?;
        Ok(Self::new(file.merchants))
    }

    pub fn entries(&self) -> &[MerchantMapping] {
        &self.entries
    }

    /// First entry whose keyword occurs in the (already lowercased)
    /// description.
    pub fn lookup(&self, lowercased_description: &str) -> Option<&MerchantMapping> {
        self.entries
            .iter()
            .find(|m| lowercased_description.contains(&m.keyword))
    }
}

/// Keywords are stored lowercase; lookups lowercase the description once.
const BUILTIN_MERCHANTS: &[(&str, &str, &str)] = &[
    ("amazon", "Shopping", "Online"),
    ("amzn", "Shopping", "Online"),
    ("walmart", "Food & Dining", "Groceries"),
    ("costco", "Food & Dining", "Groceries"),
    ("kroger", "Food & Dining", "Groceries"),
    ("safeway", "Food & Dining", "Groceries"),
    ("trader joe", "Food & Dining", "Groceries"),
    ("whole foods", "Food & Dining", "Groceries"),
    ("starbucks", "Food & Dining", "Coffee"),
    ("dunkin", "Food & Dining", "Coffee"),
    ("mcdonald", "Food & Dining", "Restaurants"),
    ("chipotle", "Food & Dining", "Restaurants"),
    ("doordash", "Food & Dining", "Restaurants"),
    ("grubhub", "Food & Dining", "Restaurants"),
    ("netflix", "Entertainment", "Streaming"),
    ("spotify", "Entertainment", "Streaming"),
    ("hulu", "Entertainment", "Streaming"),
    ("disney plus", "Entertainment", "Streaming"),
    ("ticketmaster", "Entertainment", "Events"),
    ("uber eats", "Food & Dining", "Restaurants"),
    ("uber", "Transport", "Rideshare"),
    ("lyft", "Transport", "Rideshare"),
    ("shell", "Transport", "Fuel"),
    ("chevron", "Transport", "Fuel"),
    ("exxon", "Transport", "Fuel"),
    ("comcast", "Housing", "Internet & Phone"),
    ("verizon", "Housing", "Internet & Phone"),
    ("t-mobile", "Housing", "Internet & Phone"),
    ("cvs", "Health", "Pharmacy"),
    ("walgreens", "Health", "Pharmacy"),
    ("planet fitness", "Health", "Fitness"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_is_case_prepared_substring() {
        let table = MerchantTable::builtin();
        let hit = table.lookup("netflix.com 866-579-7172").unwrap();
        assert_eq!(hit.major_category, "Entertainment");
        assert_eq!(hit.category, "Streaming");
    }

    #[test]
    fn first_entry_in_table_order_wins() {
        // "uber eats" precedes "uber" in the table, so food delivery is not
        // misfiled as rideshare.
        let table = MerchantTable::builtin();
        let hit = table.lookup("uber eats pending").unwrap();
        assert_eq!(hit.category, "Restaurants");

        let ride = table.lookup("uber trip help.uber.com").unwrap();
        assert_eq!(ride.category, "Rideshare");
    }

    #[test]
    fn unknown_merchant_is_none() {
        assert!(MerchantTable::builtin().lookup("local bakery 42").is_none());
    }

    #[test]
    fn builtin_targets_exist_in_default_taxonomy() {
        let taxonomy: Vec<(&str, &str)> = budgie_core::DEFAULT_TAXONOMY.to_vec();
        for entry in MerchantTable::builtin().entries() {
            assert!(
                taxonomy.contains(&(entry.major_category.as_str(), entry.category.as_str())),
                "{} maps to a category missing from the seed taxonomy",
                entry.keyword
            );
        }
    }

    #[test]
    fn from_toml_parses_merchant_array() {
        let table = MerchantTable::from_toml(
            r#"
            [[merchants]]
            keyword = "blue bottle"
            major_category = "Food & Dining"
            category = "Coffee"
            "#,
        )
        .unwrap();
        assert_eq!(table.entries().len(), 1);
        assert!(table.lookup("blue bottle oakland").is_some());
    }

    #[test]
    fn from_toml_rejects_garbage() {
        assert!(MerchantTable::from_toml("merchants = 3").is_err());
    }
}
