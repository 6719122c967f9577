use std::collections::HashMap;

use budgie_core::{CategoryId, CategoryPair, MajorCategoryId};

/// Case-insensitive (major name, category name) → id lookup.
///
/// Built once per categorization pass from a single taxonomy read, so rule
/// hits resolve from memory instead of one storage round-trip per match.
#[derive(Debug, Default, Clone)]
pub struct CategoryIndex {
    map: HashMap<(String, String), CategoryPair>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, MajorCategoryId, CategoryId)>,
    {
        let mut index = Self::new();
        for (major, category, major_id, category_id) in entries {
            index.insert(&major, &category, major_id, category_id);
        }
        index
    }

    pub fn insert(
        &mut self,
        major: &str,
        category: &str,
        major_id: MajorCategoryId,
        category_id: CategoryId,
    ) {
        self.map.insert(
            (major.to_lowercase(), category.to_lowercase()),
            CategoryPair {
                major_id,
                category_id,
            },
        );
    }

    pub fn resolve(&self, major: &str, category: &str) -> Option<CategoryPair> {
        self.map
            .get(&(major.to_lowercase(), category.to_lowercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
