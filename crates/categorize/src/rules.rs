use budgie_core::{KeywordRule, Provenance};

use crate::merchants::MerchantTable;

/// A rule-layer hit: the category names to resolve plus where they came
/// from. History matching does not go through here — matched history rows
/// already carry resolved ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHit<'a> {
    pub major_category: &'a str,
    pub category: &'a str,
    pub provenance: Provenance,
}

/// Match a description against the merchant table, then the user's keyword
/// rules. Merchant hits always win; within each layer the first substring
/// hit in the given order wins (rules arrive newest-first, so user rules
/// shadow seeded defaults).
pub fn match_description<'a>(
    description: &str,
    merchants: &'a MerchantTable,
    rules: &'a [KeywordRule],
) -> Option<RuleHit<'a>> {
    let haystack = description.to_lowercase();

    if let Some(m) = merchants.lookup(&haystack) {
        return Some(RuleHit {
            major_category: &m.major_category,
            category: &m.category,
            provenance: Provenance::Merchant,
        });
    }

    rules
        .iter()
        .find(|r| haystack.contains(&r.keyword.to_lowercase()))
        .map(|r| RuleHit {
            major_category: &r.major_category,
            category: &r.category,
            provenance: Provenance::Rule,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keyword: &str, major: &str, category: &str) -> KeywordRule {
        KeywordRule::new(keyword, major, category)
    }

    #[test]
    fn merchant_table_beats_user_rule() {
        // A user rule also matching "netflix" must lose to the merchant table.
        let rules = vec![rule("netflix", "Shopping", "Online")];
        let merchants = MerchantTable::builtin();
        let hit = match_description("NETFLIX.COM", &merchants, &rules).unwrap();
        assert_eq!(hit.provenance, Provenance::Merchant);
        assert_eq!(hit.category, "Streaming");
    }

    #[test]
    fn user_rule_matches_when_merchant_table_misses() {
        let rules = vec![rule("acme gym", "Health", "Fitness")];
        let merchants = MerchantTable::builtin();
        let hit = match_description("ACME GYM MONTHLY", &merchants, &rules).unwrap();
        assert_eq!(hit.provenance, Provenance::Rule);
        assert_eq!(hit.major_category, "Health");
    }

    #[test]
    fn rule_matching_is_case_insensitive_both_ways() {
        let rules = vec![rule("Farmers Market", "Food & Dining", "Groceries")];
        let merchants = MerchantTable::new(Vec::new());
        let hit = match_description("downtown farmers market", &merchants, &rules);
        assert!(hit.is_some());
    }

    #[test]
    fn first_rule_in_order_wins() {
        // Caller supplies newest-first; the newer (first) rule shadows the
        // older one for the same keyword.
        let rules = vec![
            rule("coffee", "Food & Dining", "Coffee"),
            rule("coffee", "Food & Dining", "Restaurants"),
        ];
        let merchants = MerchantTable::new(Vec::new());
        let hit = match_description("CORNER COFFEE", &merchants, &rules).unwrap();
        assert_eq!(hit.category, "Coffee");
    }

    #[test]
    fn no_hit_returns_none() {
        assert!(match_description("MYSTERY CHARGE", &MerchantTable::builtin(), &[]).is_none());
    }
}
