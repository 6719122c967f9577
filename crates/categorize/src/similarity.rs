use std::collections::HashSet;

/// Tokens this short ("the", "at", card network prefixes) carry no signal
/// for merchant descriptions and are excluded from word overlap.
const MIN_WORD_LEN: usize = 4;

/// Scores how alike two transaction descriptions are, in [0.0, 1.0].
///
/// Tiers, checked in order on normalized input:
/// 1.0  — equal (or both empty)
/// 0.8  — one contains the other
/// (0.5, 0.8) — words longer than 3 chars overlap; `0.5 + ratio * 0.3`
/// 0.0  — nothing in common (or exactly one side empty)
///
/// The word tier is capped strictly below the substring tier so a partial
/// overlap can never outrank a containment hit.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
    }

    if a == b {
        return 1.0;
    }

    if a.contains(&b) || b.contains(&a) {
        return 0.8;
    }

    let words_a: Vec<&str> = qualifying_words(&a).collect();
    let words_b: HashSet<&str> = qualifying_words(&b).collect();

    // Counted over the list, not a set: a word repeated in `a` that appears
    // once in `b` counts every time. Known asymmetry, kept as-is — see the
    // duplicate_words_score_asymmetrically test.
    let common = words_a.iter().filter(|w| words_b.contains(*w)).count();

    if common > 0 {
        let denom = words_a.len().max(words_b.len());
        0.5 + (common as f64 / denom as f64) * 0.3
    } else {
        0.0
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['\'', '\u{2019}'], "")
}

fn qualifying_words(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace().filter(|w| w.len() >= MIN_WORD_LEN)
}
