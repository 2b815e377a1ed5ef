//! Merging genre/style lists from multiple sources.

use std::collections::HashSet;

/// Genre and style lists contributed by one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    pub genres: Vec<String>,
    pub styles: Vec<String>,
}

impl TagSet {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.styles.is_empty()
    }
}

/// Merge tag sets in consultation order.
///
/// All genre lists are concatenated, then all style lists, in the order the
/// sources were consulted — not re-sorted. Duplicates (exact string
/// equality) are dropped keeping the first occurrence, so terms from
/// earlier, more authoritative sources stay at the front. Downstream
/// "top genres" reporting relies on that order.
pub fn merge(sets: &[TagSet]) -> TagSet {
    TagSet {
        genres: dedup_keep_order(sets.iter().flat_map(|s| s.genres.iter())),
        styles: dedup_keep_order(sets.iter().flat_map(|s| s.styles.iter())),
    }
}

fn dedup_keep_order<'a, I: Iterator<Item = &'a String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item.clone());
        }
    }
    out
}
