//! Artist-credit parsing.
//!
//! Streaming catalogs deliver the whole credit as one string:
//! "Yasunori Mitsuda, ACE (TOMOri Kudo, CHiCO), Kenji Hiramatsu". The
//! marketplace catalog indexes individual artists, so the credit has to be
//! taken apart before searching. Commas inside parentheses are part of a
//! single act's name and must not split.

use std::collections::HashSet;

/// Join words that separate co-credited artists inside one segment.
/// Only split when surrounded by whitespace ("Simon & Garfunkel" splits,
/// "AC&DC" would not).
const JOIN_SEPARATORS: &[&str] = &["&", "feat.", "ft.", "featuring"];

/// Leading words that make a first-word-only search candidate useless.
const STOP_WORDS: &[&str] = &["the", "a", "an", "and", "or", "but", "nor", "for", "yet"];

/// Split a raw artist credit into individual artist names.
///
/// Commas split only at parenthesis depth zero; an unmatched `)` is treated
/// as depth already zero. Each top-level segment is then split on the join
/// words. Empty segments are dropped, duplicates removed keeping first
/// occurrence.
pub fn split_artists(raw_credit: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for segment in split_top_level_commas(raw_credit) {
        for piece in split_join_words(&segment) {
            let name = piece.trim();
            if !name.is_empty() && seen.insert(name.to_string()) {
                out.push(name.to_string());
            }
        }
    }

    out
}

/// Prioritized search candidates for a raw artist credit.
///
/// For each artist from [`split_artists`], in order: the full name, its
/// join-word sub-segments, the name with parenthetical content removed plus
/// each comma-separated item inside the parentheses, and (for multi-word
/// names not starting with a stop word) the first word alone. Deduplicated
/// across the whole list, first occurrence wins; the order is the fallback
/// priority the resolver walks.
pub fn search_candidates(raw_credit: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for name in split_artists(raw_credit) {
        for part in extract_artist_parts(&name) {
            if seen.insert(part.clone()) {
                out.push(part);
            }
        }
    }

    out
}

/// Fallback search parts for a single artist name.
///
/// "ACE (TOMOri Kudo, CHiCO)" → ["ACE (TOMOri Kudo, CHiCO)", "ACE",
/// "TOMOri Kudo", "CHiCO"]; "System of a Down" → ["System of a Down",
/// "System"].
fn extract_artist_parts(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut parts = vec![trimmed.to_string()];

    // Sub-segments by comma/join-word (no-op when the name has none).
    parts.extend(split_artists(trimmed));

    // Parenthetical collaborators: the name without them, then each
    // comma-separated item inside.
    let (groups, outside) = paren_groups(trimmed);
    if !groups.is_empty() {
        let main: String = outside.split_whitespace().collect::<Vec<_>>().join(" ");
        if !main.is_empty() {
            parts.push(main);
        }
        for group in &groups {
            for item in group.split(',') {
                let item = item.trim();
                if !item.is_empty() {
                    parts.push(item.to_string());
                }
            }
        }
    }

    // First word of a multi-word name, unless it is a stop word.
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() > 1 && !STOP_WORDS.contains(&words[0].to_lowercase().as_str()) {
        parts.push(words[0].to_string());
    }

    let mut seen = HashSet::new();
    parts.retain(|p| seen.insert(p.clone()));
    parts
}

/// Split on commas at parenthesis nesting depth zero.
fn split_top_level_commas(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for ch in raw.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Split one comma-free segment on each join word in turn.
fn split_join_words(segment: &str) -> Vec<String> {
    let mut parts = vec![segment.to_string()];
    for sep in JOIN_SEPARATORS {
        let mut next = Vec::new();
        for part in parts {
            next.extend(split_on_word(&part, sep));
        }
        parts = next;
    }
    parts
}

/// Split `text` on every case-insensitive occurrence of `sep` that is
/// surrounded by whitespace.
fn split_on_word(text: &str, sep: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut from = 0;

    while let Some(idx) = find_ascii_ci(text, sep, from) {
        let before_ws = text[..idx]
            .chars()
            .next_back()
            .map_or(false, |c| c.is_whitespace());
        let after_ws = text[idx + sep.len()..]
            .chars()
            .next()
            .map_or(false, |c| c.is_whitespace());

        if before_ws && after_ws {
            pieces.push(text[start..idx].to_string());
            start = idx + sep.len();
            from = start;
        } else {
            from = idx + sep.len();
        }
    }

    pieces.push(text[start..].to_string());
    pieces
}

/// Case-insensitive byte search for an ASCII needle, starting at `from`.
/// Byte-wise so multi-byte characters around the needle cannot shift
/// indices.
fn find_ascii_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() || from > h.len() - n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Contents of each balanced top-level `(...)` group, plus the text with
/// those groups removed. An unclosed `(` keeps its text in the remainder.
fn paren_groups(text: &str) -> (Vec<String>, String) {
    let mut groups = Vec::new();
    let mut outside = String::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for ch in text.chars() {
        match ch {
            '(' => {
                if depth > 0 {
                    current.push(ch);
                }
                depth += 1;
            }
            ')' => {
                if depth > 1 {
                    current.push(ch);
                    depth -= 1;
                } else if depth == 1 {
                    groups.push(std::mem::take(&mut current));
                    depth = 0;
                }
                // unmatched ')' at depth zero is dropped
            }
            _ => {
                if depth == 0 {
                    outside.push(ch);
                } else {
                    current.push(ch);
                }
            }
        }
    }

    if depth > 0 {
        outside.push('(');
        outside.push_str(&current);
    }

    (groups, outside)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_paren_nesting() {
        let names = split_artists("Yasunori Mitsuda, ACE (TOMOri Kudo, CHiCO), Kenji Hiramatsu");
        assert_eq!(
            names,
            vec![
                "Yasunori Mitsuda",
                "ACE (TOMOri Kudo, CHiCO)",
                "Kenji Hiramatsu",
            ]
        );
    }

    #[test]
    fn test_split_no_top_level_comma_survives() {
        for raw in [
            "A, B (C, D), E",
            "Solo Artist",
            "X (Y, Z)",
            "One, Two, Three, Four",
        ] {
            for name in split_artists(raw) {
                let (_, outside) = paren_groups(&name);
                assert!(
                    !outside.contains(','),
                    "top-level comma left in segment {:?} from {:?}",
                    name,
                    raw
                );
            }
        }
    }

    #[test]
    fn test_split_join_words() {
        assert_eq!(
            split_artists("Simon & Garfunkel"),
            vec!["Simon", "Garfunkel"]
        );
        assert_eq!(
            split_artists("Artist feat. Guest"),
            vec!["Artist", "Guest"]
        );
        assert_eq!(split_artists("A ft. B featuring C"), vec!["A", "B", "C"]);
        // No whitespace around the separator → one name
        assert_eq!(split_artists("AC&DC"), vec!["AC&DC"]);
        // "ft." inside "feat." must not match
        assert_eq!(split_artists("X FEAT. Y"), vec!["X", "Y"]);
    }

    #[test]
    fn test_split_empty_and_degenerate() {
        assert!(split_artists("").is_empty());
        assert!(split_artists("  ,  , ").is_empty());
        assert_eq!(split_artists("A, , B"), vec!["A", "B"]);
        assert_eq!(split_artists("A, A, B"), vec!["A", "B"]);
    }

    #[test]
    fn test_split_unbalanced_parens_clamp() {
        // Unmatched ')' does not push depth negative; the comma still splits.
        assert_eq!(split_artists("A), B"), vec!["A)", "B"]);
    }

    #[test]
    fn test_candidates_parenthetical_collaborators() {
        assert_eq!(
            search_candidates("ACE (TOMOri Kudo, CHiCO)"),
            vec!["ACE (TOMOri Kudo, CHiCO)", "ACE", "TOMOri Kudo", "CHiCO"]
        );
    }

    #[test]
    fn test_candidates_first_word_and_stop_words() {
        assert_eq!(
            search_candidates("System of a Down"),
            vec!["System of a Down", "System"]
        );
        // Stop word first → no first-word candidate
        assert_eq!(search_candidates("The Beatles"), vec!["The Beatles"]);
    }

    #[test]
    fn test_candidates_multi_artist_priority_order() {
        let cands = search_candidates("Yasunori Mitsuda, ACE (TOMOri Kudo, CHiCO)");
        assert_eq!(
            cands,
            vec![
                "Yasunori Mitsuda",
                "Yasunori",
                "ACE (TOMOri Kudo, CHiCO)",
                "ACE",
                "TOMOri Kudo",
                "CHiCO",
            ]
        );
        // The raw unsplit credit is never itself a candidate.
        assert!(!cands.contains(&"Yasunori Mitsuda, ACE (TOMOri Kudo, CHiCO)".to_string()));
    }

    #[test]
    fn test_candidates_never_empty_strings() {
        for raw in ["", "  ", "(, )", "A (  ) B", "&"] {
            for cand in search_candidates(raw) {
                assert!(!cand.is_empty());
            }
        }
    }
}
