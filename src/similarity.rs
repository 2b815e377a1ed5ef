//! Fuzzy string equivalence via matching-blocks ratio.
//!
//! This is the gate that decides whether a catalog search hit is the record
//! we asked for or a coincidental hit. A false positive here writes wrong
//! genres into the output, so the threshold errs toward rejecting.
//!
//! The ratio is the Ratcliff/Obershelp measure: find the longest common
//! block, recurse on the pieces to its left and right, and score
//! 2·matched / (len(a) + len(b)).

use crate::text::normalize;

/// Default acceptance threshold for catalog match verification.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Similarity ratio in [0, 1] between two raw strings.
/// Two empty strings compare as identical (1.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// True when `a` and `b` are the same title/name up to punctuation, case
/// and whitespace noise. Either input empty → false, regardless of
/// threshold.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    ratio(&normalize(a), &normalize(b)) >= threshold
}

/// Total characters covered by the matching blocks of `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (ai, bi, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_chars(&a[..ai], &b[..bi]) + matched_chars(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block, preferring the earliest start in `a`
/// (then in `b`) on ties. Returns (start in a, start in b, length).
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j+1] = length of the common suffix ending at a[i-1], b[j]
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = cur;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert_eq!(ratio("abcd", "abcd"), 1.0);
        assert_eq!(ratio("abcd", "efgh"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn test_ratio_formula() {
        // Longest block "bcd" (3 chars matched): 2*3 / (4+4) = 0.75
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // "ab" vs "abx": block "ab", 2*2 / (2+3) = 0.8
        assert!((ratio("ab", "abx") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_recurses_around_longest_block() {
        // Longest block "ccc", then "a" matches in the left remainder:
        // 2*(3+1) / (5+5) = 0.8
        assert!((ratio("axccc", "ayccc") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_is_similar_normalizes_first() {
        assert!(is_similar("Test Album", "test   album!!", 0.8));
        assert!(is_similar("AC/DC", "ACDC", 0.8));
        assert!(!is_similar("Test Album", "Completely Different", 0.8));
    }

    #[test]
    fn test_is_similar_empty_inputs() {
        assert!(!is_similar("", "anything", 0.0));
        assert!(!is_similar("anything", "", 0.0));
        assert!(!is_similar("", "", 0.0));
    }

    #[test]
    fn test_is_similar_threshold_is_per_call() {
        // ratio("abcd","bcde") = 0.75
        assert!(is_similar("abcd", "bcde", 0.7));
        assert!(!is_similar("abcd", "bcde", 0.8));
    }
}
