//! Free-text normalization for catalog string comparison.
//!
//! Catalog titles arrive with inconsistent punctuation, casing and spacing
//! ("Endtroducing.....", "ENDTRODUCING "). All similarity checks run on the
//! normalized form.

/// Canonicalize a string for comparison: drop everything that is not
/// alphanumeric or whitespace, collapse whitespace runs, lowercase.
///
/// `normalize("Test   Album!!")` → `"test album"`. Empty input → `""`.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Test Album"), "test album");
        assert_eq!(normalize("test   album!!"), "test album");
        assert_eq!(normalize("  AC/DC  "), "acdc");
        assert_eq!(normalize("R&B, Soul"), "rb soul");
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!???"), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in [
            "Test Album",
            "test   album!!",
            "Yasunori Mitsuda, ACE (TOMOri Kudo, CHiCO)",
            "",
            "ümlaut Ünicode",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize("Sigur Rós"), "sigur rós");
    }
}
