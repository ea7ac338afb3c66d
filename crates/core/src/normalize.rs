//! Placeholder token normalization.
//!
//! Template authors type `{{ Ville }}` as often as `{{Ville}}`, and accented
//! names may arrive composed or decomposed depending on the editor. Lookups
//! go through the helpers here so that such variants find each other.

use unicode_normalization::UnicodeNormalization;

/// Opening delimiter of a placeholder token.
pub const OPEN: &str = "{{";

/// Closing delimiter of a placeholder token.
pub const CLOSE: &str = "}}";

/// Trim the whitespace just inside the delimiters.
///
/// `"{{  Surface }}"` becomes `"{{Surface}}"`. Text that is not a single
/// delimited token is returned unchanged.
pub fn normalize_placeholder(token: &str) -> String {
    match token
        .strip_prefix(OPEN)
        .and_then(|rest| rest.strip_suffix(CLOSE))
    {
        Some(inner) => format!("{}{}{}", OPEN, inner.trim(), CLOSE),
        None => token.to_string(),
    }
}

/// Key used for loose comparisons: NFC-composed and lowercased.
pub fn fold_key(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_inner_whitespace() {
        assert_eq!(normalize_placeholder("{{  Surface }}"), "{{Surface}}");
        assert_eq!(normalize_placeholder("{{Ville}}"), "{{Ville}}");
        assert_eq!(normalize_placeholder("{{ Maitre Ouvrage }}"), "{{Maitre Ouvrage}}");
    }

    #[test]
    fn test_normalize_leaves_other_text() {
        assert_eq!(normalize_placeholder("IMAGE_PROJET"), "IMAGE_PROJET");
        assert_eq!(normalize_placeholder("{{open"), "{{open");
        assert_eq!(normalize_placeholder(" {{x}}"), " {{x}}");
    }

    #[test]
    fn test_short_token() {
        // "{{}" has overlapping delimiters and is not a token
        assert_eq!(normalize_placeholder("{{}"), "{{}");
        assert_eq!(normalize_placeholder("{{}}"), "{{}}");
    }

    #[test]
    fn test_fold_key_composes_and_lowercases() {
        assert_eq!(fold_key("{{SURFACE}}"), "{{surface}}");
        assert_eq!(fold_key("E\u{0301}tage"), fold_key("\u{00C9}tage"));
    }
}
