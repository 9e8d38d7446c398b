//! Text normalization shared by the extraction strategies.

/// Lowercase and strip the punctuation that separates symptom phrases in
/// free text. Hyphens, commas and periods become spaces so phrase matching
/// sees "fever, cough" and "fever cough" identically.
pub fn normalize_text(input: &str) -> String {
    input
        .to_lowercase()
        .replace(['-', ',', '.'], " ")
}

/// Whitespace tokens of an already-normalized text.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// Canonicalize an arbitrary span into vocabulary form: trim, lowercase,
/// internal whitespace runs to single underscores.
pub fn canonicalize_span(span: &str) -> String {
    span.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_replaces_separators() {
        assert_eq!(normalize_text("Fever, head-ache."), "fever  head ache ");
    }

    #[test]
    fn tokenize_skips_empty_runs() {
        let tokens: Vec<&str> = tokenize("fever  head ache ").collect();
        assert_eq!(tokens, vec!["fever", "head", "ache"]);
    }

    #[test]
    fn spans_canonicalize_to_vocabulary_form() {
        assert_eq!(canonicalize_span("  High   Fever "), "high_fever");
        assert_eq!(canonicalize_span("cough"), "cough");
        assert_eq!(canonicalize_span(""), "");
    }
}
