//! Symptom extraction: three complementary strategies unioned into one
//! deduplicated set of canonical tokens.
//!
//! 1. Exact multilingual phrase matching against the synonym dictionary.
//! 2. Fuzzy word matching against synonym keys and vocabulary tokens.
//! 3. Delegated named-entity extraction, filtered to symptom-bearing
//!    categories. Spans are canonicalized to vocabulary form before they
//!    join the set (see DESIGN.md on this deliberate normalization).
//!
//! No strategy is authoritative alone; an empty union is the caller's
//! signal to fail fast rather than classify an all-zero vector.

use std::collections::BTreeSet;

use tracing::debug;

use super::fuzzy::{self, MIN_WORD_LEN, SIMILARITY_CUTOFF};
use super::ner::{EntityExtractor, NerError};
use super::preprocess::{canonicalize_span, normalize_text, tokenize};
use super::synonyms;

/// Extract the canonical symptom set from free text. A `BTreeSet` keeps
/// the result ordered and deduplicated, so downstream vectorization is
/// deterministic.
pub fn extract_symptoms(
    text: &str,
    vocabulary: &[String],
    ner: Option<&dyn EntityExtractor>,
) -> Result<BTreeSet<String>, NerError> {
    let mut extracted = BTreeSet::new();
    if text.trim().is_empty() {
        return Ok(extracted);
    }
    let normalized = normalize_text(text);

    // Strategy 1: exact phrase containment, every dictionary entry tested.
    for (phrase, token) in synonyms::entries() {
        if normalized.contains(phrase) {
            extracted.insert((*token).to_string());
        }
    }

    // Strategy 2: fuzzy matching of individual words against synonym keys
    // and vocabulary tokens; at most one match per word.
    let mut pool: Vec<&str> = synonyms::phrases().collect();
    pool.extend(vocabulary.iter().map(String::as_str));
    for word in tokenize(&normalized) {
        if word.chars().count() < MIN_WORD_LEN {
            continue;
        }
        if let Some(matched) = fuzzy::closest_match(word, pool.iter().copied(), SIMILARITY_CUTOFF) {
            // A synonym key resolves through the dictionary; a vocabulary
            // token is accepted directly.
            match synonyms::lookup(matched) {
                Some(token) => extracted.insert(token.to_string()),
                None => extracted.insert(matched.to_string()),
            };
        }
    }

    // Strategy 3: delegated NER, symptom-bearing categories only.
    if let Some(extractor) = ner {
        let mentions = extractor.extract(text)?;
        debug!(count = mentions.len(), "NER extraction returned mentions");
        for mention in mentions {
            if !mention.category.is_symptom_bearing() {
                continue;
            }
            let token = canonicalize_span(&mention.span);
            if !token.is_empty() {
                extracted.insert(token);
            }
        }
    }

    debug!(symptoms = extracted.len(), "extraction union complete");
    Ok(extracted)
}
