//! Static multilingual phrase dictionary mapping surface phrases to
//! canonical symptom tokens.
//!
//! Covers English colloquialisms, Bahasa Melayu translations and the
//! blister/scab group that disambiguates Chickenpox from Impetigo. The
//! table is immutable; entries are sorted by phrase so lookups can binary
//! search and iteration order is deterministic.

use std::sync::LazyLock;

/// (surface phrase, canonical token), sorted by phrase.
static PHRASE_MAP: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut entries = vec![
        // --- English synonyms ---
        ("stomach ache", "stomach_pain"),
        ("belly pain", "stomach_pain"),
        ("fever", "high_fever"),
        ("high temp", "high_fever"),
        ("chest pain", "chest_pain"),
        ("chest tight", "chest_pain"),
        ("coughing", "cough"),
        ("flu", "influenza"),
        ("weakness", "fatigue"),
        ("tired", "fatigue"),
        ("dizzy", "dizziness"),
        ("headache", "headache"),
        ("sore throat", "throat_irritation"),
        ("pain behind eyes", "pain_behind_the_eyes"),
        ("joint pain", "joint_pain"),
        ("runny nose", "runny_nose"),
        ("sinus", "sinus_pressure"),
        ("sneezing", "continuous_sneezing"),
        ("chills", "chills"),
        ("red eyes", "redness_of_eyes"),
        ("vomit", "vomiting"),
        ("throwing up", "vomiting"),
        // --- Bahasa Melayu ---
        ("demam", "high_fever"),
        ("panas badan", "high_fever"),
        ("badan panas", "high_fever"),
        ("batuk", "cough"),
        ("uhuk", "cough"),
        ("sakit kepala", "headache"),
        ("pening", "headache"),
        ("kepala sakit", "headache"),
        ("selesema", "runny_nose"),
        ("hidung berair", "runny_nose"),
        ("hingus", "runny_nose"),
        ("bersin", "continuous_sneezing"),
        ("menggigil", "chills"),
        ("sejuk", "chills"),
        ("penat", "fatigue"),
        ("letih", "fatigue"),
        ("lesu", "fatigue"),
        ("badan lemah", "fatigue"),
        ("sakit dada", "chest_pain"),
        ("dada sakit", "chest_pain"),
        ("sesak nafas", "breathlessness"),
        ("sakit tekak", "throat_irritation"),
        ("perit tekak", "throat_irritation"),
        ("sakit sendi", "joint_pain"),
        ("lenguh", "joint_pain"),
        ("muntah", "vomiting"),
        ("loya", "nausea"),
        ("cirit", "diarrhoea"),
        ("cirit birit", "diarrhoea"),
        ("sakit perut", "stomach_pain"),
        ("ruam", "skin_rash"),
        ("gatal", "itching"),
        ("mata merah", "redness_of_eyes"),
        ("sakit mata", "pain_behind_the_eyes"),
        ("resdung", "sinus_pressure"),
        ("hidung tersumbat", "congestion"),
        // --- Chickenpox vs Impetigo disambiguators ---
        ("blister", "red_spots_over_body"),
        ("blisters", "red_spots_over_body"),
        ("scab", "red_spots_over_body"),
        ("scabs", "red_spots_over_body"),
        ("crust", "red_spots_over_body"),
        ("crusting", "red_spots_over_body"),
        ("red spots", "red_spots_over_body"),
        ("rash", "skin_rash"),
        ("skin rash", "skin_rash"),
        ("loss of appetite", "loss_of_appetite"),
    ];
    entries.sort_by_key(|(phrase, _)| *phrase);
    entries.dedup_by_key(|(phrase, _)| *phrase);
    entries
});

/// All (phrase, token) pairs in deterministic (sorted) order.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    &PHRASE_MAP
}

/// Canonical token for an exact phrase key, if present.
pub fn lookup(phrase: &str) -> Option<&'static str> {
    PHRASE_MAP
        .binary_search_by(|(key, _)| (*key).cmp(phrase))
        .ok()
        .map(|i| PHRASE_MAP[i].1)
}

/// Phrase keys in deterministic order, for the fuzzy candidate pool.
pub fn phrases() -> impl Iterator<Item = &'static str> {
    PHRASE_MAP.iter().map(|(phrase, _)| *phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_and_malay_map_to_same_token() {
        assert_eq!(lookup("fever"), Some("high_fever"));
        assert_eq!(lookup("demam"), Some("high_fever"));
        assert_eq!(lookup("batuk"), Some("cough"));
    }

    #[test]
    fn unknown_phrase_is_none() {
        assert_eq!(lookup("no such phrase"), None);
    }

    #[test]
    fn entries_are_sorted_and_unique() {
        let phrases: Vec<&str> = phrases().collect();
        let mut sorted = phrases.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(phrases, sorted);
    }

    #[test]
    fn every_entry_maps_to_canonical_form() {
        for (_, token) in entries() {
            assert!(!token.is_empty());
            assert!(!token.contains(' '), "token {token} is not canonical");
            assert_eq!(*token, token.to_lowercase());
        }
    }
}
