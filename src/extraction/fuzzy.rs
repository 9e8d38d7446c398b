//! Approximate lexical matching for typo tolerance.
//!
//! Similarity is Levenshtein-derived and normalized to [0,1]; the 0.80
//! cutoff keeps "headach" → "headache" while rejecting loose pairs like
//! "chest" → "chills". Ties resolve to the earliest candidate, so the
//! match is deterministic as long as the candidate order is.

/// Minimum word length worth fuzzy-matching. Shorter words ("a", "the",
/// "flu" typos) produce too many false positives.
pub const MIN_WORD_LEN: usize = 4;

/// Default similarity cutoff.
pub const SIMILARITY_CUTOFF: f64 = 0.80;

/// Normalized similarity: 1 − edit_distance / max(len).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let longest = a_len.max(b_len);
    if longest == 0 {
        return 1.0;
    }
    1.0 - f64::from(edit_distance(a, b)) / longest as f64
}

/// Best candidate with similarity ≥ `cutoff`, or `None`. At most one match
/// per word; ties keep the first candidate seen.
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let word_len = word.chars().count();
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        // Length pre-filter: the edit distance is at least the length gap,
        // so a large enough gap can never reach the cutoff.
        let cand_len = candidate.chars().count();
        let longest = word_len.max(cand_len);
        if longest > 0 {
            let gap = word_len.abs_diff(cand_len);
            if 1.0 - gap as f64 / (longest as f64) < cutoff {
                continue;
            }
        }

        let score = similarity(word, candidate);
        if score >= cutoff && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Levenshtein edit distance, two-row rolling computation.
fn edit_distance(a: &str, b: &str) -> u32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    if a_chars.is_empty() {
        return n as u32;
    }
    if n == 0 {
        return a_chars.len() as u32;
    }

    let mut prev: Vec<u32> = (0..=n as u32).collect();
    let mut curr = vec![0u32; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = (i + 1) as u32;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = u32::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}
