//! Feature-vector construction from an extracted symptom set.

use std::collections::{BTreeSet, HashMap};

use ndarray::Array1;
use tracing::debug;

/// Build the binary feature vector for the extracted set. Symptoms absent
/// from the index carry no signal the model understands and are silently
/// ignored.
pub fn vectorize(
    symptoms: &BTreeSet<String>,
    index: &HashMap<String, usize>,
    dimension: usize,
) -> Array1<f64> {
    let mut vector = Array1::zeros(dimension);
    let mut mapped = 0usize;
    for symptom in symptoms {
        if let Some(&i) = index.get(symptom) {
            vector[i] = 1.0;
            mapped += 1;
        }
    }
    debug!(extracted = symptoms.len(), mapped, "vectorized symptom set");
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> HashMap<String, usize> {
        [("chills", 0), ("cough", 1), ("high_fever", 2)]
            .iter()
            .map(|(s, i)| (s.to_string(), *i))
            .collect()
    }

    fn set(symptoms: &[&str]) -> BTreeSet<String> {
        symptoms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_symptoms_set_their_positions() {
        let v = vectorize(&set(&["cough", "high_fever"]), &index(), 3);
        assert_eq!(v.to_vec(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn unknown_symptoms_are_silently_ignored() {
        let v = vectorize(&set(&["cough", "glowing_aura"]), &index(), 3);
        assert_eq!(v.to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_set_is_all_zero() {
        let v = vectorize(&set(&[]), &index(), 3);
        assert_eq!(v.sum(), 0.0);
    }
}
