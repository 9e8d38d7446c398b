//! Bidirectional mapping between disease label strings and class indices.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Label encoder fitted on the training labels. Class indices follow the
/// sorted order of the unique labels, so a given label set always encodes
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    labels: Vec<String>,
}

impl LabelEncoder {
    /// Collect the sorted unique labels.
    pub fn fit(labels: &[String]) -> Self {
        let unique: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
        Self {
            labels: unique.into_iter().map(str::to_string).collect(),
        }
    }

    /// Class index for a label, if it was seen during fitting.
    pub fn transform(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Label string for a class index.
    pub fn inverse(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> LabelEncoder {
        LabelEncoder::fit(&[
            "Malaria".to_string(),
            "Common Cold".to_string(),
            "Malaria".to_string(),
            "AIDS".to_string(),
        ])
    }

    #[test]
    fn indices_follow_sorted_unique_labels() {
        let enc = fitted();
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.transform("AIDS"), Some(0));
        assert_eq!(enc.transform("Common Cold"), Some(1));
        assert_eq!(enc.transform("Malaria"), Some(2));
    }

    #[test]
    fn transform_and_inverse_round_trip() {
        let enc = fitted();
        for label in enc.labels().to_vec() {
            let idx = enc.transform(&label).unwrap();
            assert_eq!(enc.inverse(idx), Some(label.as_str()));
        }
    }

    #[test]
    fn unseen_label_is_none() {
        assert_eq!(fitted().transform("Dengue"), None);
        assert_eq!(fitted().inverse(99), None);
    }
}
