//! Feature schema derivation and one-hot encoding of the raw
//! disease/symptom table.
//!
//! The table has no header: column 0 is the disease label, the remaining
//! variable-arity columns are free-text symptom names. The canonical
//! symptom vocabulary is derived from the table itself — sorted and
//! deduplicated — and its order defines the feature-vector layout for the
//! lifetime of a trained artifact.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::{debug, info};

use super::DatasetError;

/// Canonicalize a raw symptom name: trim, lowercase, spaces to underscores.
pub fn normalize_symptom(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Encoded training data: a fixed vocabulary plus labeled binary rows.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    /// Sorted, deduplicated canonical symptom tokens. Order is the feature
    /// schema and must stay stable for the artifact's lifetime.
    pub vocabulary: Vec<String>,
    /// One disease label per row.
    pub labels: Vec<String>,
    /// Binary presence vectors, parallel to `labels`, one flag per
    /// vocabulary entry.
    pub rows: Vec<Vec<u8>>,
}

impl TrainingTable {
    /// Load and encode the first existing candidate path.
    /// No existing candidate is fatal: training cannot proceed.
    pub fn load(candidates: &[PathBuf]) -> Result<Self, DatasetError> {
        let path = candidates
            .iter()
            .find(|p| p.exists())
            .ok_or_else(|| DatasetError::DatasetUnavailable(candidates.to_vec()))?;
        info!(path = %path.display(), "loading training dataset");
        Self::from_path(path)
    }

    fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)?;

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            // Fully blank lines carry nothing.
            if row.iter().any(|f| !f.trim().is_empty()) {
                raw_rows.push(row);
            }
        }
        Self::from_raw_rows(&raw_rows)
    }

    /// Encode pre-split raw rows (label + free-text symptom columns).
    pub fn from_raw_rows(raw_rows: &[Vec<String>]) -> Result<Self, DatasetError> {
        // Pass 1: derive the vocabulary. BTreeSet gives the sorted,
        // deduplicated ordering directly.
        let mut symptoms: BTreeSet<String> = BTreeSet::new();
        for row in raw_rows {
            for field in row.iter().skip(1) {
                let token = normalize_symptom(field);
                if !token.is_empty() {
                    symptoms.insert(token);
                }
            }
        }
        let vocabulary: Vec<String> = symptoms.into_iter().collect();
        debug!(symptoms = vocabulary.len(), "derived symptom vocabulary");

        // Pass 2: one-hot encode every labeled row.
        let mut labels = Vec::new();
        let mut rows = Vec::new();
        for row in raw_rows {
            let disease = match row.first() {
                Some(label) if !label.trim().is_empty() => label.trim().to_string(),
                _ => continue,
            };
            let mut vector = vec![0u8; vocabulary.len()];
            for field in row.iter().skip(1) {
                let token = normalize_symptom(field);
                if let Ok(idx) = vocabulary.binary_search(&token) {
                    vector[idx] = 1;
                }
            }
            labels.push(disease);
            rows.push(vector);
        }

        if rows.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }
        info!(rows = rows.len(), features = vocabulary.len(), "encoded training table");
        Ok(Self { vocabulary, labels, rows })
    }

    /// Position of a canonical symptom in the vocabulary.
    pub fn symptom_position(&self, token: &str) -> Option<usize> {
        self.vocabulary.binary_search(&token.to_string()).ok()
    }

    /// Feature matrix view of the rows for the classifiers.
    pub fn to_matrix(&self) -> Array2<f64> {
        let n = self.rows.len();
        let d = self.vocabulary.len();
        let mut x = Array2::zeros((n, d));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &flag) in row.iter().enumerate() {
                x[[i, j]] = f64::from(flag);
            }
        }
        x
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
