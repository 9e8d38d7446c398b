//! Disease knowledge base: descriptions, precautions and symptom severity
//! weights loaded from tabular sources.
//!
//! Loading is best-effort. A missing or malformed source degrades the
//! engine to generic descriptions and precautions; it never fails a
//! diagnosis. Hardcoded overrides guarantee entries for the two diseases
//! the augmented training data leans on regardless of source quality.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::{KnowledgeSources, GENERIC_DESCRIPTION, GENERIC_PRECAUTION};
use super::KnowledgeError;

/// In-memory disease knowledge: loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    descriptions: HashMap<String, String>,
    precautions: HashMap<String, Vec<String>>,
    severity: HashMap<String, u32>,
}

impl KnowledgeBase {
    /// Load all three tables. Infallible as a whole: each failed source is
    /// logged at warn level and contributes nothing.
    pub fn load(sources: &KnowledgeSources) -> Self {
        let mut kb = Self::default();

        match load_rows(&sources.descriptions) {
            Ok(rows) => {
                for row in rows {
                    if let (Some(disease), Some(desc)) = (row.first(), row.get(1)) {
                        kb.descriptions
                            .insert(disease.to_string(), desc.to_string());
                    }
                }
                debug!(entries = kb.descriptions.len(), "loaded disease descriptions");
            }
            Err(e) => warn!(error = %e, "description table unavailable, using defaults"),
        }

        match load_rows(&sources.precautions) {
            Ok(rows) => {
                for row in rows {
                    // Disease name plus four precaution columns.
                    if row.len() >= 5 {
                        kb.precautions.insert(
                            row[0].clone(),
                            row[1..5].iter().map(|p| p.trim().to_string()).collect(),
                        );
                    }
                }
                debug!(entries = kb.precautions.len(), "loaded disease precautions");
            }
            Err(e) => warn!(error = %e, "precaution table unavailable, using defaults"),
        }

        match load_rows(&sources.severity) {
            Ok(rows) => {
                for row in rows {
                    if let (Some(symptom), Some(weight)) = (row.first(), row.get(1)) {
                        // Rows with non-numeric weights are skipped individually.
                        if let Ok(weight) = weight.trim().parse::<u32>() {
                            kb.severity.insert(symptom.to_string(), weight);
                        }
                    }
                }
                debug!(entries = kb.severity.len(), "loaded symptom severity weights");
            }
            Err(e) => warn!(error = %e, "severity table unavailable"),
        }

        kb.apply_overrides();
        kb
    }

    /// Guarantee entries for diseases the training-data augmentation adds,
    /// which the stock tables may not cover.
    fn apply_overrides(&mut self) {
        self.descriptions.insert(
            "Influenza".into(),
            "Influenza (The Flu) is a viral infection attacking the respiratory system.".into(),
        );
        self.descriptions.insert(
            "Acute Sinusitis".into(),
            "Acute Sinusitis is the inflammation of the sinuses.".into(),
        );
        self.precautions.insert(
            "Influenza".into(),
            vec![
                "stay hydrated".into(),
                "rest".into(),
                "antiviral medication".into(),
                "monitor temperature".into(),
            ],
        );
        self.precautions.insert(
            "Acute Sinusitis".into(),
            vec![
                "steam inhalation".into(),
                "warm compress".into(),
                "saline spray".into(),
                "hydrate".into(),
            ],
        );
    }

    /// Description for a disease, falling back to the generic default.
    pub fn describe(&self, disease: &str) -> &str {
        self.descriptions
            .get(disease)
            .map(String::as_str)
            .unwrap_or(GENERIC_DESCRIPTION)
    }

    /// Up to four precautions for a disease, falling back to the generic
    /// consult-a-professional default.
    pub fn precautions(&self, disease: &str) -> Vec<String> {
        match self.precautions.get(disease) {
            Some(list) => list.clone(),
            None => vec![GENERIC_PRECAUTION.to_string()],
        }
    }

    /// Severity weight for a symptom, when the severity table provided one.
    pub fn severity(&self, symptom: &str) -> Option<u32> {
        self.severity.get(symptom).copied()
    }

    /// Number of diseases with a loaded description.
    pub fn described_diseases(&self) -> usize {
        self.descriptions.len()
    }
}

/// Read the first existing candidate as CSV, skipping the header row.
/// Returns owned string rows so callers can slice columns freely.
fn load_rows(candidates: &[PathBuf]) -> Result<Vec<Vec<String>>, KnowledgeError> {
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| KnowledgeError::NoSourceFound(candidates.to_vec()))?;
    read_table(path)
}

fn read_table(path: &Path) -> Result<Vec<Vec<String>>, KnowledgeError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    debug!(path = %path.display(), rows = rows.len(), "read knowledge table");
    Ok(rows)
}
