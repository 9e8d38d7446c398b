//! The trained artifact: one opaque file bundling the fitted ensemble, the
//! label encoder and the feature vocabulary.
//!
//! Created once by the trainer, loaded read-only afterwards, never mutated
//! within a process run. The symptom→index map is derived from vocabulary
//! order on demand rather than persisted, so the two can never drift apart.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::encoder::LabelEncoder;
use super::ensemble::SoftVotingEnsemble;
use super::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Sorted canonical symptom tokens; order defines the feature layout.
    pub vocabulary: Vec<String>,
    pub encoder: LabelEncoder,
    pub ensemble: SoftVotingEnsemble,
}

impl ModelArtifact {
    /// Symptom token → feature index, derived from vocabulary order.
    pub fn symptom_index(&self) -> HashMap<String, usize> {
        self.vocabulary
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect()
    }

    /// Serialize to `path`, then verify the write by reading the file size
    /// back. Returns the artifact size in bytes.
    pub fn save(&self, path: &Path) -> Result<u64, ModelError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;

        let bytes = fs::metadata(path)
            .map_err(|e| ModelError::ArtifactUnverified(e.to_string()))?
            .len();
        info!(path = %path.display(), kib = bytes / 1024, "model artifact saved");
        Ok(bytes)
    }

    /// Load and validate an artifact. Any failure here is recoverable: the
    /// engine falls back to retraining instead of surfacing it.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = fs::File::open(path)?;
        let artifact: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        artifact.validate()?;
        info!(
            path = %path.display(),
            symptoms = artifact.vocabulary.len(),
            diseases = artifact.encoder.len(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    /// Internal consistency: non-empty vocabulary and encoder, ensemble
    /// class count matching the encoder, feature width matching the
    /// vocabulary.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.vocabulary.is_empty() {
            return Err(ModelError::ArtifactInvalid("empty vocabulary".into()));
        }
        if self.encoder.is_empty() {
            return Err(ModelError::ArtifactInvalid("empty label encoder".into()));
        }
        if self.ensemble.n_classes() != self.encoder.len() {
            return Err(ModelError::ArtifactInvalid(format!(
                "ensemble has {} classes but encoder has {} labels",
                self.ensemble.n_classes(),
                self.encoder.len()
            )));
        }
        if !self.ensemble.is_consistent() {
            return Err(ModelError::ArtifactInvalid(
                "ensemble members disagree on class count".into(),
            ));
        }
        if !self.ensemble.fits_features(self.vocabulary.len()) {
            return Err(ModelError::ArtifactInvalid(format!(
                "ensemble was fit on a different feature width than the \
                 {}-token vocabulary",
                self.vocabulary.len()
            )));
        }
        Ok(())
    }
}
