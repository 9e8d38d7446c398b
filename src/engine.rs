//! The diagnosis engine facade: owns the immutable trained artifact, the
//! knowledge base and the optional NER capability, and exposes the single
//! `diagnose` entry point.
//!
//! Bootstrap is the one-time, exclusive "ensure model exists" step: load
//! the artifact when present, retrain from the dataset when loading fails
//! or no artifact exists. After bootstrap the engine is read-only shared
//! state; `diagnose` is synchronous and stateless per call, so no locking
//! is needed.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::config;
use crate::dataset::{augment, DatasetError, TrainingTable};
use crate::extraction::EntityExtractor;
use crate::inference::{self, DiagnosisResult, InferenceError};
use crate::knowledge::{KnowledgeBase, KnowledgeSources};
use crate::model::{trainer, ModelArtifact, ModelError, TrainConfig};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Single read/write slot for the serialized artifact.
    pub model_path: PathBuf,
    /// Candidate locations of the raw training table; first existing wins.
    pub dataset_paths: Vec<PathBuf>,
    pub knowledge: KnowledgeSources,
    pub train: TrainConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: config::default_model_path(),
            dataset_paths: config::default_dataset_candidates(),
            knowledge: KnowledgeSources::default(),
            train: TrainConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl EngineError {
    /// Machine-readable reason string for the outer transport layer.
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::Dataset(_) => "dataset_unavailable",
            EngineError::Model(_) => "model_unavailable",
            EngineError::Inference(e) => e.reason(),
        }
    }
}

pub struct DiagnosisEngine {
    artifact: ModelArtifact,
    symptom_index: HashMap<String, usize>,
    knowledge: KnowledgeBase,
    ner: Option<Box<dyn EntityExtractor>>,
}

impl DiagnosisEngine {
    /// Ensure a model exists, then assemble the engine. Exactly one caller
    /// should run this; concurrent bootstraps would race on training.
    pub fn bootstrap(
        config: &EngineConfig,
        ner: Option<Box<dyn EntityExtractor>>,
    ) -> Result<Self, EngineError> {
        let artifact = if config.model_path.exists() {
            match ModelArtifact::load(&config.model_path) {
                Ok(artifact) => artifact,
                Err(e) => {
                    // Load failures are recoverable by design: retrain.
                    warn!(error = %e, "artifact load failed; retraining from scratch");
                    Self::train_fresh(config)?
                }
            }
        } else {
            info!(path = %config.model_path.display(), "no artifact found; training");
            Self::train_fresh(config)?
        };

        let symptom_index = artifact.symptom_index();
        let knowledge = KnowledgeBase::load(&config.knowledge);
        info!(
            symptoms = artifact.vocabulary.len(),
            diseases = artifact.encoder.len(),
            described = knowledge.described_diseases(),
            "diagnosis engine ready"
        );

        Ok(Self {
            artifact,
            symptom_index,
            knowledge,
            ner,
        })
    }

    fn train_fresh(config: &EngineConfig) -> Result<ModelArtifact, EngineError> {
        let mut table = TrainingTable::load(&config.dataset_paths)?;
        augment::apply(&mut table, config.train.seed);
        let (artifact, report) = trainer::train(&table, &config.train, &config.model_path)?;
        info!(
            accuracy = format!("{:.2}%", report.held_out_accuracy * 100.0),
            bytes = report.artifact_bytes,
            "training complete"
        );
        Ok(artifact)
    }

    /// Map free text to a ranked, enriched diagnosis result.
    pub fn diagnose(&self, text: &str) -> Result<DiagnosisResult, EngineError> {
        inference::diagnose(
            text,
            &self.artifact,
            &self.symptom_index,
            &self.knowledge,
            self.ner.as_deref(),
        )
        .map_err(EngineError::from)
    }

    /// The canonical symptom vocabulary baked into the artifact.
    pub fn vocabulary(&self) -> &[String] {
        &self.artifact.vocabulary
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
}
