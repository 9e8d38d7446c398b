use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::NerError;

/// Tuning constants of the shortlist/calibration pipeline.
pub mod limits {
    /// Raw classification candidates taken before calibration.
    pub const SHORTLIST_SIZE: usize = 5;

    /// Probabilities at or below this are noise-level and never shortlisted.
    pub const NOISE_FLOOR: f64 = 0.001;

    /// Candidates surviving into the final ranked result.
    pub const MAX_CANDIDATES: usize = 3;

    /// Synthetic candidate emitted when calibration filters everything out.
    pub const FALLBACK_DISEASE: &str = "Viral Fever";

    /// Raw confidence of the synthetic fallback candidate.
    pub const FALLBACK_CONFIDENCE: f64 = 50.0;
}

/// A shortlisted disease with its (calibrating) confidence. Internal to the
/// pipeline; enrichment turns it into a `DiagnosisCandidate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistEntry {
    pub disease: String,
    pub confidence: f64,
}

/// One ranked diagnosis with its knowledge-base enrichment. Confidence is a
/// percentage in [0,100]; all candidates of a result sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub disease: String,
    pub confidence: f64,
    pub description: String,
    pub precautions: Vec<String>,
}

/// The terminal output of one inference call: the primary diagnosis plus up
/// to two alternatives, and the symptom set the decision was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub symptoms_detected: Vec<String>,
    pub primary: DiagnosisCandidate,
    pub alternatives: Vec<DiagnosisCandidate>,
}

impl DiagnosisResult {
    /// Primary followed by alternatives, in rank order.
    pub fn candidates(&self) -> impl Iterator<Item = &DiagnosisCandidate> {
        std::iter::once(&self.primary).chain(self.alternatives.iter())
    }

    pub fn candidate_count(&self) -> usize {
        1 + self.alternatives.len()
    }
}

#[derive(Error, Debug)]
pub enum InferenceError {
    /// User-actionable: the text contained nothing any strategy recognized.
    #[error("no recognizable symptoms; list symptoms clearly (e.g. \"fever and cough\")")]
    NoSymptoms,

    /// The artifact is missing parts or inconsistent; inference cannot run.
    #[error("model artifact unusable: {0}")]
    ArtifactInvalid(String),

    /// Classification produced output disagreeing with the artifact schema.
    #[error("classification failed: {0}")]
    Classification(String),

    #[error(transparent)]
    Ner(#[from] NerError),
}

impl InferenceError {
    /// Machine-readable reason string for the outer transport layer.
    pub fn reason(&self) -> &'static str {
        match self {
            InferenceError::NoSymptoms => "no_symptoms",
            InferenceError::ArtifactInvalid(_) => "model_unavailable",
            InferenceError::Classification(_) => "classification_failure",
            InferenceError::Ner(_) => "extraction_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(disease: &str, confidence: f64) -> DiagnosisCandidate {
        DiagnosisCandidate {
            disease: disease.into(),
            confidence,
            description: String::new(),
            precautions: vec![],
        }
    }

    #[test]
    fn candidates_iterate_in_rank_order() {
        let result = DiagnosisResult {
            symptoms_detected: vec!["cough".into()],
            primary: candidate("Influenza", 60.0),
            alternatives: vec![candidate("Common Cold", 40.0)],
        };
        let diseases: Vec<&str> = result.candidates().map(|c| c.disease.as_str()).collect();
        assert_eq!(diseases, vec!["Influenza", "Common Cold"]);
        assert_eq!(result.candidate_count(), 2);
    }

    #[test]
    fn reasons_are_machine_readable() {
        assert_eq!(InferenceError::NoSymptoms.reason(), "no_symptoms");
        assert_eq!(
            InferenceError::ArtifactInvalid("x".into()).reason(),
            "model_unavailable"
        );
    }

    #[test]
    fn result_serializes_for_the_transport_layer() {
        let result = DiagnosisResult {
            symptoms_detected: vec!["high_fever".into()],
            primary: candidate("Viral Fever", 100.0),
            alternatives: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"primary\""));
        assert!(json.contains("Viral Fever"));
    }
}
