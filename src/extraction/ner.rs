//! Named-entity extraction capability, consumed as an opaque contract.
//!
//! The engine only depends on `EntityExtractor`: text in, labeled spans
//! out. Two implementations ship: `SidecarExtractor` talks to a local
//! biomedical-NER HTTP sidecar, `LexiconExtractor` is a dictionary matcher
//! that works offline and keeps tests hermetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::preprocess::normalize_text;

/// Entity categories the sidecar model emits. Only the first three denote
/// symptom-bearing spans; everything else is ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    #[serde(rename = "Sign_symptom")]
    SignSymptom,
    #[serde(rename = "Diagnostic_procedure")]
    DiagnosticProcedure,
    #[serde(rename = "Biological_structure")]
    BiologicalStructure,
    #[serde(other)]
    Other,
}

impl EntityCategory {
    /// Whether the engine treats spans of this category as symptom signal.
    pub fn is_symptom_bearing(self) -> bool {
        !matches!(self, EntityCategory::Other)
    }
}

/// One extracted entity span with its category label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMention {
    pub span: String,
    pub category: EntityCategory,
}

#[derive(Error, Debug)]
pub enum NerError {
    #[error("cannot reach NER sidecar at {0}")]
    Connection(String),

    #[error("NER sidecar returned HTTP {status}: {body}")]
    Sidecar { status: u16, body: String },

    #[error("NER response could not be decoded: {0}")]
    Decode(String),
}

/// The extraction capability contract. Calls block; callers needing
/// responsiveness guarantees impose their own timeout around the whole
/// inference call. No retries happen at this layer.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<EntityMention>, NerError>;
}

// ── HTTP sidecar adapter ────────────────────────────────────────────────────

#[derive(Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    entities: Vec<EntityMention>,
}

/// Blocking HTTP client for a local NER sidecar exposing `POST /extract`.
pub struct SidecarExtractor {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl SidecarExtractor {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, NerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NerError::Connection(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Default sidecar at localhost:8600 with a 60-second timeout.
    pub fn default_local() -> Result<Self, NerError> {
        Self::new("http://localhost:8600", 60)
    }
}

impl EntityExtractor for SidecarExtractor {
    fn extract(&self, text: &str) -> Result<Vec<EntityMention>, NerError> {
        let url = format!("{}/extract", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ExtractRequest { text })
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    NerError::Connection(self.base_url.clone())
                } else {
                    NerError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NerError::Sidecar {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: ExtractResponse = response
            .json()
            .map_err(|e| NerError::Decode(e.to_string()))?;
        Ok(decoded.entities)
    }
}

// ── Offline dictionary fallback ─────────────────────────────────────────────

/// Surface terms the offline extractor recognizes, with their categories.
/// Multi-word terms stay space-separated; matching runs on normalized text.
const LEXICON: &[(&str, EntityCategory)] = &[
    ("abdominal pain", EntityCategory::SignSymptom),
    ("blood pressure", EntityCategory::DiagnosticProcedure),
    ("breathlessness", EntityCategory::SignSymptom),
    ("chest pain", EntityCategory::SignSymptom),
    ("chills", EntityCategory::SignSymptom),
    ("cough", EntityCategory::SignSymptom),
    ("diarrhoea", EntityCategory::SignSymptom),
    ("dizziness", EntityCategory::SignSymptom),
    ("fatigue", EntityCategory::SignSymptom),
    ("headache", EntityCategory::SignSymptom),
    ("high fever", EntityCategory::SignSymptom),
    ("itching", EntityCategory::SignSymptom),
    ("joint pain", EntityCategory::SignSymptom),
    ("muscle pain", EntityCategory::SignSymptom),
    ("nausea", EntityCategory::SignSymptom),
    ("runny nose", EntityCategory::SignSymptom),
    ("sinus pressure", EntityCategory::SignSymptom),
    ("skin rash", EntityCategory::SignSymptom),
    ("stomach pain", EntityCategory::SignSymptom),
    ("sweating", EntityCategory::SignSymptom),
    ("throat", EntityCategory::BiologicalStructure),
    ("vomiting", EntityCategory::SignSymptom),
];

/// Dictionary-based extractor: finds lexicon terms by containment in the
/// normalized text. Deterministic, dependency-free, used when no sidecar
/// is configured and throughout the test suite.
#[derive(Debug, Default, Clone)]
pub struct LexiconExtractor;

impl EntityExtractor for LexiconExtractor {
    fn extract(&self, text: &str) -> Result<Vec<EntityMention>, NerError> {
        let normalized = normalize_text(text);
        Ok(LEXICON
            .iter()
            .filter(|(term, _)| normalized.contains(term))
            .map(|&(term, category)| EntityMention {
                span: term.to_string(),
                category,
            })
            .collect())
    }
}
