//! DiagnoChain inference engine: maps free-text symptom descriptions
//! (multilingual, noisy, typo-ridden) to a ranked list of candidate
//! diagnoses with confidence percentages, descriptions and precautions.
//!
//! The pipeline extracts a canonical symptom set via three complementary
//! strategies, vectorizes it against the artifact's feature schema, queries
//! a soft-voting ensemble for class probabilities, applies an ordered
//! rule-based calibration layer, then ranks, normalizes and enriches the
//! result. Decision-support aid, not a clinical authority.

pub mod config;
pub mod dataset; // feature schema derivation + augmentation
pub mod engine; // facade: bootstrap + diagnose
pub mod extraction; // exact / fuzzy / NER symptom extraction
pub mod inference; // vectorize → classify → calibrate → rank
pub mod knowledge; // descriptions, precautions, severity
pub mod model; // ensemble members, trainer, artifact

pub use engine::{DiagnosisEngine, EngineConfig, EngineError};
pub use extraction::{EntityCategory, EntityExtractor, EntityMention};
pub use inference::{DiagnosisCandidate, DiagnosisResult};
