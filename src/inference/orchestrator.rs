//! The inference state machine:
//! EXTRACT → VECTORIZE → CLASSIFY → SHORTLIST → CALIBRATE → RANK_FILTER →
//! NORMALIZE → ENRICH.
//!
//! Past the no-symptoms gate the pipeline always yields a non-empty,
//! normalized result: if calibration filters every candidate out, a
//! synthetic generic candidate takes their place.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::extraction::{extract_symptoms, EntityExtractor};
use crate::knowledge::KnowledgeBase;
use crate::model::ModelArtifact;

use super::calibration;
use super::types::{
    limits, DiagnosisCandidate, DiagnosisResult, InferenceError, ShortlistEntry,
};
use super::vectorize::vectorize;

/// Full inference over raw text.
pub fn diagnose(
    text: &str,
    artifact: &ModelArtifact,
    symptom_index: &HashMap<String, usize>,
    kb: &KnowledgeBase,
    ner: Option<&dyn EntityExtractor>,
) -> Result<DiagnosisResult, InferenceError> {
    let symptoms = extract_symptoms(text, &artifact.vocabulary, ner)?;
    diagnose_symptoms(&symptoms, artifact, symptom_index, kb)
}

/// Inference over an already-extracted symptom set. Fails fast on an empty
/// set — an all-zero vector must never reach the classifier.
pub fn diagnose_symptoms(
    symptoms: &BTreeSet<String>,
    artifact: &ModelArtifact,
    symptom_index: &HashMap<String, usize>,
    kb: &KnowledgeBase,
) -> Result<DiagnosisResult, InferenceError> {
    if symptoms.is_empty() {
        return Err(InferenceError::NoSymptoms);
    }

    let vector = vectorize(symptoms, symptom_index, artifact.vocabulary.len());
    let probs = artifact.ensemble.predict_proba(vector.view());
    if probs.len() != artifact.encoder.len() {
        return Err(InferenceError::Classification(format!(
            "{} class probabilities for {} labels",
            probs.len(),
            artifact.encoder.len()
        )));
    }

    let mut shortlist = shortlist_from_probs(probs.as_slice().unwrap_or(&[]), artifact)?;
    debug!(candidates = shortlist.len(), "shortlist before calibration");

    calibration::apply(&mut shortlist, symptoms);
    let ranked = rank_filter(shortlist);
    let normalized = normalize(ranked);

    Ok(enrich(normalized, symptoms, kb))
}

/// Top-K classes by probability, noise floor applied.
fn shortlist_from_probs(
    probs: &[f64],
    artifact: &ModelArtifact,
) -> Result<Vec<ShortlistEntry>, InferenceError> {
    let mut indexed: Vec<(usize, f64)> = probs.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    indexed
        .into_iter()
        .take(limits::SHORTLIST_SIZE)
        .filter(|(_, p)| *p > limits::NOISE_FLOOR)
        .map(|(class, p)| {
            let disease = artifact.encoder.inverse(class).ok_or_else(|| {
                InferenceError::ArtifactInvalid(format!("class {class} missing from encoder"))
            })?;
            Ok(ShortlistEntry {
                disease: disease.to_string(),
                confidence: p,
            })
        })
        .collect()
}

/// Re-rank by adjusted confidence, drop non-positive candidates, cap at
/// three. The synthetic fallback keeps the non-empty-result contract when
/// calibration filtered everything out.
fn rank_filter(mut shortlist: Vec<ShortlistEntry>) -> Vec<ShortlistEntry> {
    shortlist.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    shortlist.retain(|e| e.confidence > 0.0);
    shortlist.truncate(limits::MAX_CANDIDATES);

    if shortlist.is_empty() {
        debug!("all candidates filtered out; emitting generic fallback");
        shortlist.push(ShortlistEntry {
            disease: limits::FALLBACK_DISEASE.to_string(),
            confidence: limits::FALLBACK_CONFIDENCE,
        });
    }
    shortlist
}

/// Rescale confidences to percentages summing to 100, two decimals.
fn normalize(mut candidates: Vec<ShortlistEntry>) -> Vec<ShortlistEntry> {
    let total: f64 = candidates.iter().map(|e| e.confidence).sum();
    if total > 0.0 {
        for entry in &mut candidates {
            entry.confidence = round2(entry.confidence / total * 100.0);
        }
    }
    candidates
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Attach knowledge-base descriptions and precautions.
fn enrich(
    candidates: Vec<ShortlistEntry>,
    symptoms: &BTreeSet<String>,
    kb: &KnowledgeBase,
) -> DiagnosisResult {
    let mut enriched: Vec<DiagnosisCandidate> = candidates
        .into_iter()
        .map(|entry| DiagnosisCandidate {
            description: kb.describe(&entry.disease).to_string(),
            precautions: kb.precautions(&entry.disease),
            disease: entry.disease,
            confidence: entry.confidence,
        })
        .collect();

    let primary = enriched.remove(0);
    DiagnosisResult {
        symptoms_detected: symptoms.iter().cloned().collect(),
        primary,
        alternatives: enriched,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::dataset::TrainingTable;
    use crate::knowledge::{KnowledgeBase, KnowledgeSources};
    use crate::model::forest::ForestParams;
    use crate::model::linear::LinearParams;
    use crate::model::trainer::{self, TrainConfig};

    use super::*;

    fn fixture_artifact() -> ModelArtifact {
        let mut raw: Vec<Vec<String>> = Vec::new();
        for _ in 0..15 {
            raw.push(vec![
                "Influenza".into(),
                "cough".into(),
                "high fever".into(),
                "chills".into(),
                "muscle pain".into(),
            ]);
            raw.push(vec![
                "Common Cold".into(),
                "cough".into(),
                "runny nose".into(),
                "continuous sneezing".into(),
                "headache".into(),
            ]);
            raw.push(vec![
                "Malaria".into(),
                "high fever".into(),
                "sweating".into(),
                "vomiting".into(),
            ]);
            raw.push(vec![
                "Viral Fever".into(),
                "high fever".into(),
                "fatigue".into(),
                "headache".into(),
            ]);
        }
        let table = TrainingTable::from_raw_rows(&raw).unwrap();
        let dir = TempDir::new().unwrap();
        let config = TrainConfig {
            forest: ForestParams {
                n_trees: 10,
                ..ForestParams::default()
            },
            linear: LinearParams {
                epochs: 150,
                ..LinearParams::default()
            },
            ..TrainConfig::default()
        };
        let (artifact, _) = trainer::train(&table, &config, &dir.path().join("m.json")).unwrap();
        artifact
    }

    fn empty_kb() -> KnowledgeBase {
        KnowledgeBase::load(&KnowledgeSources {
            descriptions: vec![],
            precautions: vec![],
            severity: vec![],
        })
    }

    fn set(symptoms: &[&str]) -> BTreeSet<String> {
        symptoms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_set_short_circuits_before_classification() {
        let artifact = fixture_artifact();
        let err = diagnose_symptoms(&set(&[]), &artifact, &artifact.symptom_index(), &empty_kb())
            .unwrap_err();
        assert!(matches!(err, InferenceError::NoSymptoms));
        assert_eq!(err.reason(), "no_symptoms");
    }

    #[test]
    fn confidences_sum_to_one_hundred() {
        let artifact = fixture_artifact();
        let result = diagnose_symptoms(
            &set(&["high_fever", "cough", "chills"]),
            &artifact,
            &artifact.symptom_index(),
            &empty_kb(),
        )
        .unwrap();
        let sum: f64 = result.candidates().map(|c| c.confidence).sum();
        assert!((sum - 100.0).abs() < 0.015, "sum = {sum}");
    }

    #[test]
    fn candidate_count_is_one_to_three() {
        let artifact = fixture_artifact();
        let index = artifact.symptom_index();
        let kb = empty_kb();
        for symptoms in [
            set(&["high_fever"]),
            set(&["cough", "runny_nose"]),
            set(&["high_fever", "cough", "chills", "headache", "vomiting"]),
        ] {
            let result = diagnose_symptoms(&symptoms, &artifact, &index, &kb).unwrap();
            let count = result.candidate_count();
            assert!((1..=3).contains(&count), "count = {count}");
        }
    }

    #[test]
    fn identical_calls_are_identical() {
        let artifact = fixture_artifact();
        let index = artifact.symptom_index();
        let kb = empty_kb();
        let symptoms = set(&["high_fever", "chills", "cough"]);
        let a = diagnose_symptoms(&symptoms, &artifact, &index, &kb).unwrap();
        let b = diagnose_symptoms(&symptoms, &artifact, &index, &kb).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fever_and_chills_favor_influenza() {
        let artifact = fixture_artifact();
        let result = diagnose_symptoms(
            &set(&["high_fever", "chills", "cough", "muscle_pain"]),
            &artifact,
            &artifact.symptom_index(),
            &empty_kb(),
        )
        .unwrap();
        assert_eq!(result.primary.disease, "Influenza");
    }

    #[test]
    fn unmapped_symptoms_do_not_fail_inference() {
        let artifact = fixture_artifact();
        let result = diagnose_symptoms(
            &set(&["high_fever", "glowing_aura"]),
            &artifact,
            &artifact.symptom_index(),
            &empty_kb(),
        )
        .unwrap();
        assert!(result.candidate_count() >= 1);
    }

    #[test]
    fn enrichment_uses_generic_defaults_for_unknown_diseases() {
        let artifact = fixture_artifact();
        let result = diagnose_symptoms(
            &set(&["high_fever", "sweating", "vomiting"]),
            &artifact,
            &artifact.symptom_index(),
            &empty_kb(),
        )
        .unwrap();
        // The empty KB only has the hardcoded overrides; Malaria falls back.
        for candidate in result.candidates() {
            assert!(!candidate.description.is_empty());
            assert!(!candidate.precautions.is_empty());
        }
    }

    #[test]
    fn rank_filter_emits_fallback_when_everything_is_negative() {
        let filtered = rank_filter(vec![
            ShortlistEntry {
                disease: "AIDS".into(),
                confidence: -0.3,
            },
            ShortlistEntry {
                disease: "Paralysis (brain hemorrhage)".into(),
                confidence: -0.5,
            },
        ]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].disease, limits::FALLBACK_DISEASE);

        let normalized = normalize(filtered);
        assert!((normalized[0].confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rank_filter_caps_at_three() {
        let entries: Vec<ShortlistEntry> = (0..5)
            .map(|i| ShortlistEntry {
                disease: format!("D{i}"),
                confidence: 0.1 * (i + 1) as f64,
            })
            .collect();
        let filtered = rank_filter(entries);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].disease, "D4");
    }

    #[test]
    fn normalize_rescales_to_percentages() {
        let normalized = normalize(vec![
            ShortlistEntry {
                disease: "A".into(),
                confidence: 0.6,
            },
            ShortlistEntry {
                disease: "B".into(),
                confidence: 0.2,
            },
        ]);
        assert!((normalized[0].confidence - 75.0).abs() < 1e-9);
        assert!((normalized[1].confidence - 25.0).abs() < 1e-9);
    }
}
