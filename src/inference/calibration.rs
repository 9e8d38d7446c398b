//! Rule-based confidence calibration over the classification shortlist.
//!
//! The base ensemble has known biases: it over-predicts rare severe classes
//! from sparse symptom overlap and confuses the common respiratory
//! diagnoses. Each rule is a pure delta function gated on the extracted
//! symptom set. Rules apply cumulatively in a fixed order — later rules may
//! reverse earlier boosts, so the order is part of the behavior and must
//! not change.

use std::collections::BTreeSet;

use tracing::debug;

use super::types::ShortlistEntry;

/// One ordered calibration rule: a name for logging and a pure function
/// from (disease, extracted set) to a confidence delta.
pub struct CalibrationRule {
    pub name: &'static str,
    adjust: fn(&str, &BTreeSet<String>) -> f64,
}

impl CalibrationRule {
    /// Confidence delta this rule contributes for one candidate.
    pub fn delta(&self, disease: &str, symptoms: &BTreeSet<String>) -> f64 {
        (self.adjust)(disease, symptoms)
    }
}

/// The fixed rule sequence. Order-dependence is deliberate.
pub const RULES: &[CalibrationRule] = &[
    CalibrationRule {
        name: "asthma_requires_breathlessness",
        adjust: asthma_requires_breathlessness,
    },
    CalibrationRule {
        name: "common_cold_boost",
        adjust: common_cold_boost,
    },
    CalibrationRule {
        name: "influenza_vs_cold",
        adjust: influenza_vs_cold,
    },
    CalibrationRule {
        name: "paralysis_requires_neuro_signs",
        adjust: paralysis_requires_neuro_signs,
    },
    CalibrationRule {
        name: "aids_requires_hallmark_signs",
        adjust: aids_requires_hallmark_signs,
    },
    CalibrationRule {
        name: "viral_fever_low_information_default",
        adjust: viral_fever_low_information_default,
    },
];

/// Apply every rule, in order, to every shortlist entry.
pub fn apply(shortlist: &mut [ShortlistEntry], symptoms: &BTreeSet<String>) {
    for rule in RULES {
        for entry in shortlist.iter_mut() {
            let delta = rule.delta(&entry.disease, symptoms);
            if delta != 0.0 {
                debug!(
                    rule = rule.name,
                    disease = %entry.disease,
                    delta,
                    "calibration adjustment"
                );
                entry.confidence += delta;
            }
        }
    }
}

fn has(symptoms: &BTreeSet<String>, token: &str) -> bool {
    symptoms.contains(token)
}

/// Asthma without breathlessness is almost always a misfire on cough-like
/// overlap; penalize hard.
fn asthma_requires_breathlessness(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    if disease == "Bronchial Asthma" && !has(symptoms, "breathlessness") {
        -0.50
    } else {
        0.0
    }
}

/// Cough together with headache or nasal symptoms points at the common,
/// frequently confused mild diagnosis.
fn common_cold_boost(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    let nasal = has(symptoms, "continuous_sneezing") || has(symptoms, "runny_nose");
    if disease == "Common Cold" && has(symptoms, "cough") && (has(symptoms, "headache") || nasal) {
        0.40
    } else {
        0.0
    }
}

/// Fever with chills separates Influenza from Common Cold; boost one,
/// penalize the other (mutual exclusion between the two confused classes).
fn influenza_vs_cold(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    if !(has(symptoms, "high_fever") && has(symptoms, "chills")) {
        return 0.0;
    }
    match disease {
        "Influenza" => 0.30,
        "Common Cold" => -0.20,
        _ => 0.0,
    }
}

/// Suppress a rare severe class unless a defining neurological sign is
/// present; the base model produces it from sparse overlap otherwise.
fn paralysis_requires_neuro_signs(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    const NEURO_SIGNS: &[&str] = &["vomiting", "weakness_of_one_body_side", "altered_sensorium"];
    if disease == "Paralysis (brain hemorrhage)"
        && !NEURO_SIGNS.iter().any(|s| has(symptoms, s))
    {
        -0.80
    } else {
        0.0
    }
}

/// Same suppression for AIDS without its hallmark signs.
fn aids_requires_hallmark_signs(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    const HALLMARKS: &[&str] = &["muscle_wasting", "patches_in_throat", "extra_marital_contacts"];
    if disease == "AIDS" && !HALLMARKS.iter().any(|s| has(symptoms, s)) {
        -0.80
    } else {
        0.0
    }
}

/// Low-information input with fever leans toward the safe generic default.
fn viral_fever_low_information_default(disease: &str, symptoms: &BTreeSet<String>) -> f64 {
    if disease == "Viral Fever" && symptoms.len() <= 3 && has(symptoms, "high_fever") {
        0.30
    } else {
        0.0
    }
}
