pub mod calibration;
pub mod orchestrator;
pub mod types;
pub mod vectorize;

pub use orchestrator::{diagnose, diagnose_symptoms};
pub use types::{DiagnosisCandidate, DiagnosisResult, InferenceError};
