use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "DiagnoChain";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory.
/// ~/DiagnoChain/ on all platforms; falls back to the working directory
/// when no home directory can be determined (containers, CI).
pub fn app_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join("DiagnoChain"),
        None => PathBuf::from("."),
    }
}

/// Default location of the trained model artifact.
pub fn default_model_path() -> PathBuf {
    app_data_dir().join("diagnochain_model.json")
}

/// Candidate locations for the raw disease/symptom training table.
/// First existing path wins.
pub fn default_dataset_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("dataset.csv"),
        PathBuf::from("data/dataset.csv"),
        PathBuf::from("../dataset.csv"),
    ]
}

/// Candidate locations for the disease description table.
pub fn default_description_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("symptom_Description.csv"),
        PathBuf::from("data/symptom_Description.csv"),
    ]
}

/// Candidate locations for the disease precaution table.
pub fn default_precaution_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("symptom_precaution.csv"),
        PathBuf::from("data/symptom_precaution.csv"),
    ]
}

/// Candidate locations for the symptom severity table.
pub fn default_severity_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("Symptom_severity.csv"),
        PathBuf::from("data/Symptom_severity.csv"),
    ]
}
