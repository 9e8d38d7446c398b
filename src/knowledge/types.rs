use std::path::PathBuf;

use crate::config;

/// Default description for diseases absent from the source tables.
pub const GENERIC_DESCRIPTION: &str = "No description available";

/// Default precaution for diseases absent from the source tables.
pub const GENERIC_PRECAUTION: &str = "consult a medical professional";

/// Candidate file locations for the three knowledge tables.
/// Per table, the first existing path wins.
#[derive(Debug, Clone)]
pub struct KnowledgeSources {
    pub descriptions: Vec<PathBuf>,
    pub precautions: Vec<PathBuf>,
    pub severity: Vec<PathBuf>,
}

impl Default for KnowledgeSources {
    fn default() -> Self {
        Self {
            descriptions: config::default_description_candidates(),
            precautions: config::default_precaution_candidates(),
            severity: config::default_severity_candidates(),
        }
    }
}
