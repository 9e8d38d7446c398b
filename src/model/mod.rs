pub mod artifact;
pub mod bayes;
pub mod encoder;
pub mod ensemble;
pub mod forest;
pub mod linear;
pub mod trainer;

pub use artifact::ModelArtifact;
pub use encoder::LabelEncoder;
pub use ensemble::SoftVotingEnsemble;
pub use trainer::{TrainConfig, TrainReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Covers both save and load serialization failures. A load failure is
    /// recoverable: the engine retrains instead of propagating it.
    #[error("artifact serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The artifact deserialized but its parts disagree (empty vocabulary,
    /// encoder/ensemble class mismatch). Inference cannot proceed on it.
    #[error("artifact is invalid: {0}")]
    ArtifactInvalid(String),

    #[error("artifact was written but cannot be verified on disk: {0}")]
    ArtifactUnverified(String),
}
