pub mod loader;
pub mod types;

pub use loader::KnowledgeBase;
pub use types::{KnowledgeSources, GENERIC_DESCRIPTION, GENERIC_PRECAUTION};

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a single knowledge-base source.
///
/// These never escape the loader: a failed source is logged and skipped,
/// partial knowledge beats no knowledge.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    // I/O failures surface through csv::Error; every read goes through it.
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("no knowledge source exists among candidates: {0:?}")]
    NoSourceFound(Vec<PathBuf>),
}
