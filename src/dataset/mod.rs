pub mod augment;
pub mod schema;

pub use schema::TrainingTable;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// Fatal: training cannot proceed without a source table.
    #[error("dataset unavailable: none of the candidate paths exist: {0:?}")]
    DatasetUnavailable(Vec<PathBuf>),

    // I/O failures surface through csv::Error; every read goes through it.
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is empty after encoding")]
    EmptyDataset,
}
