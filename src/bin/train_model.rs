//! Offline artifact builder: trains the ensemble from the dataset and
//! writes the model artifact, regardless of whether one already exists.
//! Run this ahead of time so the serving process never trains on demand.

use diagnochain::dataset::{augment, TrainingTable};
use diagnochain::model::trainer;
use diagnochain::{config, EngineConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} trainer v{}", config::APP_NAME, config::APP_VERSION);

    let engine_config = EngineConfig::default();
    let mut table = match TrainingTable::load(&engine_config.dataset_paths) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "cannot load training dataset");
            std::process::exit(1);
        }
    };
    augment::apply(&mut table, engine_config.train.seed);

    match trainer::train(&table, &engine_config.train, &engine_config.model_path) {
        Ok((artifact, report)) => {
            tracing::info!(
                path = %engine_config.model_path.display(),
                accuracy = format!("{:.2}%", report.held_out_accuracy * 100.0),
                kib = report.artifact_bytes / 1024,
                symptoms = artifact.vocabulary.len(),
                diseases = artifact.encoder.len(),
                "artifact written"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "training failed");
            std::process::exit(1);
        }
    }
}
