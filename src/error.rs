//! Ошибки пайплайна

use std::io;
use thiserror::Error;

/// Ошибки обучения, предсказания и работы с артефактом.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("unknown column '{0}' in schema")]
    UnknownColumn(String),

    #[error("pipeline is not fitted")]
    NotFitted,

    #[error("artifact i/o error: {0}")]
    ArtifactIo(#[from] io::Error),

    #[error("artifact format error: {0}")]
    ArtifactFormat(#[from] serde_json::Error),

    #[error("prediction failed: {0}")]
    Prediction(String),
}
