//! Salary ML - библиотека оценки зарплаты

pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod training;
pub mod types;
pub mod web;

pub use error::PipelineError;
pub use pipeline::{SalaryPipeline, ARTIFACT_FILE};
pub use types::{FeatureRow, PredictionResult, SalaryRecord};
