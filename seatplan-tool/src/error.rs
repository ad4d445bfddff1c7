use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatsError {
    #[error("Floor plan error: {0}")]
    Plan(#[from] seatplan_core::PlanError),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to install log subscriber: {0}")]
    Logging(String),
}
