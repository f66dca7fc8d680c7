//! Error types for population sub-models

use std::path::PathBuf;

use extinction::ExtinctionError;
use thiserror::Error;

/// Errors raised while configuring or evaluating population sub-models
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid parameter for {model}: {reason}")]
    InvalidParameter { model: &'static str, reason: String },

    #[error("Failed to read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Extinction(#[from] ExtinctionError),
}

impl ModelError {
    pub(crate) fn invalid(model: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            model,
            reason: reason.into(),
        }
    }
}
