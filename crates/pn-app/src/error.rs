//! Error types for the pn-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Asset(#[from] pn_assets::AssetError),

    #[error("Storage error: {0}")]
    Store(#[from] pn_store::StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pn_core::CoreError> for AppError {
    fn from(err: pn_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
