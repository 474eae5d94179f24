//! Error types for the KoTH core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum KothError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type KothResult<T> = Result<T, KothError>;
