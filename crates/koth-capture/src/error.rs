//! Capture errors

use crate::CaptureClass;

/// Reasons a capper could not be resolved
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture type not found: {0}")]
    UnknownType(String),

    #[error("No {kind} found for key '{key}'")]
    UnknownObject { kind: &'static str, key: String },

    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Cannot build a capper from an empty player list")]
    NoPlayers,

    #[error("Player {0} is not part of any group")]
    NoGroup(String),

    #[error("No registered capture type is compatible with {0}")]
    Incompatible(CaptureClass),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
