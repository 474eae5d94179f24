//! Loot errors

/// Loot errors
#[derive(Debug, thiserror::Error)]
pub enum LootError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid loot document: {0}")]
    InvalidDocument(String),

    #[error("Invalid slot '{0}' (expected 0..=53)")]
    InvalidSlot(String),

    #[error("Item decode error: {0}")]
    ItemDecode(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid command entry: {0}")]
    InvalidCommand(String),

    #[error("Loot already exists: {0}")]
    AlreadyExists(String),

    #[error("Loot not found: {0}")]
    NotFound(String),
}

pub type LootResult<T> = Result<T, LootError>;
