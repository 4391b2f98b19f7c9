use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("slot {key} holds {len} bytes, expected 32")]
    CorruptSlot { key: String, len: usize },

    #[error("corrupt event record: {0}")]
    CorruptEvent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
