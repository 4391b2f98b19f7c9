//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The database file does not exist.
    ///
    /// This typically means the account has not executed anything yet.
    #[error("database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// Configuration is invalid or missing required fields.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An error occurred in the storage layer.
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
