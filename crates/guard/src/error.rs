//! Guard error types.

use thiserror::Error;

/// A guard's refusal to let a transaction proceed.
///
/// Returned by any hook; the enclosing transaction is aborted and every
/// effect it produced is rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("guard veto: {reason}")]
pub struct Veto {
    pub reason: String,
}

impl Veto {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors raised while handling guard primitives.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A string or byte slice is not a 20-byte address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A string is not a 32-byte hash.
    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

pub type Result<T> = std::result::Result<T, Error>;
