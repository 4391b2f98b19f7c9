use guard::Operation;
use thiserror::Error;

/// Why an inner call did not complete.
///
/// A `CallError` fails the call, not the transaction: the call's own effects
/// are rolled back and guards observe `success = false`.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("call reverted: {0}")]
    Reverted(String),
    #[error("unsupported operation: {0:?}")]
    Unsupported(Operation),
    #[error("invalid account call: {0}")]
    InvalidPayload(String),
    /// The store underneath failed; this aborts the whole transaction.
    #[error(transparent)]
    Storage(#[from] storage::Error),
}
