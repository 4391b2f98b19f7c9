use guard::{Address, Veto};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid nonce: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("module {module} is not enabled")]
    ModuleNotEnabled { module: Address },

    #[error("guard {guard} vetoed the transaction: {}", .veto.reason)]
    GuardVeto {
        guard: Address,
        #[source]
        veto: Veto,
    },

    #[error("call failed: {0}")]
    CallFailed(String),

    #[error(transparent)]
    Registry(#[from] registry::Error),

    #[error(transparent)]
    Storage(#[from] storage::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
