//! Registry error types.

use guard::Address;
use thiserror::Error;

/// Guard registry errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The guard may only be changed by the account acting on itself.
    #[error("unauthorized: {caller} is not the account")]
    Unauthorized { caller: Address },

    /// The candidate does not advertise the guard hook capability.
    #[error("{candidate} does not support the guard interface")]
    CapabilityRejected { candidate: Address },

    /// The stored guard address has no live module behind it.
    #[error("guard {guard} is not deployed")]
    GuardUnavailable { guard: Address },

    /// An error occurred in the storage layer.
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
