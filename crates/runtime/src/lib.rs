//! Guarded account runtime — transaction execution around a swappable guard.
//!
//! This crate drives an account's transactions through the guard held by its
//! [`registry::GuardManager`]. It is the execution side of the guard protocol:
//!
//! - **Account**: owns the slot store, the guard registry and an executor;
//!   runs each transaction as one atomic unit.
//! - **Executor**: a trait applying the effects of calls to other addresses.
//! - **Transaction**: an account-originated call plus fee parameters and nonce.
//!
//! For every transaction the active guard is resolved once. The matching
//! before-hook runs before any effect, the after-hook runs after, and a veto
//! from either rolls back everything the transaction did.
//!
//! # Example
//!
//! ```
//! use guard::{Address, Call};
//! use registry::ModuleDirectory;
//! use runtime::{Account, AccountCall, AccountConfig, EmptyExecutor, Transaction};
//! use storage::SlotStore;
//!
//! let config = AccountConfig::new(Address([1; 20]));
//! let mut account = Account::new(
//!     config,
//!     SlotStore::in_memory()?,
//!     ModuleDirectory::new(),
//!     EmptyExecutor,
//! );
//!
//! let tx = Transaction::new(Call::new(Address([2; 20]), 10, Vec::new()), account.nonce()?);
//! let execution = account.exec_transaction(&tx, &[], Address([3; 20]))?;
//! assert!(execution.success);
//!
//! // Disabling the guard is a call the account makes to itself.
//! let disable = AccountCall::SetGuard { guard: None }.into_call(account.address());
//! account.exec_transaction(&Transaction::new(disable, account.nonce()?), &[], Address([3; 20]))?;
//! # Ok::<(), runtime::Error>(())
//! ```

mod account;
mod config;
mod error;
pub mod executor;
mod transaction;

pub use account::{Account, Execution};
pub use config::AccountConfig;
pub use error::{Error, Result};
pub use executor::{CallError, EmptyExecutor, Executor};
pub use transaction::{AccountCall, NONCE_SLOT, NONCE_SLOT_LABEL, Transaction, module_tx_hash};
