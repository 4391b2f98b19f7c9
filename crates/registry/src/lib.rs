//! Guard registry for a multi-party account.
//!
//! [`GuardManager`] owns the single guard slot of an account. It enforces two
//! rules on every change:
//!
//! - only the account acting on itself may call [`GuardManager::set_guard`]
//!   (the caller identity is passed in explicitly);
//! - a new guard must answer `true` to the guard capability query.
//!
//! Disabling (setting `None`) skips the capability query. Every accepted
//! change, including disabling, is written atomically together with a
//! `ChangedGuard` event.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use guard::{Address, BaseGuard, Call, FeeParams, TxHash, Veto};
//! use registry::{GuardManager, ModuleDirectory};
//! use storage::SlotStore;
//!
//! struct Audit;
//!
//! impl BaseGuard for Audit {
//!     fn check_before_account_call(&self, _: &Call, _: &FeeParams, _: &[u8], _: Address) -> Result<(), Veto> { Ok(()) }
//!     fn check_before_module_call(&self, _: &Call, _: Address) -> Result<(), Veto> { Ok(()) }
//!     fn check_after_execution(&self, _: TxHash, _: bool) -> Result<(), Veto> { Ok(()) }
//! }
//!
//! let account = Address([1; 20]);
//! let audit = Address([2; 20]);
//! let directory = ModuleDirectory::new().with_module(audit, Arc::new(Audit));
//! let manager = GuardManager::new(account, Rc::new(SlotStore::in_memory()?), directory);
//!
//! manager.set_guard(account, Some(audit))?;
//! assert_eq!(manager.get_guard()?, Some(audit));
//!
//! assert!(manager.set_guard(Address([3; 20]), None).is_err());
//! # Ok::<(), registry::Error>(())
//! ```

mod directory;
mod error;
mod manager;

pub use directory::ModuleDirectory;
pub use error::{Error, Result};
pub use manager::{ActiveGuard, GuardManager};
