//! Guard hook interface for multi-party accounts.
//!
//! A guard is an external policy module the account consults around every
//! transaction: once before the effects are applied and once after. Guards
//! are swapped at runtime, so instead of relying on static types the account
//! asks each candidate whether it implements the hook contract
//! ([`Guard::supports_capability`] with [`GUARD_CAPABILITY`]) before
//! accepting it.
//!
//! Concrete guards usually implement [`BaseGuard`], which supplies only the
//! three hooks and inherits the capability answer.
//!
//! # Example
//!
//! ```
//! use guard::{Address, BaseGuard, Call, FeeParams, Guard, TxHash, Veto, GUARD_CAPABILITY};
//!
//! struct NoValueTransfers;
//!
//! impl BaseGuard for NoValueTransfers {
//!     fn check_before_account_call(
//!         &self,
//!         call: &Call,
//!         _fee: &FeeParams,
//!         _signatures: &[u8],
//!         _caller: Address,
//!     ) -> Result<(), Veto> {
//!         if call.value > 0 {
//!             return Err(Veto::new("value transfers are not allowed"));
//!         }
//!         Ok(())
//!     }
//!
//!     fn check_before_module_call(&self, _call: &Call, _module: Address) -> Result<(), Veto> {
//!         Ok(())
//!     }
//!
//!     fn check_after_execution(&self, _tx_hash: TxHash, _success: bool) -> Result<(), Veto> {
//!         Ok(())
//!     }
//! }
//!
//! assert!(NoValueTransfers.supports_capability(*GUARD_CAPABILITY));
//! ```

mod capability;
mod error;
mod guard;
mod types;

pub use capability::{
    CAPABILITY_QUERY, CAPABILITY_QUERY_SIGNATURE, CapabilityId, GUARD_CAPABILITY,
    GUARD_HOOK_SIGNATURES,
};
pub use error::{Error, Result, Veto};
pub use guard::{BaseGuard, Guard};
pub use types::{Address, Call, FeeParams, Operation, TxHash};
