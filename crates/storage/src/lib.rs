//! SQLite-backed account state for guarded accounts.
//!
//! This crate persists the two things an account needs around its guard:
//!
//! 1. **Slots** — fixed-size words stored under 32-byte keys. Every piece of
//!    state lives under a key derived from a hashed, namespaced label, so
//!    adding state never moves or overlaps existing entries. The active guard
//!    lives at [`GUARD_SLOT`].
//!
//! 2. **Event log** — an append-only record of guard changes and execution
//!    outcomes, enough for an observer to reconstruct the guard history.
//!
//! # Atomicity
//!
//! [`SlotStore::atomic`] wraps a closure in an SQLite savepoint. Slot writes
//! and events made inside it survive only if the closure succeeds; scopes nest.
//!
//! # Example
//!
//! ```no_run
//! use guard::Address;
//! use storage::{Event, SlotStore, Word, GUARD_SLOT};
//!
//! let store = SlotStore::open("account.db")?;
//! let account = Address([1; 20]);
//! let guard = Address([2; 20]);
//!
//! store.atomic(|| -> storage::Result<()> {
//!     store.write_slot(*GUARD_SLOT, Word::from_address(guard))?;
//!     store.append(&Event::changed_guard(account, Some(guard)))?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(store.read_slot(*GUARD_SLOT)?.to_address(), Some(guard));
//! # Ok::<(), storage::Error>(())
//! ```

mod error;
mod event;
mod slot;
mod store;

pub use error::{Error, Result};
pub use event::{Event, EventKind};
pub use slot::{GUARD_SLOT, GUARD_SLOT_LABEL, SlotKey, Word};
pub use store::SlotStore;
