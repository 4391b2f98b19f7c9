//! The boundary between the account and the effects of its calls.

mod empty;
mod errors;

pub use empty::EmptyExecutor;
pub use errors::CallError;

use guard::Call;
use storage::SlotStore;

/// Applies the effects of calls the account makes to other addresses.
///
/// Self-calls never reach the executor. Effects written to `store` are part
/// of the enclosing transaction and are rolled back with it.
pub trait Executor {
    fn execute(&mut self, store: &SlotStore, call: &Call) -> Result<(), CallError>;
}
