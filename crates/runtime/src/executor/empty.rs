//! Empty executor implementation.

use crate::executor::{CallError, Executor};
use guard::Call;
use storage::SlotStore;

/// An executor whose calls always succeed and change nothing.
///
/// Useful for testing or for accounts whose only effects are self-calls.
#[derive(Debug, Default)]
pub struct EmptyExecutor;

impl Executor for EmptyExecutor {
    fn execute(&mut self, _store: &SlotStore, _call: &Call) -> Result<(), CallError> {
        Ok(())
    }
}
