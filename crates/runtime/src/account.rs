//! Guarded transaction execution.

use crate::executor::{CallError, Executor};
use crate::transaction::{AccountCall, NONCE_SLOT, Transaction, module_tx_hash};
use crate::{AccountConfig, Error, Result};
use guard::{Address, Call, Operation, TxHash};
use registry::{ActiveGuard, GuardManager, ModuleDirectory};
use std::rc::Rc;
use storage::{Event, EventKind, SlotStore, Word};

/// Outcome of an account-originated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub tx_hash: TxHash,
    pub success: bool,
}

/// A multi-party account whose transactions pass through its guard.
///
/// Each transaction is one atomic unit. The guard is resolved once at the
/// start and the same module receives the before- and after-hook, even if
/// the transaction itself changes the guard.
pub struct Account<E> {
    config: AccountConfig,
    store: Rc<SlotStore>,
    guards: GuardManager,
    executor: E,
}

impl<E: Executor> Account<E> {
    pub fn new(
        config: AccountConfig,
        store: SlotStore,
        directory: ModuleDirectory,
        executor: E,
    ) -> Self {
        let store = Rc::new(store);
        let guards = GuardManager::new(config.address, Rc::clone(&store), directory);
        Self {
            config,
            store,
            guards,
            executor,
        }
    }

    pub fn address(&self) -> Address {
        self.config.address
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// The guard registry, e.g. to read the active guard.
    pub fn guards(&self) -> &GuardManager {
        &self.guards
    }

    /// Mutable registry access, e.g. to deploy a guard module after the
    /// account was created.
    pub fn guards_mut(&mut self) -> &mut GuardManager {
        &mut self.guards
    }

    /// Nonce the next account-originated transaction must carry.
    pub fn nonce(&self) -> Result<u64> {
        Ok(self.store.read_slot(*NONCE_SLOT)?.to_u64())
    }

    /// Execute a transaction the account originated.
    ///
    /// `signatures` are assumed verified by the caller and are only passed
    /// through to the guard. A failing inner call is reported with
    /// `success = false`, unless both `safe_tx_gas` and `gas_price` are zero,
    /// in which case the whole transaction fails.
    pub fn exec_transaction(
        &mut self,
        tx: &Transaction,
        signatures: &[u8],
        caller: Address,
    ) -> Result<Execution> {
        let store = Rc::clone(&self.store);
        store.atomic(|| self.run_transaction(tx, signatures, caller))
    }

    /// Execute a call on behalf of an enabled module.
    ///
    /// Returns whether the inner call succeeded.
    pub fn exec_from_module(&mut self, module: Address, call: &Call) -> Result<bool> {
        if !self.config.is_module_enabled(module) {
            return Err(Error::ModuleNotEnabled { module });
        }
        let store = Rc::clone(&self.store);
        store.atomic(|| self.run_module_call(module, call))
    }

    fn run_transaction(
        &mut self,
        tx: &Transaction,
        signatures: &[u8],
        caller: Address,
    ) -> Result<Execution> {
        let expected = self.nonce()?;
        if tx.nonce != expected {
            return Err(Error::InvalidNonce {
                expected,
                got: tx.nonce,
            });
        }
        let tx_hash = tx.hash(self.address());
        self.store
            .write_slot(*NONCE_SLOT, Word::from_u64(expected + 1))?;

        let guard = self.guards.current_guard()?;
        if let Some(active) = &guard {
            active
                .module
                .check_before_account_call(&tx.call, &tx.fee, signatures, caller)
                .map_err(|veto| vetoed(active, veto))?;
        }

        let outcome = self.dispatch(&tx.call)?;
        let success = outcome.is_ok();
        let kind = match outcome {
            Ok(()) => EventKind::ExecutionSuccess { tx_hash },
            Err(reason) => {
                if tx.fee.safe_tx_gas == 0 && tx.fee.gas_price == 0 {
                    return Err(Error::CallFailed(reason));
                }
                EventKind::ExecutionFailure { tx_hash, reason }
            }
        };
        self.store.append(&Event::new(self.address(), kind))?;

        if let Some(active) = &guard {
            active
                .module
                .check_after_execution(tx_hash, success)
                .map_err(|veto| vetoed(active, veto))?;
        }

        tracing::info!(account = %self.address(), %tx_hash, success, "transaction executed");
        Ok(Execution { tx_hash, success })
    }

    fn run_module_call(&mut self, module: Address, call: &Call) -> Result<bool> {
        let tx_hash = module_tx_hash(self.address(), module, call);

        let guard = self.guards.current_guard()?;
        if let Some(active) = &guard {
            active
                .module
                .check_before_module_call(call, module)
                .map_err(|veto| vetoed(active, veto))?;
        }

        let outcome = self.dispatch(call)?;
        let success = outcome.is_ok();
        let kind = match outcome {
            Ok(()) => EventKind::ExecutionFromModuleSuccess { module },
            Err(reason) => EventKind::ExecutionFromModuleFailure { module, reason },
        };
        self.store.append(&Event::new(self.address(), kind))?;

        if let Some(active) = &guard {
            active
                .module
                .check_after_execution(tx_hash, success)
                .map_err(|veto| vetoed(active, veto))?;
        }

        tracing::info!(account = %self.address(), %module, success, "module transaction executed");
        Ok(success)
    }

    /// Run the inner call in its own atomic scope.
    ///
    /// The outer `Result` aborts the transaction; the inner one is the call
    /// outcome, with the failure reason.
    fn dispatch(&mut self, call: &Call) -> Result<std::result::Result<(), String>> {
        let store = Rc::clone(&self.store);
        let outcome = store.atomic(|| {
            if call.target == self.address() {
                self.call_self(call)
            } else {
                self.executor.execute(&store, call)
            }
        });

        match outcome {
            Ok(()) => Ok(Ok(())),
            Err(CallError::Storage(e)) => Err(Error::Storage(e)),
            Err(e) => {
                tracing::debug!(target_address = %call.target, error = %e, "inner call failed");
                Ok(Err(e.to_string()))
            }
        }
    }

    /// Handle a call the account makes to itself; the account is the caller.
    fn call_self(&self, call: &Call) -> std::result::Result<(), CallError> {
        if call.operation != Operation::Call {
            return Err(CallError::Unsupported(call.operation));
        }
        let request =
            AccountCall::decode(&call.data).map_err(|e| CallError::InvalidPayload(e.to_string()))?;

        match request {
            AccountCall::SetGuard { guard } => self
                .guards
                .set_guard(self.address(), guard)
                .map_err(|e| match e {
                    registry::Error::Storage(e) => CallError::Storage(e),
                    other => CallError::Reverted(other.to_string()),
                }),
        }
    }
}

fn vetoed(active: &ActiveGuard, veto: guard::Veto) -> Error {
    tracing::warn!(guard = %active.address, reason = %veto.reason, "guard vetoed transaction");
    Error::GuardVeto {
        guard: active.address,
        veto,
    }
}
