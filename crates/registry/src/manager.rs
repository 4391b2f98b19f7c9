//! The guard slot and the rules for changing it.

use crate::{Error, ModuleDirectory, Result};
use guard::{Address, GUARD_CAPABILITY, Guard};
use std::rc::Rc;
use std::sync::Arc;
use storage::{Event, GUARD_SLOT, SlotStore, Word};

/// A resolved guard: the address in the slot and the module behind it.
#[derive(Clone)]
pub struct ActiveGuard {
    pub address: Address,
    pub module: Arc<dyn Guard>,
}

impl std::fmt::Debug for ActiveGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveGuard")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Owns an account's guard slot.
///
/// The slot is either zero (disabled) or the address of a module that
/// advertised [`GUARD_CAPABILITY`] when it was set. The capability is not
/// re-checked afterwards.
pub struct GuardManager {
    account: Address,
    store: Rc<SlotStore>,
    directory: ModuleDirectory,
}

impl GuardManager {
    pub fn new(account: Address, store: Rc<SlotStore>, directory: ModuleDirectory) -> Self {
        Self {
            account,
            store,
            directory,
        }
    }

    /// The account this registry belongs to.
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn store(&self) -> &Rc<SlotStore> {
        &self.store
    }

    pub fn directory(&self) -> &ModuleDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut ModuleDirectory {
        &mut self.directory
    }

    /// Replace the active guard.
    ///
    /// `caller` must be the account itself. `None` or the zero address
    /// disables the guard without any capability check; anything else must
    /// resolve to a module answering `true` for [`GUARD_CAPABILITY`]. Every
    /// successful call emits one `ChangedGuard` event, repeats included.
    pub fn set_guard(&self, caller: Address, candidate: Option<Address>) -> Result<()> {
        if caller != self.account {
            tracing::warn!(account = %self.account, %caller, "rejected guard change from foreign caller");
            return Err(Error::Unauthorized { caller });
        }

        let candidate = candidate.and_then(Address::non_zero);
        if let Some(address) = candidate {
            let supported = self
                .directory
                .resolve(address)
                .is_some_and(|module| module.supports_capability(*GUARD_CAPABILITY));
            if !supported {
                tracing::warn!(account = %self.account, guard = %address, "guard does not support the hook interface");
                return Err(Error::CapabilityRejected { candidate: address });
            }
        }

        self.store.atomic(|| -> Result<()> {
            self.store.write_slot(*GUARD_SLOT, Word::from(candidate))?;
            self.store.append(&Event::changed_guard(self.account, candidate))?;
            Ok(())
        })?;

        match candidate {
            Some(address) => tracing::info!(account = %self.account, guard = %address, "guard changed"),
            None => tracing::info!(account = %self.account, "guard disabled"),
        }
        Ok(())
    }

    /// The address in the guard slot, `None` when disabled.
    pub fn get_guard(&self) -> Result<Option<Address>> {
        Ok(self.store.read_slot(*GUARD_SLOT)?.to_address())
    }

    /// Resolve the active guard for one transaction.
    ///
    /// Callers take this snapshot once and use it for both the before- and
    /// after-hooks. Fails if the slot names an address with no module.
    pub fn current_guard(&self) -> Result<Option<ActiveGuard>> {
        let Some(address) = self.get_guard()? else {
            return Ok(None);
        };
        let module = self
            .directory
            .resolve(address)
            .ok_or(Error::GuardUnavailable { guard: address })?;
        Ok(Some(ActiveGuard { address, module }))
    }
}
