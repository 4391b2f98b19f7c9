//! Address-to-module resolution.

use guard::{Address, Guard};
use std::collections::HashMap;
use std::sync::Arc;

/// Live guard modules, keyed by the address they are deployed at.
///
/// Stands in for "the code at an address": the registry only ever holds an
/// address and resolves it here when it needs to call into the module.
#[derive(Default, Clone)]
pub struct ModuleDirectory {
    modules: HashMap<Address, Arc<dyn Guard>>,
}

impl ModuleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a module at `address`, replacing whatever was there.
    pub fn deploy(&mut self, address: Address, module: Arc<dyn Guard>) {
        self.modules.insert(address, module);
    }

    /// Builder form of [`deploy`](Self::deploy).
    pub fn with_module(mut self, address: Address, module: Arc<dyn Guard>) -> Self {
        self.deploy(address, module);
        self
    }

    pub fn resolve(&self, address: Address) -> Option<Arc<dyn Guard>> {
        self.modules.get(&address).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for ModuleDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.modules.keys()).finish()
    }
}
