//! Account configuration.

use guard::Address;
use serde::{Deserialize, Serialize};

/// Static configuration of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// The account's own address. Only calls from this address may change the guard.
    pub address: Address,

    /// Modules allowed to execute transactions through the account.
    #[serde(default)]
    pub modules: Vec<Address>,
}

impl AccountConfig {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            modules: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: Address) -> Self {
        self.modules.push(module);
        self
    }

    pub fn is_module_enabled(&self, module: Address) -> bool {
        self.modules.contains(&module)
    }
}
