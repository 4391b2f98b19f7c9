//! Account transactions and their hashes.

use guard::{Address, Call, FeeParams, Operation, TxHash};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use storage::SlotKey;

/// Label hashed into [`NONCE_SLOT`].
pub const NONCE_SLOT_LABEL: &str = "account.nonce";

/// Location of the account nonce.
pub static NONCE_SLOT: LazyLock<SlotKey> = LazyLock::new(|| SlotKey::derive(NONCE_SLOT_LABEL));

const ACCOUNT_TX_DOMAIN: &[u8] = b"account.transaction";
const MODULE_TX_DOMAIN: &[u8] = b"account.module_transaction";

/// A transaction the account originates itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub call: Call,
    #[serde(default)]
    pub fee: FeeParams,
    pub nonce: u64,
}

impl Transaction {
    pub fn new(call: Call, nonce: u64) -> Self {
        Self {
            call,
            fee: FeeParams::default(),
            nonce,
        }
    }

    pub fn with_fee(mut self, fee: FeeParams) -> Self {
        self.fee = fee;
        self
    }

    /// Hash binding the transaction to `account`.
    pub fn hash(&self, account: Address) -> TxHash {
        let mut hasher = Sha256::new();
        hasher.update(ACCOUNT_TX_DOMAIN);
        hasher.update(account.0);
        hash_call(&mut hasher, &self.call);
        hasher.update(self.fee.safe_tx_gas.to_be_bytes());
        hasher.update(self.fee.base_gas.to_be_bytes());
        hasher.update(self.fee.gas_price.to_be_bytes());
        hasher.update(self.fee.gas_token.0);
        hasher.update(self.fee.refund_receiver.0);
        hasher.update(self.nonce.to_be_bytes());
        TxHash(hasher.finalize().into())
    }
}

/// Hash of a module-originated call, handed to the after-execution hook.
pub fn module_tx_hash(account: Address, module: Address, call: &Call) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(MODULE_TX_DOMAIN);
    hasher.update(account.0);
    hasher.update(module.0);
    hash_call(&mut hasher, call);
    TxHash(hasher.finalize().into())
}

fn hash_call(hasher: &mut Sha256, call: &Call) {
    hasher.update(call.target.0);
    hasher.update(call.value.to_be_bytes());
    hasher.update((call.data.len() as u64).to_be_bytes());
    hasher.update(&call.data);
    hasher.update([match call.operation {
        Operation::Call => 0u8,
        Operation::DelegateCall => 1u8,
    }]);
}

/// Calls the account makes to itself, carried JSON-encoded in `Call::data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AccountCall {
    /// Replace or disable the active guard.
    SetGuard { guard: Option<Address> },
}

impl AccountCall {
    pub fn encode(&self) -> Vec<u8> {
        // Infallible: the enum holds only strings and options.
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn decode(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// A call targeting `account` that performs this account call.
    pub fn into_call(self, account: Address) -> Call {
        Call::new(account, 0, self.encode())
    }
}
