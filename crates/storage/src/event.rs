//! Event types for the account event log.

use chrono::{DateTime, Utc};
use guard::{Address, TxHash};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of event that occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// The active guard was replaced. `None` means the guard was disabled.
    ChangedGuard { guard: Option<Address> },
    /// An account-originated transaction ran and its call succeeded.
    ExecutionSuccess { tx_hash: TxHash },
    /// An account-originated transaction ran and its call failed.
    ExecutionFailure { tx_hash: TxHash, reason: String },
    /// A module-originated transaction succeeded.
    ExecutionFromModuleSuccess { module: Address },
    /// A module-originated transaction failed.
    ExecutionFromModuleFailure { module: Address, reason: String },
}

impl EventKind {
    /// Stable name stored alongside the payload and used for filtering.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ChangedGuard { .. } => "changed_guard",
            EventKind::ExecutionSuccess { .. } => "execution_success",
            EventKind::ExecutionFailure { .. } => "execution_failure",
            EventKind::ExecutionFromModuleSuccess { .. } => "execution_from_module_success",
            EventKind::ExecutionFromModuleFailure { .. } => "execution_from_module_failure",
        }
    }
}

/// An event emitted by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub account: Address,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(account: Address, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn changed_guard(account: Address, guard: Option<Address>) -> Self {
        Self::new(account, EventKind::ChangedGuard { guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_name_matches_serde_tag() {
        let kinds = [
            EventKind::ChangedGuard { guard: None },
            EventKind::ExecutionSuccess {
                tx_hash: TxHash::default(),
            },
            EventKind::ExecutionFromModuleFailure {
                module: Address([3; 20]),
                reason: "boom".into(),
            },
        ];
        for kind in kinds {
            let json = serde_json::to_value(&kind).unwrap();
            assert_eq!(json["kind"], kind.name());
        }
    }

    #[test]
    fn disabled_guard_serializes_as_null() {
        let json = serde_json::to_value(EventKind::ChangedGuard { guard: None }).unwrap();
        assert!(json["guard"].is_null());
    }
}
