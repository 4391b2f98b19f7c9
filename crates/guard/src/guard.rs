//! The guard hook interface and its capability-advertising base.

use crate::capability::{CAPABILITY_QUERY, CapabilityId, GUARD_CAPABILITY};
use crate::{Address, Call, FeeParams, TxHash, Veto};

/// A policy module consulted around every account transaction.
///
/// Returning `Ok(())` from a hook lets the transaction continue; a [`Veto`]
/// aborts it. Implementations are swapped at runtime, so the registry only
/// accepts modules whose [`supports_capability`](Guard::supports_capability)
/// answers `true` for [`GUARD_CAPABILITY`].
pub trait Guard: Send + Sync {
    /// Called before the account executes a transaction it originated.
    fn check_before_account_call(
        &self,
        call: &Call,
        fee: &FeeParams,
        signatures: &[u8],
        caller: Address,
    ) -> Result<(), Veto>;

    /// Called before the account executes a transaction on behalf of `module`.
    fn check_before_module_call(&self, call: &Call, module: Address) -> Result<(), Veto>;

    /// Called after a transaction of either origin completed, with its outcome.
    fn check_after_execution(&self, tx_hash: TxHash, success: bool) -> Result<(), Veto>;

    /// Whether this module implements the contract named by `capability`.
    fn supports_capability(&self, capability: CapabilityId) -> bool;
}

/// Hook bodies only; [`Guard::supports_capability`] comes for free.
///
/// Every `BaseGuard` is a [`Guard`] advertising exactly the guard hook
/// capability and the self-description capability.
pub trait BaseGuard: Send + Sync {
    fn check_before_account_call(
        &self,
        call: &Call,
        fee: &FeeParams,
        signatures: &[u8],
        caller: Address,
    ) -> Result<(), Veto>;

    fn check_before_module_call(&self, call: &Call, module: Address) -> Result<(), Veto>;

    fn check_after_execution(&self, tx_hash: TxHash, success: bool) -> Result<(), Veto>;
}

impl<T: BaseGuard> Guard for T {
    fn check_before_account_call(
        &self,
        call: &Call,
        fee: &FeeParams,
        signatures: &[u8],
        caller: Address,
    ) -> Result<(), Veto> {
        BaseGuard::check_before_account_call(self, call, fee, signatures, caller)
    }

    fn check_before_module_call(&self, call: &Call, module: Address) -> Result<(), Veto> {
        BaseGuard::check_before_module_call(self, call, module)
    }

    fn check_after_execution(&self, tx_hash: TxHash, success: bool) -> Result<(), Veto> {
        BaseGuard::check_after_execution(self, tx_hash, success)
    }

    fn supports_capability(&self, capability: CapabilityId) -> bool {
        capability == *GUARD_CAPABILITY || capability == *CAPABILITY_QUERY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyDelegateCall;

    impl BaseGuard for DenyDelegateCall {
        fn check_before_account_call(
            &self,
            call: &Call,
            _fee: &FeeParams,
            _signatures: &[u8],
            _caller: Address,
        ) -> Result<(), Veto> {
            match call.operation {
                crate::Operation::DelegateCall => Err(Veto::new("delegate calls are disabled")),
                crate::Operation::Call => Ok(()),
            }
        }

        fn check_before_module_call(&self, _call: &Call, _module: Address) -> Result<(), Veto> {
            Ok(())
        }

        fn check_after_execution(&self, _tx_hash: TxHash, _success: bool) -> Result<(), Veto> {
            Ok(())
        }
    }

    #[test]
    fn base_guard_advertises_hook_and_query_capabilities() {
        let guard = DenyDelegateCall;
        assert!(guard.supports_capability(*GUARD_CAPABILITY));
        assert!(guard.supports_capability(*CAPABILITY_QUERY));
        assert!(!guard.supports_capability(CapabilityId::INVALID));
        assert!(!guard.supports_capability(CapabilityId([1, 2, 3, 4])));
    }

    #[test]
    fn base_guard_hooks_are_reachable_through_trait_object() {
        let guard: Box<dyn Guard> = Box::new(DenyDelegateCall);
        let call = Call::new(Address([7; 20]), 0, Vec::new());
        let fee = FeeParams::default();

        assert!(
            guard
                .check_before_account_call(&call, &fee, &[], Address::ZERO)
                .is_ok()
        );

        let delegate = call.with_operation(crate::Operation::DelegateCall);
        let veto = guard
            .check_before_account_call(&delegate, &fee, &[], Address::ZERO)
            .unwrap_err();
        assert_eq!(veto.reason, "delegate calls are disabled");
    }
}
