use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::LazyLock;

/// Signatures of the three hook methods making up the guard interface.
pub const GUARD_HOOK_SIGNATURES: [&str; 3] = [
    "check_before_account_call(address,uint256,bytes,uint8,uint256,uint256,uint256,address,address,bytes,address)",
    "check_before_module_call(address,uint256,bytes,uint8,address)",
    "check_after_execution(bytes32,bool)",
];

/// Signature of the self-description query.
pub const CAPABILITY_QUERY_SIGNATURE: &str = "supports_capability(bytes4)";

/// Capability id of the guard hook interface.
pub static GUARD_CAPABILITY: LazyLock<CapabilityId> =
    LazyLock::new(|| CapabilityId::from_signatures(&GUARD_HOOK_SIGNATURES));

/// Capability id of the self-description query itself.
pub static CAPABILITY_QUERY: LazyLock<CapabilityId> =
    LazyLock::new(|| CapabilityId::selector(CAPABILITY_QUERY_SIGNATURE));

/// A 4-byte identifier naming a behavioral contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityId(pub [u8; 4]);

impl CapabilityId {
    /// The reserved id no conforming module may claim to support.
    pub const INVALID: CapabilityId = CapabilityId([0xff; 4]);

    /// Selector of a single method: the first four bytes of its signature hash.
    pub fn selector(signature: &str) -> Self {
        let digest = Sha256::digest(signature.as_bytes());
        Self([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Interface id: XOR of the selectors of every method in the interface.
    pub fn from_signatures(signatures: &[&str]) -> Self {
        signatures.iter().fold(Self([0; 4]), |acc, sig| {
            let sel = Self::selector(sig);
            Self([
                acc.0[0] ^ sel.0[0],
                acc.0[1] ^ sel.0[1],
                acc.0[2] ^ sel.0[2],
                acc.0[3] ^ sel.0[3],
            ])
        })
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_capability_is_xor_of_hook_selectors() {
        let [a, b, c] = GUARD_HOOK_SIGNATURES.map(CapabilityId::selector);
        let expected = CapabilityId([
            a.0[0] ^ b.0[0] ^ c.0[0],
            a.0[1] ^ b.0[1] ^ c.0[1],
            a.0[2] ^ b.0[2] ^ c.0[2],
            a.0[3] ^ b.0[3] ^ c.0[3],
        ]);
        assert_eq!(*GUARD_CAPABILITY, expected);
    }

    #[test]
    fn capability_ids_are_distinct() {
        assert_ne!(*GUARD_CAPABILITY, *CAPABILITY_QUERY);
        assert_ne!(*GUARD_CAPABILITY, CapabilityId::INVALID);
        assert_ne!(*CAPABILITY_QUERY, CapabilityId::INVALID);
    }

    #[test]
    fn selector_is_stable() {
        assert_eq!(
            CapabilityId::selector("check_after_execution(bytes32,bool)"),
            CapabilityId::selector("check_after_execution(bytes32,bool)")
        );
        assert_eq!(CapabilityId([0xab, 0, 1, 2]).to_string(), "0xab000102");
    }
}
