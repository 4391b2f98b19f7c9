//! Slot keys and word values.

use guard::Address;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::LazyLock;

/// Label hashed into [`GUARD_SLOT`].
pub const GUARD_SLOT_LABEL: &str = "guard_manager.guard.address";

/// Location of the active guard address.
///
/// Derived from a domain-separated label so it never collides with state
/// stored under any other key.
pub static GUARD_SLOT: LazyLock<SlotKey> = LazyLock::new(|| SlotKey::derive(GUARD_SLOT_LABEL));

/// A 32-byte key into the slot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey(pub [u8; 32]);

impl SlotKey {
    /// Hash a namespaced label into a slot key.
    pub fn derive(label: &str) -> Self {
        Self(Sha256::digest(label.as_bytes()).into())
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 32-byte slot value. Unwritten slots read as [`Word::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word(pub [u8; 32]);

impl Word {
    pub const ZERO: Word = Word([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Left-pad an address into a word.
    pub fn from_address(address: Address) -> Self {
        let mut raw = [0u8; 32];
        raw[12..].copy_from_slice(&address.0);
        Self(raw)
    }

    /// The low 20 bytes as an address, `None` for the zero address.
    pub fn to_address(self) -> Option<Address> {
        let mut raw = [0u8; 20];
        raw.copy_from_slice(&self.0[12..]);
        Address(raw).non_zero()
    }

    pub fn from_u64(value: u64) -> Self {
        let mut raw = [0u8; 32];
        raw[24..].copy_from_slice(&value.to_be_bytes());
        Self(raw)
    }

    /// The low 8 bytes as a big-endian integer.
    pub fn to_u64(self) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.0[24..]);
        u64::from_be_bytes(raw)
    }
}

impl From<Option<Address>> for Word {
    fn from(address: Option<Address>) -> Self {
        address.map(Word::from_address).unwrap_or(Word::ZERO)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_slot_is_hash_of_label() {
        assert_eq!(*GUARD_SLOT, SlotKey::derive(GUARD_SLOT_LABEL));
        assert_ne!(*GUARD_SLOT, SlotKey::derive("guard_manager.guard"));
        assert_ne!(GUARD_SLOT.0, [0u8; 32]);
    }

    #[test]
    fn address_word_layout() {
        let address = Address([0xab; 20]);
        let word = Word::from_address(address);
        assert_eq!(&word.0[..12], &[0u8; 12]);
        assert_eq!(word.to_address(), Some(address));
        assert_eq!(Word::ZERO.to_address(), None);
        assert_eq!(Word::from(None), Word::ZERO);
    }

    #[test]
    fn integer_word_layout() {
        assert_eq!(Word::from_u64(42).to_u64(), 42);
        assert_eq!(Word::ZERO.to_u64(), 0);
    }
}
