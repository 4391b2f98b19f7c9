//! Primitive types shared by guards, the registry and the execution engine.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account or module identifier.
///
/// Rendered as `0x`-prefixed lowercase hex. The all-zero address is the
/// "none" sentinel wherever an optional address is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Build an address from a slice, failing unless it is exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 20] = bytes
            .try_into()
            .map_err(|_| Error::InvalidAddress(hex::encode(bytes)))?;
        Ok(Self(raw))
    }

    /// Collapse the zero address into `None`.
    pub fn non_zero(self) -> Option<Self> {
        (!self.is_zero()).then_some(self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| Error::InvalidAddress(s.to_string()))?;
        Self::from_slice(&bytes).map_err(|_| Error::InvalidAddress(s.to_string()))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash identifying a single account transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for TxHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut raw = [0u8; 32];
        hex::decode_to_slice(digits, &mut raw).map_err(|_| Error::InvalidHash(s.to_string()))?;
        Ok(Self(raw))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How the account performs a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[default]
    Call,
    DelegateCall,
}

/// The part of a transaction every hook sees: where it goes and what it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub target: Address,
    pub value: u128,
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub operation: Operation,
}

impl Call {
    pub fn new(target: Address, value: u128, data: impl Into<Vec<u8>>) -> Self {
        Self {
            target,
            value,
            data: data.into(),
            operation: Operation::Call,
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }
}

/// Gas and refund parameters of an account-originated transaction.
///
/// Carried through to guards for policy evaluation; nothing in this
/// workspace meters gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeParams {
    pub safe_tx_gas: u64,
    pub base_gas: u64,
    pub gas_price: u128,
    pub gas_token: Address,
    pub refund_receiver: Address,
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parses_with_and_without_prefix() {
        let a: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let b: Address = "00000000000000000000000000000000000000aa".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.0[19], 0xaa);
        assert_eq!(a.to_string(), "0x00000000000000000000000000000000000000aa");
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("not hex".parse::<Address>().is_err());
    }

    #[test]
    fn zero_address_collapses_to_none() {
        assert_eq!(Address::ZERO.non_zero(), None);
        assert_eq!(Address([1; 20]).non_zero(), Some(Address([1; 20])));
    }

    #[test]
    fn call_serializes_payload_as_hex() {
        let call = Call::new(Address([2; 20]), 5, vec![0xde, 0xad]);
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["data"], "0xdead");
        assert_eq!(json["operation"], "call");

        let back: Call = serde_json::from_value(json).unwrap();
        assert_eq!(back, call);
    }
}
