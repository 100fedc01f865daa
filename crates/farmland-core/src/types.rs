//! Core type definitions for the Farmland ledger

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token amount in the smallest unit (6 decimals for both FLS and the reserve asset)
pub type Amount = u128;

/// Exchange rate, interpreted against a pool's rate scale
pub type Rate = u128;

/// Block height assigned by the runtime (genesis = 0)
pub type BlockHeight = u64;

/// Account or contract address (20 bytes, hex-encoded with `0x` prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

/// Address parsing errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Expected 40 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl Address {
    /// The reserved all-zero address
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address whose last 8 bytes hold `n` (big-endian)
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != 40 {
            return Err(AddressParseError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque role identifier used by access control
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Root of the role hierarchy; admin of every role without an explicit admin
    pub const DEFAULT_ADMIN: Role = Role(Cow::Borrowed("DEFAULT_ADMIN"));
    /// Token owner; admin of `MINTER` and `PAUSER`
    pub const OWNER: Role = Role(Cow::Borrowed("OWNER"));
    /// May mint and burn FLS
    pub const MINTER: Role = Role(Cow::Borrowed("MINTER"));
    /// May pause and unpause FLS
    pub const PAUSER: Role = Role(Cow::Borrowed("PAUSER"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Transaction ID assigned by the runtime on commit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl TxId {
    /// Derive the ID of the `sequence`-th committed transaction
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("0x{:016x}", sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Constants
pub mod constants {
    use super::Amount;

    /// Decimals of both FLS and the reserve asset
    pub const DECIMALS: u8 = 6;

    /// One display unit in smallest units
    pub const UNIT: Amount = 1_000_000;
}

/// Serde helper: amounts and rates as decimal strings.
///
/// `u128` values overflow JSON number handling in most clients, and serde's
/// buffered content (internally tagged enums) cannot carry them at all.
/// Deserialization also accepts plain JSON integers.
pub mod decimal {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative amount: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid decimal amount: {:?}", v)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holding {
        #[serde(with = "decimal")]
        amount: Amount,
    }

    #[test]
    fn test_decimal_serde() {
        let holding = Holding { amount: Amount::MAX };
        let json = serde_json::to_string(&holding).unwrap();
        assert_eq!(json, format!("{{\"amount\":\"{}\"}}", Amount::MAX));
        assert_eq!(serde_json::from_str::<Holding>(&json).unwrap(), holding);

        let from_number: Holding = serde_json::from_str("{\"amount\":42}").unwrap();
        assert_eq!(from_number.amount, 42);
        assert!(serde_json::from_str::<Holding>("{\"amount\":\"-1\"}").is_err());
        assert!(serde_json::from_str::<Holding>("{\"amount\":-1}").is_err());
    }

    #[test]
    fn test_address_display_and_parse() {
        let addr = Address::from_low_u64(0xbeef);
        let s = addr.to_string();
        assert_eq!(s, "0x000000000000000000000000000000000000beef");
        assert_eq!(s.parse::<Address>().unwrap(), addr);
        assert_eq!(
            "000000000000000000000000000000000000BEEF"
                .parse::<Address>()
                .unwrap(),
            addr
        );
    }

    #[test]
    fn test_address_parse_errors() {
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength(4))
        );
        assert!(matches!(
            "0xzz00000000000000000000000000000000000000".parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_serde_as_string() {
        let addr = Address::from_low_u64(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
    }

    #[test]
    fn test_role_equality_across_representations() {
        assert_eq!(Role::new("MINTER"), Role::MINTER);
        let parsed: Role = serde_json::from_str("\"PAUSER\"").unwrap();
        assert_eq!(parsed, Role::PAUSER);
        assert_eq!(Role::OWNER.to_string(), "OWNER");
    }

    #[test]
    fn test_tx_id_from_sequence() {
        assert_eq!(TxId::from_sequence(255).as_str(), "0x00000000000000ff");
    }
}
