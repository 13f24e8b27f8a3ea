//! # Core Domain Entities
//!
//! Identities and call metadata as delivered by the host.
//!
//! ## Contents
//!
//! - [`Address`]: 20-byte principal identity (deployer, manufacturers, owners)
//! - [`Hash`]: 32-byte digest used for provenance chaining
//! - [`CallContext`]: authenticated caller plus the block it executes in

use crate::errors::AddressError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// The all-zero hash. Provenance chains start from this value.
pub const ZERO_HASH: Hash = [0u8; 32];

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte principal address.
///
/// Serializes as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address with every byte set to `byte`.
    ///
    /// Handy for fixtures: `Address::repeat_byte(1)` reads as "wallet 1".
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full `0x`-prefixed hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(AddressError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressVisitor;

        impl<'de> de::Visitor<'de> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 20-byte hex string, optionally 0x-prefixed")
            }

            fn visit_str<E>(self, value: &str) -> Result<Address, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Metadata the host attaches to every call it hands to the registry.
///
/// The host has already authenticated `caller`; the registry trusts it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Authenticated identity that submitted the call.
    pub caller: Address,
    /// Height of the block the call executes in.
    pub block_height: u64,
}

impl CallContext {
    /// Create a context for `caller` at `block_height`.
    #[must_use]
    pub const fn new(caller: Address, block_height: u64) -> Self {
        Self {
            caller,
            block_height,
        }
    }

    /// Context at height 0, for callers that do not track blocks.
    #[must_use]
    pub const fn at_genesis(caller: Address) -> Self {
        Self::new(caller, 0)
    }
}
