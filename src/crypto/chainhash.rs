//! 32-byte hash values in canonical (display) byte order
//!
//! Block hashes, transaction hashes and merkle nodes all cross the
//! public API as `Hash256`. The stored bytes are the *display* order,
//! i.e. the byte-reversal of what the protocol embeds in headers and
//! feeds into SHA-256.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::hash::HASH_SIZE;

/// Errors produced when decoding a hash from text or bytes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashParseError {
    #[error("Invalid hash length: {0} bytes (expected 32)")]
    InvalidLength(usize),
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A 32-byte hash kept in canonical (display) byte order
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256([u8; HASH_SIZE]);

impl Hash256 {
    /// Wrap bytes that are already in canonical order
    pub const fn from_canonical(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap bytes given in protocol-internal order, reversing them
    pub fn from_internal(mut bytes: [u8; HASH_SIZE]) -> Self {
        bytes.reverse();
        Self(bytes)
    }

    /// Build from a canonical-order slice that must be exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashParseError> {
        let arr: [u8; HASH_SIZE] = bytes
            .try_into()
            .map_err(|_| HashParseError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Canonical-order bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Bytes in protocol-internal order
    pub fn to_internal(&self) -> [u8; HASH_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    /// Parses 64 hex characters (optionally `0x`-prefixed) in display order
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
