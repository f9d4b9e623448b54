//! Block header codec
//!
//! A header is an opaque 80-byte record. Field layout (all integers
//! little-endian, hashes in protocol-internal order):
//!
//! | offset | size | field       |
//! |--------|------|-------------|
//! | 0      | 4    | version     |
//! | 4      | 32   | prev hash   |
//! | 36     | 32   | merkle root |
//! | 68     | 4    | timestamp   |
//! | 72     | 4    | bits        |
//! | 76     | 4    | nonce       |
//!
//! Everything this module hands out is in canonical (display) order so
//! it compares directly against stored block hashes.

use crate::crypto::{double_sha256, Hash256, HASH_SIZE};
use chrono::{DateTime, TimeZone, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Block header size in bytes
pub const BLOCK_HEADER_SIZE: usize = 80;

const VERSION_OFFSET: usize = 0;
const PREV_HASH_OFFSET: usize = 4;
const MERKLE_ROOT_OFFSET: usize = 36;
const TIMESTAMP_OFFSET: usize = 68;
const BITS_OFFSET: usize = 72;
const NONCE_OFFSET: usize = 76;

/// Identity of a stored block: the reversed double SHA-256 of its header
pub type BlockHash = Hash256;

/// Header decoding errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    #[error("Invalid block header size: {0} bytes (expected 80)")]
    InvalidSize(usize),
    #[error("Invalid header hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// An immutable, length-checked 80-byte block header
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHeader([u8; BLOCK_HEADER_SIZE]);

impl RawHeader {
    /// Accept `bytes` as a header if and only if it is exactly 80 bytes
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        let arr: [u8; BLOCK_HEADER_SIZE] = bytes
            .try_into()
            .map_err(|_| HeaderError::InvalidSize(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parse a hex-encoded header (optionally `0x`-prefixed)
    pub fn from_hex(hex_str: &str) -> Result<Self, HeaderError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        Self::parse(&hex::decode(hex_str)?)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_HEADER_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Block hash: SHA-256 applied twice, reversed to canonical order
    pub fn hash(&self) -> BlockHash {
        Hash256::from_internal(double_sha256(&self.0))
    }

    /// Previous block hash in canonical order
    pub fn prev_hash(&self) -> BlockHash {
        self.hash_field(PREV_HASH_OFFSET)
    }

    /// Merkle root in canonical order
    pub fn merkle_root(&self) -> Hash256 {
        self.hash_field(MERKLE_ROOT_OFFSET)
    }

    pub fn version(&self) -> u32 {
        self.u32_field(VERSION_OFFSET)
    }

    /// Unix timestamp in seconds
    pub fn timestamp(&self) -> u32 {
        self.u32_field(TIMESTAMP_OFFSET)
    }

    /// Compact difficulty target
    pub fn bits(&self) -> u32 {
        self.u32_field(BITS_OFFSET)
    }

    pub fn nonce(&self) -> u32 {
        self.u32_field(NONCE_OFFSET)
    }

    /// Decompressed proof-of-work target declared by this header
    pub fn target(&self) -> BigUint {
        compact_to_target(self.bits())
    }

    /// Decode every field
    pub fn fields(&self) -> HeaderFields {
        HeaderFields {
            version: self.version(),
            prev_hash: self.prev_hash(),
            merkle_root: self.merkle_root(),
            timestamp: self.timestamp(),
            bits: self.bits(),
            nonce: self.nonce(),
        }
    }

    fn hash_field(&self, offset: usize) -> Hash256 {
        let mut internal = [0u8; HASH_SIZE];
        internal.copy_from_slice(&self.0[offset..offset + HASH_SIZE]);
        Hash256::from_internal(internal)
    }

    fn u32_field(&self, offset: usize) -> u32 {
        let mut le = [0u8; 4];
        le.copy_from_slice(&self.0[offset..offset + 4]);
        u32::from_le_bytes(le)
    }
}

impl fmt::Debug for RawHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHeader({})", self.to_hex())
    }
}

impl Serialize for RawHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RawHeader {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Decoded view of a block header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub version: u32,
    /// Hash of the previous block (canonical order)
    pub prev_hash: BlockHash,
    /// Merkle root of the block's transactions (canonical order)
    pub merkle_root: Hash256,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl HeaderFields {
    /// Serialize back into the 80-byte wire layout
    pub fn encode(&self) -> RawHeader {
        let mut bytes = [0u8; BLOCK_HEADER_SIZE];
        bytes[VERSION_OFFSET..PREV_HASH_OFFSET].copy_from_slice(&self.version.to_le_bytes());
        bytes[PREV_HASH_OFFSET..MERKLE_ROOT_OFFSET].copy_from_slice(&self.prev_hash.to_internal());
        bytes[MERKLE_ROOT_OFFSET..TIMESTAMP_OFFSET]
            .copy_from_slice(&self.merkle_root.to_internal());
        bytes[TIMESTAMP_OFFSET..BITS_OFFSET].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[BITS_OFFSET..NONCE_OFFSET].copy_from_slice(&self.bits.to_le_bytes());
        bytes[NONCE_OFFSET..].copy_from_slice(&self.nonce.to_le_bytes());
        RawHeader(bytes)
    }

    /// Block time as a UTC datetime
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(i64::from(self.timestamp), 0).single()
    }
}

/// Decompress a compact "bits" value into its full target
///
/// The high byte is a base-256 exponent and the low 23 bits are the
/// mantissa; the sign bit (0x00800000) is ignored.
pub fn compact_to_target(bits: u32) -> BigUint {
    let exponent = bits >> 24;
    let mantissa = BigUint::from(bits & 0x007f_ffff);

    if exponent >= 3 {
        mantissa << (8 * (exponent - 3))
    } else {
        mantissa >> (8 * (3 - exponent))
    }
}
