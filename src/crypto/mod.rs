//! Cryptographic utilities for the light client
//!
//! This module provides:
//! - SHA-256 and double SHA-256 hashing
//! - 32-byte hashes in canonical byte order
//! - Merkle root calculation, proof building and verification

pub mod chainhash;
pub mod hash;
pub mod merkle;

pub use chainhash::{Hash256, HashParseError};
pub use hash::{double_sha256, double_sha256_reversed, sha256, HASH_SIZE};
pub use merkle::{
    calculate_merkle_root, hash_pair, verify_merkle_proof, MerkleError, MerkleProof,
};
