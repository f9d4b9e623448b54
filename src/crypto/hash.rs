//! Cryptographic hashing utilities for the light client
//!
//! Provides the SHA-256 based hashing functions used for block hashes
//! and merkle tree nodes.

use sha2::{Digest, Sha256};

/// Size of a SHA-256 digest in bytes
pub const HASH_SIZE: usize = 32;

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes double SHA-256 hash (SHA-256 of SHA-256)
///
/// The result is in protocol-internal byte order; callers that need the
/// display form reverse it.
pub fn double_sha256(data: &[u8]) -> [u8; HASH_SIZE] {
    sha256(&sha256(data))
}

/// Computes double SHA-256 and returns it byte-reversed (display order)
pub fn double_sha256_reversed(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut digest = double_sha256(data);
    digest.reverse();
    digest
}
