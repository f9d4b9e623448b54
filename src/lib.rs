//! SPV Light Client: Bitcoin header chain verification in Rust
//!
//! This crate verifies a Bitcoin header chain without full blocks:
//! - 80-byte header parsing and double SHA-256 block hashing
//! - Compact ("bits") difficulty decompression and proof of work checks
//! - An append-only header store anchored at a trusted genesis header
//! - Merkle inclusion proofs for transactions in stored blocks
//! - JSON persistence with backups
//!
//! # Example
//!
//! ```rust
//! use spv_light_client::core::ChainStore;
//!
//! // Block 120097, trusted as the starting point
//! let genesis = hex::decode(
//!     "01000000a65157a7d35a487fa2d7019b152a90a8fd150eec19b68deef718000000000000\
//!      a759626da6ca215507d10c8681328b558dbad808c3861a394357eb91d8db1a3f\
//!      3a6ab54dacb5001b38f27f41",
//! )
//! .unwrap();
//!
//! let store = ChainStore::init_genesis(&genesis, 120097).unwrap();
//! let (hash, height) = store.latest_block();
//! assert_eq!(height, 120097);
//! assert_eq!(
//!     hash.to_string(),
//!     "00000000000037128b08b2107b91798d36f4beee8a988abceb21a5bc8b7dc47e"
//! );
//! ```

pub mod cli;
pub mod core;
pub mod crypto;
pub mod storage;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use core::{
    BlockHash, ChainError, ChainStore, HeaderFields, HeaderStored, RawHeader, StoredBlock,
    BLOCK_HEADER_SIZE,
};
pub use crypto::{Hash256, MerkleError, MerkleProof};
pub use storage::{Storage, StorageConfig, StorageError};
