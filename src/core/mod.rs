//! Core light client components
//!
//! This module contains the verification core:
//! - Block header codec (80-byte parsing, hashing, compact targets)
//! - Proof of work validation
//! - Header chain store (append-only ledger, transaction verification)

pub mod chain;
pub mod header;
pub mod pow;

pub use chain::{ChainError, ChainStore, HeaderStored, StoredBlock};
pub use header::{
    compact_to_target, BlockHash, HeaderError, HeaderFields, RawHeader, BLOCK_HEADER_SIZE,
};
pub use pow::{check_proof_of_work, hash_to_number, meets_target, PowError};
