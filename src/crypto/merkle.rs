//! Merkle tree implementation for transaction verification
//!
//! Verifies that a transaction is included in a block using only the
//! block's merkle root and an ordered list of sibling hashes. Every
//! value crossing this API is in canonical (display) order; the
//! conversion to protocol-internal order happens in [`hash_pair`].
//!
//! Trees are built with Bitcoin's odd-level rule: when a level has an
//! odd number of nodes the last node is paired with itself. Proofs built
//! any other way will not verify.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chainhash::Hash256;
use super::hash::double_sha256;

/// Merkle tree errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Leaf index {index} cannot be reached with {depth} proof levels")]
    IndexOutOfRange { index: u64, depth: usize },
    #[error("Leaf index {index} out of range for {leaves} leaves")]
    LeafOutOfRange { index: usize, leaves: usize },
    #[error("Cannot build a merkle tree without leaves")]
    EmptyTree,
}

/// Hash two sibling nodes into their parent
pub fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(&left.to_internal());
    data[32..].copy_from_slice(&right.to_internal());
    Hash256::from_internal(double_sha256(&data))
}

/// Calculate the merkle root from an ordered list of leaf hashes
pub fn calculate_merkle_root(leaves: &[Hash256]) -> Result<Hash256, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyTree);
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }

    Ok(level[0])
}

/// Hash one level into the next, duplicating the last node if odd
fn next_level(level: &[Hash256]) -> Vec<Hash256> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Verify that `leaf_hash` at `leaf_index` reconstructs `expected_root`
///
/// Returns `Ok(false)` for a proof that does not reconstruct the root.
/// Only a structurally impossible proof, one whose sibling count cannot
/// address `leaf_index`, is an error.
pub fn verify_merkle_proof(
    leaf_hash: &Hash256,
    leaf_index: u64,
    siblings: &[Hash256],
    expected_root: &Hash256,
) -> Result<bool, MerkleError> {
    let depth = siblings.len();
    if depth < u64::BITS as usize && leaf_index >> depth != 0 {
        return Err(MerkleError::IndexOutOfRange {
            index: leaf_index,
            depth,
        });
    }

    let mut current = *leaf_hash;
    let mut index = leaf_index;

    for sibling in siblings {
        current = if index % 2 == 0 {
            hash_pair(&current, sibling)
        } else {
            hash_pair(sibling, &current)
        };
        index /= 2;
    }

    Ok(current == *expected_root)
}

/// Proof that a leaf is included under a merkle root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Hash of the proven leaf (transaction hash)
    pub leaf_hash: Hash256,
    /// Zero-based position of the leaf among the original leaves
    pub leaf_index: u64,
    /// Sibling hashes from the leaf level up to the root
    pub siblings: Vec<Hash256>,
}

impl MerkleProof {
    pub fn new(leaf_hash: Hash256, leaf_index: u64, siblings: Vec<Hash256>) -> Self {
        Self {
            leaf_hash,
            leaf_index,
            siblings,
        }
    }

    /// Build the proof for `leaves[index]`
    pub fn build(leaves: &[Hash256], index: usize) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }
        if index >= leaves.len() {
            return Err(MerkleError::LeafOutOfRange {
                index,
                leaves: leaves.len(),
            });
        }

        let mut siblings = Vec::new();
        let mut level = leaves.to_vec();
        let mut position = index;

        while level.len() > 1 {
            // The last node of an odd level is its own sibling
            let sibling = level.get(position ^ 1).unwrap_or(&level[position]);
            siblings.push(*sibling);

            level = next_level(&level);
            position /= 2;
        }

        Ok(Self::new(leaves[index], index as u64, siblings))
    }

    /// Verify the proof against a merkle root
    pub fn verify(&self, expected_root: &Hash256) -> Result<bool, MerkleError> {
        verify_merkle_proof(
            &self.leaf_hash,
            self.leaf_index,
            &self.siblings,
            expected_root,
        )
    }
}
