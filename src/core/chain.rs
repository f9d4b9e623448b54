//! Header chain store
//!
//! An append-only ledger of block headers anchored at a trusted genesis
//! header. Blocks live in a height-indexed vector (`blocks[0]` is the
//! genesis block) paired with a hash-to-index map, so lookups in both
//! directions are O(1) and the two indexes can never disagree.
//!
//! Every mutating operation either passes all of its checks and commits
//! as a single push, or fails and leaves the store untouched.

use crate::core::header::{BlockHash, RawHeader};
use crate::core::pow::{check_proof_of_work, PowError};
use crate::crypto::{double_sha256_reversed, verify_merkle_proof, Hash256, MerkleError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Chain store errors
///
/// `ForkNotSupported` and `HeightOverflow` are rejections of this store's
/// single-chain layout. They are not part of the failure set a submission
/// is otherwise documented to return (size, exists, unknown parent, proof
/// of work), so callers should not map them onto one of those.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Invalid block header size: {0} bytes (expected 80)")]
    InvalidHeaderSize(usize),
    #[error("Genesis height should be greater than 0")]
    InvalidGenesis,
    #[error("Block already exists: {0}")]
    BlockExists(BlockHash),
    #[error("Previous block hash not found: {0}")]
    PrevBlockNotFound(BlockHash),
    #[error("The block at height {0} does not exist")]
    BlockWithHeightNotFound(u64),
    #[error("The block with hash {0} does not exist")]
    BlockWithHashNotFound(BlockHash),
    #[error("Insufficient proof of work: {0}")]
    InsufficientPow(BlockHash),
    #[error("Height {height} already holds {existing}; competing block {candidate} rejected")]
    ForkNotSupported {
        height: u64,
        existing: BlockHash,
        candidate: BlockHash,
    },
    #[error("Block {0} would be stored above the maximum height")]
    HeightOverflow(BlockHash),
    #[error("Malformed merkle proof: {0}")]
    MalformedProof(#[from] MerkleError),
}

impl From<PowError> for ChainError {
    fn from(err: PowError) -> Self {
        match err {
            PowError::InsufficientPow { hash, .. } => ChainError::InsufficientPow(hash),
        }
    }
}

/// A header accepted into the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlock {
    pub height: u64,
    pub hash: BlockHash,
    pub header: RawHeader,
}

/// Notification produced once a submitted header has been stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStored {
    pub hash: BlockHash,
    pub height: u64,
}

/// Append-only store of verified block headers
#[derive(Debug, Clone)]
pub struct ChainStore {
    /// Blocks ordered by height; never empty
    blocks: Vec<StoredBlock>,
    /// Block hash to position in `blocks`
    index: HashMap<BlockHash, usize>,
}

fn parse_header(bytes: &[u8]) -> Result<RawHeader, ChainError> {
    RawHeader::parse(bytes).map_err(|_| ChainError::InvalidHeaderSize(bytes.len()))
}

impl ChainStore {
    /// Anchor a new chain at a trusted genesis header
    ///
    /// The genesis header is taken on trust: neither its parent nor its
    /// proof of work is checked.
    pub fn init_genesis(header: &[u8], height: u64) -> Result<Self, ChainError> {
        if height == 0 {
            return Err(ChainError::InvalidGenesis);
        }
        let header = parse_header(header)?;
        let hash = header.hash();

        log::info!("Initialized header chain at height {} with {}", height, hash);

        Ok(Self {
            blocks: vec![StoredBlock {
                height,
                hash,
                header,
            }],
            index: HashMap::from([(hash, 0)]),
        })
    }

    /// Verify a header against the chain and append it
    pub fn submit(&mut self, header: &[u8]) -> Result<HeaderStored, ChainError> {
        let result = self.try_submit(header);
        match &result {
            Ok(stored) => log::info!("Stored header {} at height {}", stored.hash, stored.height),
            Err(e) => log::debug!("Rejected header: {}", e),
        }
        result
    }

    fn try_submit(&mut self, header: &[u8]) -> Result<HeaderStored, ChainError> {
        let header = parse_header(header)?;
        let hash = header.hash();

        if self.index.contains_key(&hash) {
            return Err(ChainError::BlockExists(hash));
        }

        let prev_hash = header.prev_hash();
        let prev_height = self
            .height_of(&prev_hash)
            .ok_or(ChainError::PrevBlockNotFound(prev_hash))?;
        let height = prev_height
            .checked_add(1)
            .ok_or(ChainError::HeightOverflow(hash))?;

        // The parent is stored but is not the tip: this would be a second
        // block at an occupied height.
        if let Some(existing) = self.block_at(height) {
            return Err(ChainError::ForkNotSupported {
                height,
                existing: existing.hash,
                candidate: hash,
            });
        }

        check_proof_of_work(&hash, header.bits())?;

        self.index.insert(hash, self.blocks.len());
        self.blocks.push(StoredBlock {
            height,
            hash,
            header,
        });

        Ok(HeaderStored { hash, height })
    }

    /// Hash of the block stored at `height`
    pub fn block_hash(&self, height: u64) -> Result<BlockHash, ChainError> {
        self.block_at(height)
            .map(|block| block.hash)
            .ok_or(ChainError::BlockWithHeightNotFound(height))
    }

    /// Height of the block with `hash`
    pub fn block_height(&self, hash: &BlockHash) -> Result<u64, ChainError> {
        self.height_of(hash)
            .ok_or(ChainError::BlockWithHashNotFound(*hash))
    }

    /// Hash and height of the chain tip
    pub fn latest_block(&self) -> (BlockHash, u64) {
        let tip = self.tip();
        (tip.hash, tip.height)
    }

    /// Raw header stored at `height`
    pub fn header_at(&self, height: u64) -> Result<&RawHeader, ChainError> {
        self.block_at(height)
            .map(|block| &block.header)
            .ok_or(ChainError::BlockWithHeightNotFound(height))
    }

    pub fn genesis(&self) -> &StoredBlock {
        &self.blocks[0]
    }

    pub fn tip(&self) -> &StoredBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn genesis_height(&self) -> u64 {
        self.genesis().height
    }

    /// Number of stored blocks, genesis included
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Stored blocks in ascending height order
    pub fn blocks(&self) -> impl Iterator<Item = &StoredBlock> {
        self.blocks.iter()
    }

    /// Check that a transaction is included in the block at `height`
    ///
    /// `header` must be the raw header of that block; it is hashed and
    /// compared against the stored record before its merkle root is
    /// trusted. A proof that does not reconstruct the root is `Ok(false)`.
    pub fn verify_tx(
        &self,
        height: u64,
        tx_index: u64,
        tx_hash: &Hash256,
        header: &[u8],
        proof: &[Hash256],
    ) -> Result<bool, ChainError> {
        let stored_hash = self.block_hash(height)?;

        let candidate = Hash256::from_canonical(double_sha256_reversed(header));
        if candidate != stored_hash {
            return Err(ChainError::BlockWithHashNotFound(candidate));
        }
        let header = parse_header(header)?;

        let included = verify_merkle_proof(tx_hash, tx_index, proof, &header.merkle_root())?;
        log::debug!(
            "Transaction {} at index {} in block {}: included={}",
            tx_hash,
            tx_index,
            height,
            included
        );
        Ok(included)
    }

    fn block_at(&self, height: u64) -> Option<&StoredBlock> {
        let offset = height.checked_sub(self.genesis_height())?;
        let offset = usize::try_from(offset).ok()?;
        self.blocks.get(offset)
    }

    fn height_of(&self, hash: &BlockHash) -> Option<u64> {
        self.index.get(hash).map(|&i| self.blocks[i].height)
    }
}
