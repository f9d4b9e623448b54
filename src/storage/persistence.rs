//! Header chain persistence layer
//!
//! Saves a chain store as a JSON document and loads it back. Loading
//! replays every stored header through the same checks a live
//! submission goes through, so a file that was edited by hand cannot
//! smuggle an unverified block into the store.

use crate::core::{ChainError, ChainStore, StoredBlock};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current on-disk format version
pub const CHAIN_FILE_VERSION: u32 = 1;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Stored chain rejected: {0}")]
    Chain(#[from] ChainError),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub chain_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".spv_data"),
            chain_file: "chain.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Serialized form of a chain store
#[derive(Debug, Serialize, Deserialize)]
struct ChainDocument {
    version: u32,
    blocks: Vec<StoredBlock>,
}

impl ChainDocument {
    fn from_store(store: &ChainStore) -> Self {
        Self {
            version: CHAIN_FILE_VERSION,
            blocks: store.blocks().cloned().collect(),
        }
    }

    fn into_store(self) -> Result<ChainStore, StorageError> {
        if self.version != CHAIN_FILE_VERSION {
            return Err(StorageError::InvalidData(format!(
                "Unsupported chain file version {}",
                self.version
            )));
        }
        restore_chain(self.blocks)
    }
}

/// Rebuild a chain store from blocks listed in height order
///
/// The first block is installed as genesis; every later header is
/// resubmitted and must land at exactly its recorded height and hash.
pub fn restore_chain(blocks: Vec<StoredBlock>) -> Result<ChainStore, StorageError> {
    let mut blocks = blocks.into_iter();
    let genesis = blocks
        .next()
        .ok_or_else(|| StorageError::InvalidData("Chain has no genesis block".to_string()))?;

    let mut store = ChainStore::init_genesis(genesis.header.as_bytes(), genesis.height)?;
    if store.genesis().hash != genesis.hash {
        return Err(StorageError::InvalidData(format!(
            "Genesis hash mismatch: recorded {}, computed {}",
            genesis.hash,
            store.genesis().hash
        )));
    }

    for block in blocks {
        let stored = store.submit(block.header.as_bytes())?;
        if stored.hash != block.hash || stored.height != block.height {
            return Err(StorageError::InvalidData(format!(
                "Block recorded as {} at height {} replays as {} at height {}",
                block.hash, block.height, stored.hash, stored.height
            )));
        }
    }

    Ok(store)
}

/// Header chain storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Get the chain file path
    pub fn chain_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.chain_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.chain_file, index))
    }

    /// Save the chain to disk
    pub fn save(&self, store: &ChainStore) -> Result<(), StorageError> {
        let path = self.chain_path();

        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join(format!("{}.tmp", self.config.chain_file));
        save_to_file(store, &temp_path)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::debug!(
            "Saved {} headers to {}",
            store.block_count(),
            path.display()
        );
        Ok(())
    }

    /// Load the chain from disk
    pub fn load(&self) -> Result<ChainStore, StorageError> {
        let path = self.chain_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Chain file not found".to_string(),
            ));
        }

        let store = load_from_file(&path)?;
        log::debug!(
            "Loaded {} headers from {}",
            store.block_count(),
            path.display()
        );
        Ok(store)
    }

    /// Check if a saved chain exists
    pub fn exists(&self) -> bool {
        self.chain_path().exists()
    }

    /// Delete the saved chain
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.chain_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<ChainStore, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        load_from_file(&backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|&i| self.backup_path(i).exists())
            .collect()
    }
}

/// Serialize a chain and flush it; nothing is left sitting in a buffer
fn write_chain<W: Write>(writer: &mut W, store: &ChainStore) -> Result<(), StorageError> {
    serde_json::to_writer_pretty(&mut *writer, &ChainDocument::from_store(store))?;
    writer.flush()?;
    Ok(())
}

/// Save a chain to a specific file path
pub fn save_to_file(store: &ChainStore, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_chain(&mut writer, store)?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Load a chain from a specific file path
pub fn load_from_file(path: &Path) -> Result<ChainStore, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let document: ChainDocument = serde_json::from_reader(reader)?;
    document.into_store()
}
