//! Storage module for header chain persistence

pub mod persistence;

pub use persistence::{
    load_from_file, restore_chain, save_to_file, Storage, StorageConfig, StorageError,
    CHAIN_FILE_VERSION,
};
