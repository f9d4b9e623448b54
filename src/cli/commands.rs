//! CLI commands for the light client
//!
//! Implements all command handlers for the CLI interface. Every command
//! except `init` works on the chain persisted in the data directory.

use crate::core::{ChainStore, RawHeader};
use crate::crypto::{Hash256, HashParseError};
use crate::storage::{load_from_file, save_to_file, Storage, StorageConfig};
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub store: ChainStore,
    pub storage: Storage,
}

impl AppState {
    /// Load the persisted chain from `data_dir`
    pub fn load(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(storage_config(data_dir))?;

        if !storage.exists() {
            return Err(format!(
                "No header chain in {:?}. Run `spv-light init` first.",
                data_dir
            )
            .into());
        }

        let store = storage.load()?;
        Ok(Self { store, storage })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.store)?;
        Ok(())
    }
}

fn storage_config(data_dir: &Path) -> StorageConfig {
    StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    }
}

/// Decode a header given as hex
fn decode_header(header_hex: &str) -> CliResult<Vec<u8>> {
    let header_hex = header_hex.trim();
    let header_hex = header_hex.strip_prefix("0x").unwrap_or(header_hex);
    Ok(hex::decode(header_hex)?)
}

/// Parse a comma-separated list of sibling hashes
pub fn parse_proof(proof: &str) -> Result<Vec<Hash256>, HashParseError> {
    proof
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Initialize a new header chain from a trusted genesis header
pub fn cmd_init(data_dir: &Path, header_hex: &str, height: u64, force: bool) -> CliResult<()> {
    let storage = Storage::new(storage_config(data_dir))?;

    if storage.exists() && !force {
        println!("⚠️  Header chain already exists at {:?}", data_dir);
        println!("   Use --force to reinitialize (this will delete existing data)");
        return Ok(());
    }

    let store = ChainStore::init_genesis(&decode_header(header_hex)?, height)?;
    storage.delete()?;
    storage.save(&store)?;

    let (hash, height) = store.latest_block();
    println!("✅ Header chain initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🧱 Genesis: {} at height {}", hash, height);

    Ok(())
}

/// Submit a block header
pub fn cmd_submit(state: &mut AppState, header_hex: &str) -> CliResult<()> {
    let stored = state.store.submit(&decode_header(header_hex)?)?;
    state.save()?;

    println!("✅ Header stored");
    println!("   ├─ Hash: {}", stored.hash);
    println!("   └─ Height: {}", stored.height);

    Ok(())
}

/// Print the hash stored at a height
pub fn cmd_block_hash(state: &AppState, height: u64) -> CliResult<()> {
    println!("{}", state.store.block_hash(height)?);
    Ok(())
}

/// Print the height of a stored hash
pub fn cmd_block_height(state: &AppState, hash: &str) -> CliResult<()> {
    let hash: Hash256 = hash.trim().parse()?;
    println!("{}", state.store.block_height(&hash)?);
    Ok(())
}

/// Show the chain tip
pub fn cmd_latest(state: &AppState) -> CliResult<()> {
    let (hash, height) = state.store.latest_block();
    let genesis = state.store.genesis();

    println!("⛓️  Header Chain Info");
    println!("   ├─ Genesis height: {}", genesis.height);
    println!("   ├─ Stored headers: {}", state.store.block_count());
    println!("   ├─ Latest height: {}", height);
    println!("   └─ Latest hash: {}", hash);

    Ok(())
}

/// Decode and display the header stored at a height
pub fn cmd_header(state: &AppState, height: u64) -> CliResult<()> {
    let header: &RawHeader = state.store.header_at(height)?;
    let fields = header.fields();

    println!("🧱 Block #{}", height);
    println!("   ├─ Hash: {}", header.hash());
    println!("   ├─ Version: {}", fields.version);
    println!("   ├─ Previous: {}", fields.prev_hash);
    println!("   ├─ Merkle root: {}", fields.merkle_root);
    match fields.time() {
        Some(time) => println!("   ├─ Time: {}", time.format("%Y-%m-%d %H:%M:%S")),
        None => println!("   ├─ Time: {}", fields.timestamp),
    }
    println!("   ├─ Bits: {:#010x}", fields.bits);
    println!("   ├─ Target: {:064x}", header.target());
    println!("   ├─ Nonce: {}", fields.nonce);
    println!("   └─ Raw: {}", header.to_hex());

    Ok(())
}

/// Verify a transaction's inclusion in a stored block
pub fn cmd_verify_tx(
    state: &AppState,
    height: u64,
    index: u64,
    tx_hash: &str,
    header_hex: &str,
    proof: &str,
) -> CliResult<()> {
    let tx_hash: Hash256 = tx_hash.trim().parse()?;
    let siblings = parse_proof(proof)?;
    let header = decode_header(header_hex)?;

    if state
        .store
        .verify_tx(height, index, &tx_hash, &header, &siblings)?
    {
        println!("✅ Transaction {} is included in block {}", tx_hash, height);
    } else {
        println!("❌ Proof does not match block {}'s merkle root", height);
    }

    Ok(())
}

/// List saved backups of the chain file
pub fn cmd_backups(state: &AppState) -> CliResult<()> {
    let backups = state.storage.list_backups();
    if backups.is_empty() {
        println!("No backups found");
        return Ok(());
    }

    println!("🗄️  Backups (newest first)");
    for index in backups {
        let store = state.storage.restore_backup(index)?;
        let (hash, height) = store.latest_block();
        println!("   [{}] height {} ({})", index, height, hash);
    }
    Ok(())
}

/// Replace the chain with one of its backups
pub fn cmd_restore_backup(state: &mut AppState, index: usize) -> CliResult<()> {
    state.store = state.storage.restore_backup(index)?;
    state.save()?;

    let (hash, height) = state.store.latest_block();
    println!("♻️  Restored backup {}", index);
    println!("   Latest: {} at height {}", hash, height);
    Ok(())
}

/// Export the header chain to a file
pub fn cmd_export(state: &AppState, path: &Path) -> CliResult<()> {
    save_to_file(&state.store, path)?;
    println!("📦 Header chain exported to {:?}", path);
    Ok(())
}

/// Import a header chain from a file, replaying every header
pub fn cmd_import(state: &mut AppState, path: &Path) -> CliResult<()> {
    state.store = load_from_file(path)?;
    state.save()?;

    println!("📥 Header chain imported from {:?}", path);
    println!("   Height: {}", state.store.latest_block().1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_parse_proof() {
        let joined = fixtures::PROOF_120099_TX5.join(", ");
        let proof = parse_proof(&joined).unwrap();
        assert_eq!(proof, fixtures::hashes(&fixtures::PROOF_120099_TX5));

        assert!(parse_proof("").unwrap().is_empty());
        assert!(parse_proof("abcd").is_err());
    }

    #[test]
    fn test_init_submit_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path();

        assert!(AppState::load(data_dir).is_err());

        cmd_init(data_dir, fixtures::GENESIS_HEADER, fixtures::GENESIS_HEIGHT, false).unwrap();
        let mut state = AppState::load(data_dir).unwrap();
        cmd_submit(&mut state, &format!("0x{}", fixtures::HEADER_120098)).unwrap();

        let reloaded = AppState::load(data_dir).unwrap();
        assert_eq!(
            reloaded.store.latest_block(),
            (fixtures::hash(fixtures::HASH_120098), 120098)
        );

        // Re-running init without --force keeps the existing chain
        cmd_init(data_dir, fixtures::GENESIS_HEADER, 1, false).unwrap();
        assert_eq!(AppState::load(data_dir).unwrap().store.latest_block().1, 120098);

        cmd_init(data_dir, fixtures::GENESIS_HEADER, 1, true).unwrap();
        assert_eq!(AppState::load(data_dir).unwrap().store.latest_block().1, 1);
    }

    #[test]
    fn test_rejected_submit_leaves_file_unchanged() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path();

        cmd_init(data_dir, fixtures::GENESIS_HEADER, fixtures::GENESIS_HEIGHT, false).unwrap();
        let mut state = AppState::load(data_dir).unwrap();
        assert!(cmd_submit(&mut state, fixtures::HEADER_120099).is_err());

        let reloaded = AppState::load(data_dir).unwrap();
        assert_eq!(reloaded.store.block_count(), 1);
    }

    #[test]
    fn test_restore_backup_rolls_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path();

        cmd_init(data_dir, fixtures::GENESIS_HEADER, fixtures::GENESIS_HEIGHT, false).unwrap();
        let mut state = AppState::load(data_dir).unwrap();
        cmd_submit(&mut state, fixtures::HEADER_120098).unwrap();
        cmd_submit(&mut state, fixtures::HEADER_120099).unwrap();
        assert_eq!(state.storage.list_backups(), vec![0, 1]);
        cmd_backups(&state).unwrap();

        // Backup 0 is the chain as it was before the last submit
        cmd_restore_backup(&mut state, 0).unwrap();
        let reloaded = AppState::load(data_dir).unwrap();
        assert_eq!(
            reloaded.store.latest_block(),
            (fixtures::hash(fixtures::HASH_120098), 120098)
        );

        assert!(cmd_restore_backup(&mut state, 4).is_err());
    }

    #[test]
    fn test_export_import() {
        let source_dir = tempfile::tempdir().unwrap();
        let target_dir = tempfile::tempdir().unwrap();
        let export = source_dir.path().join("export.json");

        cmd_init(source_dir.path(), fixtures::GENESIS_HEADER, fixtures::GENESIS_HEIGHT, false)
            .unwrap();
        let mut source = AppState::load(source_dir.path()).unwrap();
        cmd_submit(&mut source, fixtures::HEADER_120098).unwrap();
        cmd_export(&source, &export).unwrap();

        cmd_init(target_dir.path(), fixtures::GENESIS_HEADER, 1, false).unwrap();
        let mut target = AppState::load(target_dir.path()).unwrap();
        cmd_import(&mut target, &export).unwrap();

        let reloaded = AppState::load(target_dir.path()).unwrap();
        assert_eq!(reloaded.store.latest_block(), source.store.latest_block());
        assert_eq!(reloaded.store.genesis_height(), fixtures::GENESIS_HEIGHT);
    }

    #[test]
    fn test_read_commands() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path();

        cmd_init(data_dir, fixtures::GENESIS_HEADER, fixtures::GENESIS_HEIGHT, false).unwrap();
        let state = AppState::load(data_dir).unwrap();

        cmd_header(&state, fixtures::GENESIS_HEIGHT).unwrap();
        cmd_latest(&state).unwrap();
        cmd_block_hash(&state, fixtures::GENESIS_HEIGHT).unwrap();
        cmd_block_height(&state, fixtures::GENESIS_HASH).unwrap();
        assert!(cmd_header(&state, fixtures::GENESIS_HEIGHT + 1).is_err());
        assert!(cmd_block_height(&state, fixtures::HASH_120098).is_err());
    }
}
