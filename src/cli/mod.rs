//! Command-line interface handlers

pub mod commands;

pub use commands::{
    cmd_backups, cmd_block_hash, cmd_block_height, cmd_export, cmd_header, cmd_import, cmd_init,
    cmd_latest, cmd_restore_backup, cmd_submit, cmd_verify_tx, parse_proof, AppState, CliResult,
};
