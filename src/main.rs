//! SPV Light Client CLI Application
//!
//! A command-line interface over a persisted header chain.

use clap::{Parser, Subcommand};
use spv_light_client::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spv-light")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A Bitcoin SPV light client in Rust", long_about = None)]
struct Cli {
    /// Data directory for header chain storage
    #[arg(short, long, default_value = ".spv_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a header chain from a trusted genesis header
    Init {
        /// Raw 80-byte genesis header as hex
        #[arg(long)]
        header: String,

        /// Height of the genesis header
        #[arg(long)]
        height: u64,

        /// Replace an existing chain
        #[arg(long)]
        force: bool,
    },

    /// Submit the next block header
    Submit {
        /// Raw 80-byte header as hex
        #[arg(long)]
        header: String,
    },

    /// Print the block hash stored at a height
    BlockHash {
        #[arg(long)]
        height: u64,
    },

    /// Print the height of a stored block hash
    BlockHeight {
        #[arg(long)]
        hash: String,
    },

    /// Show the latest stored block
    Latest,

    /// Decode the header stored at a height
    Header {
        #[arg(long)]
        height: u64,
    },

    /// Verify a transaction's merkle inclusion proof
    VerifyTx {
        /// Height of the block containing the transaction
        #[arg(long)]
        height: u64,

        /// Position of the transaction in the block
        #[arg(long)]
        index: u64,

        /// Transaction hash (display order)
        #[arg(long)]
        tx: String,

        /// Raw header of the block at `height` as hex
        #[arg(long)]
        header: String,

        /// Sibling hashes from leaf to root (comma-separated)
        #[arg(long, default_value = "")]
        proof: String,
    },

    /// List backups of the chain file
    Backups,

    /// Replace the chain with a backup
    RestoreBackup {
        /// Backup index (0 is the newest)
        #[arg(short, long)]
        index: usize,
    },

    /// Export the header chain to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a header chain from a file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init command separately (doesn't need a loaded chain)
    if let Commands::Init {
        header,
        height,
        force,
    } = &cli.command
    {
        return cli::cmd_init(&cli.data_dir, header, *height, *force);
    }

    let mut state = AppState::load(&cli.data_dir)?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),

        Commands::Submit { header } => {
            cli::cmd_submit(&mut state, &header)?;
        }

        Commands::BlockHash { height } => {
            cli::cmd_block_hash(&state, height)?;
        }

        Commands::BlockHeight { hash } => {
            cli::cmd_block_height(&state, &hash)?;
        }

        Commands::Latest => {
            cli::cmd_latest(&state)?;
        }

        Commands::Header { height } => {
            cli::cmd_header(&state, height)?;
        }

        Commands::VerifyTx {
            height,
            index,
            tx,
            header,
            proof,
        } => {
            cli::cmd_verify_tx(&state, height, index, &tx, &header, &proof)?;
        }

        Commands::Backups => {
            cli::cmd_backups(&state)?;
        }

        Commands::RestoreBackup { index } => {
            cli::cmd_restore_backup(&mut state, index)?;
        }

        Commands::Export { output } => {
            cli::cmd_export(&state, &output)?;
        }

        Commands::Import { input } => {
            cli::cmd_import(&mut state, &input)?;
        }
    }

    Ok(())
}
