//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--db-path <path>] [--host <host>] [--port <port>]
//! - bookshelf count [--config <path>] [--db-path <path>]
//! - bookshelf hash [--config <path>] [--db-path <path>]
//! - bookshelf import-legacy --input <path> [--config <path>] [--db-path <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a book catalog served over HTTP from a CSV file
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the CSV store file (overrides the config file)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the number of stored books
    Count {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print the SHA-256 hash of the store file
    Hash {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Import records from a legacy plain-format file
    ImportLegacy {
        #[command(flatten)]
        store: StoreArgs,

        /// Legacy file to read
        #[arg(long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
