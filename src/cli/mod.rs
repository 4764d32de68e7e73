//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - serve: open the store and run the HTTP server
//! - count: print the number of stored books
//! - hash: print the store file hash
//! - import-legacy: load records from the legacy plain format

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{count, hash, import_legacy, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response_to;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
