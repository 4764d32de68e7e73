//! CLI command implementations
//!
//! Every command resolves its configuration, installs logging, opens the
//! store, then does one thing. `serve` blocks until Ctrl+C; the others print
//! one JSON object and exit.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::catalog::CatalogService;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::storage::legacy::read_legacy_file;

use super::args::{Command, StoreArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response_to;

/// Run a command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { store, host, port } => serve(&store, host, port),
        Command::Count { store } => count(&store),
        Command::Hash { store } => hash(&store),
        Command::ImportLegacy { store, input } => import_legacy(&store, &input),
    }
}

/// Load config and logging, then open the catalog
fn boot(args: &StoreArgs) -> CliResult<(Config, CatalogService)> {
    let config = Config::resolve(args)?;
    init_logging(&config.log)?;

    let catalog = open_catalog(&config)?;
    Ok((config, catalog))
}

fn open_catalog(config: &Config) -> CliResult<CatalogService> {
    info!(db_path = %config.db_path.display(), "Opening catalog");
    Ok(CatalogService::open(&config.db_path)?)
}

/// Start the HTTP server
pub fn serve(args: &StoreArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let (mut config, catalog) = boot(args)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let server = HttpServer::with_config(config.server, Arc::new(catalog));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Print the number of stored books
pub fn count(args: &StoreArgs) -> CliResult<()> {
    let (_, catalog) = boot(args)?;
    write_count(&catalog, &mut io::stdout())
}

fn write_count<W: Write>(catalog: &CatalogService, out: &mut W) -> CliResult<()> {
    let count = catalog.count()?;
    write_response_to(out, json!({ "count": count }))
}

/// Print the store file hash
pub fn hash(args: &StoreArgs) -> CliResult<()> {
    let (_, catalog) = boot(args)?;
    write_hash(&catalog, &mut io::stdout())
}

fn write_hash<W: Write>(catalog: &CatalogService, out: &mut W) -> CliResult<()> {
    let hash = catalog.hash()?;
    write_response_to(out, json!({ "hash": hash }))
}

/// Import a legacy plain-format file into the store
pub fn import_legacy(args: &StoreArgs, input: &Path) -> CliResult<()> {
    let (_, catalog) = boot(args)?;
    write_import(&catalog, input, &mut io::stdout())
}

fn write_import<W: Write>(catalog: &CatalogService, input: &Path, out: &mut W) -> CliResult<()> {
    let books = read_legacy_file(input).map_err(|e| {
        CliError::store_error(format!("Failed to read {}: {}", input.display(), e))
    })?;

    let report = catalog.import(&books)?;
    info!(
        input = %input.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Legacy import complete"
    );

    write_response_to(
        out,
        json!({
            "imported": report.imported,
            "skipped": report.skipped,
        }),
    )
}
