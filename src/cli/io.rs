//! JSON output for one-shot commands
//!
//! Each command prints a single JSON object on stdout:
//! `{"status": "ok", "data": ...}`

use std::io::Write;

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response envelope to `writer`
pub fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
