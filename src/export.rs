//! CSV output
//!
//! Writes the final header and every buffered row. The destination is
//! created fresh and removed again if writing fails part way.

use crate::error::{CandumpError, Result};
use crate::rows::Row;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Write `schema` as the header followed by `rows` projected onto it
pub fn write_csv(path: &Path, schema: &[String], rows: &[Row]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                CandumpError::OutputExists(path.to_path_buf())
            } else {
                CandumpError::Export(format!("failed to create {}: {}", path.display(), e))
            }
        })?;

    info!(path = %path.display(), "Opening CSV file");

    if let Err(e) = write_to(file, schema, rows) {
        if let Err(cleanup) = std::fs::remove_file(path) {
            debug!(path = %path.display(), error = %cleanup, "could not remove partial CSV file");
        }
        return Err(e);
    }

    Ok(())
}

/// Write CSV to any sink. Used by [`write_csv`] and for in-memory output.
pub fn write_to<W: Write>(sink: W, schema: &[String], rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(schema)?;
    for row in rows {
        writer.write_record(row.project(schema))?;
    }
    writer
        .flush()
        .map_err(|e| CandumpError::Export(format!("failed to flush CSV output: {}", e)))?;
    Ok(())
}
