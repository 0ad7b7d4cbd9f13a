//! CSV export of summary tables.

use std::fs::File;
use std::path::Path;

use adoption_core::error::{AdoptionError, Result};
use adoption_data::summary::Tabular;
use tracing::debug;

/// Write `rows` to `path` with a header line, replacing any existing file.
pub fn write_table<R: Tabular>(path: &Path, rows: &[R]) -> Result<()> {
    let file = File::create(path).map_err(|source| AdoptionError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(R::headers())?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush().map_err(|source| AdoptionError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
