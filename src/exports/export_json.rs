use crate::domain::listing::Listing;
use crate::errors::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Compact JSON array; `agent` and `location` are plain nested objects.
pub fn save_to_json(listings: &[Listing], path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, listings)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
