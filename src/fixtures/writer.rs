use serde::Serialize;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

fn builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.quote_style(csv::QuoteStyle::Never);
    builder
}

fn write_rows<T: Serialize, W: io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[T],
) -> csv::Result<()> {
    for record in records {
        wtr.serialize(record)?;
    }
    Ok(())
}

/// Writes a header row plus one row per record; columns follow the record's
/// field order. Existing files are replaced.
pub fn write_delimited<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = builder().from_path(path).map_err(csv_err)?;
    write_rows(&mut wtr, records).map_err(csv_err)?;
    wtr.flush().map_err(|err| Error::io(path, err))?;
    log::debug!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Same rows as [`write_delimited`], kept in memory.
pub fn delimited_string<T: Serialize>(records: &[T]) -> Result<String> {
    let mut wtr = builder().from_writer(vec![]);
    write_rows(&mut wtr, records)?;
    let bytes = wtr
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)).into())
}

/// Leading rows shown after a dataset is written.
pub fn preview<T>(records: &[T], rows: usize) -> &[T] {
    &records[..rows.min(records.len())]
}
