//! Long-format CSV writer.
//!
//! Output always starts with the `Data,Ano,Mes,Mes_Nome,Tipo,Grupo,Categoria,Valor`
//! header, even when there are no records. Files are staged next to their
//! destination and renamed into place, so a failed run never leaves a partial
//! output behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::OutputResult;
use crate::models::{LongRecord, LONG_HEADERS};

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Write long records as CSV to any writer.
pub fn write_long_records<W: Write>(
    mut writer: W,
    records: &[LongRecord],
    write_bom: bool,
) -> OutputResult<()> {
    if write_bom {
        writer.write_all(BOM)?;
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(LONG_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render long records to a CSV string (no BOM).
pub fn to_csv_string(records: &[LongRecord]) -> OutputResult<String> {
    let mut buf = Vec::new();
    write_long_records(&mut buf, records, false)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write long records to `path`, replacing it only once everything is written.
pub fn write_long_records_file(
    path: &Path,
    records: &[LongRecord],
    write_bom: bool,
) -> OutputResult<()> {
    let mut staged = stage_next_to(path)?;
    write_long_records(&mut staged, records, write_bom)?;
    staged.persist(path)?;
    Ok(())
}

/// Write any serializable value as pretty JSON to `path`, atomically.
pub fn write_json_file<T: serde::Serialize>(path: &Path, value: &T) -> OutputResult<()> {
    let mut staged = stage_next_to(path)?;
    serde_json::to_writer_pretty(&mut staged, value)?;
    staged.write_all(b"\n")?;
    staged.persist(path)?;
    Ok(())
}

fn stage_next_to(path: &Path) -> std::io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir)
}
