use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::DatasetError;

/// Read a line-delimited JSON file, one record per line, in file order.
///
/// Lines that fail to parse as `T` are logged and skipped rather than
/// failing the whole read. Blank interior lines are skipped with the same
/// warning; the newline ending the last record is not a blank line.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            skipped += 1;
            tracing::warn!(
                path = %path.display(),
                line_no = idx + 1,
                "Skipping blank JSONL line"
            );
            continue;
        }
        match serde_json::from_str::<T>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    path = %path.display(),
                    line_no = idx + 1,
                    line = trimmed,
                    error = %e,
                    "Skipping malformed JSONL line"
                );
            }
        }
    }

    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        skipped,
        "JSONL loaded"
    );
    Ok(records)
}

/// Write records to a line-delimited JSON file, one compact object per line.
///
/// Truncates an existing file. Order of `records` is preserved.
pub fn write_jsonl<T: Serialize>(records: &[T], path: &Path) -> Result<(), DatasetError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), records = records.len(), "JSONL written");
    Ok(())
}
