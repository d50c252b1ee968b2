use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use super::DatasetError;

/// One CSV row keyed by the header row's column names.
pub type CsvRecord = BTreeMap<String, String>;

/// Read a CSV file with a header row into one record per data row.
///
/// Rows keep file order. Blank lines are skipped. A row shorter than the
/// header omits the missing columns; fields beyond the header are dropped.
pub fn read_csv(path: &Path) -> Result<Vec<CsvRecord>, DatasetError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() > headers.len() {
            tracing::warn!(
                path = %path.display(),
                row = idx + 1,
                extra = row.len() - headers.len(),
                "CSV row has more fields than the header, dropping the surplus"
            );
        }
        let record: CsvRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "CSV loaded");
    Ok(records)
}
