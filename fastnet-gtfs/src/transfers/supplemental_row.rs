use super::transfer_error::TransferError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// columns the supplemental transfers file must declare
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "from_stop_id",
    "to_stop_id",
    "dist",
    "from_route_id",
    "to_route_id",
    "schedule_precedence",
];

/// columns consumed by name; anything else passes through as an extra
/// attribute
const KNOWN_COLUMNS: [&str; 8] = [
    "from_stop_id",
    "to_stop_id",
    "dist",
    "from_route_id",
    "to_route_id",
    "schedule_precedence",
    "transfer_type",
    "min_transfer_time",
];

/// a row of the supplemental transfers file, which extends the base feed's
/// transfer list with walk distances and descriptive attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplementalRow {
    pub from_stop_id: String,
    pub to_stop_id: String,
    /// link walk distance in miles
    pub dist: f64,
    pub from_route_id: Option<String>,
    pub to_route_id: Option<String>,
    pub schedule_precedence: Option<String>,
    /// policy code, honored for rows with no base feed counterpart
    #[serde(default)]
    pub transfer_type: Option<u8>,
    /// minimum transfer time in seconds, honored for rows with no base feed
    /// counterpart
    #[serde(default)]
    pub min_transfer_time: Option<f64>,
    /// descriptive columns passed through to the export untouched
    #[serde(skip)]
    pub extras: BTreeMap<String, String>,
}

/// reads the supplemental transfers file, verifying the required columns are
/// declared before any row is parsed.
pub fn read_supplemental_file(
    input_dir: &Path,
    filename: &str,
) -> Result<Vec<SupplementalRow>, TransferError> {
    let path = input_dir.join(filename);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|e| TransferError::ReadError {
            filename: filename.to_string(),
            error: format!("{e}"),
        })?;
    let headers = reader
        .headers()
        .map_err(|e| TransferError::ReadError {
            filename: filename.to_string(),
            error: format!("{e}"),
        })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(TransferError::MissingColumnError {
                filename: filename.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = vec![];
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TransferError::ReadError {
            filename: filename.to_string(),
            error: format!("record {}: {e}", idx + 1),
        })?;
        let mut row: SupplementalRow =
            record
                .deserialize(Some(&headers))
                .map_err(|e| TransferError::ReadError {
                    filename: filename.to_string(),
                    error: format!("record {}: {e}", idx + 1),
                })?;
        row.extras = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !KNOWN_COLUMNS.contains(header))
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
