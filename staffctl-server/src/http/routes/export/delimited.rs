//! CSV rendering

use super::{ExportError, WIRE_COLUMNS};
use crate::http::routes::employees::EmployeeResponse;

/// Serialize employees as CSV with a header row of wire field names.
///
/// The header is written even when there are no rows.
pub fn write_csv(rows: &[EmployeeResponse]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(WIRE_COLUMNS)?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::CsvFlush(e.to_string()))
}
