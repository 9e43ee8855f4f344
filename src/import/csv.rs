use super::{Cell, ImportRow};
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// CSV cells are all text; the import logic parses dates and costs.
pub(super) fn read(path: &Path) -> AppResult<Vec<ImportRow>> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Import(e.to_string()))?;

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| AppError::Import(e.to_string()))?;
        // Header is sheet row 1.
        out.push(ImportRow::new(i + 2, record.iter().map(Cell::text).collect()));
    }
    Ok(out)
}
