//! Spreadsheet readers for batch import.
//!
//! Both readers skip the header row and yield the data rows in the fixed
//! column order of the import template, tagged with their 1-based sheet row.

mod csv;
mod xlsx;

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::path::Path;

/// Number of columns read per row (customer, service, date, cost, status, notes).
pub const COLUMNS: usize = 6;

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    /// Text cell, or `Empty` for blank strings.
    pub fn text(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(t.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Cell rendered as trimmed text (`None` when empty).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// One data row of an import file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based row number in the source sheet.
    pub row: usize,
    pub cells: Vec<Cell>,
}

impl ImportRow {
    pub fn new(row: usize, mut cells: Vec<Cell>) -> Self {
        cells.resize(COLUMNS, Cell::Empty);
        Self { row, cells }
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&Cell::Empty)
    }

    /// Blank rows inside the sheet are still reported, as failed rows.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Read an import file, choosing the reader by extension.
///
/// Any failure here is file-level and aborts the whole import.
pub fn read_rows(path: &Path) -> AppResult<Vec<ImportRow>> {
    if !path.is_file() {
        return Err(AppError::Import(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" => xlsx::read(path),
        "csv" => csv::read(path),
        other => Err(AppError::Import(format!(
            "unsupported file type '.{}' (expected .xlsx or .csv)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_rendering() {
        assert_eq!(Cell::text("  "), Cell::Empty);
        assert_eq!(Cell::Number(62.0).as_text().as_deref(), Some("62"));
        assert_eq!(Cell::Number(12.5).as_text().as_deref(), Some("12.5"));
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
                .as_text()
                .as_deref(),
            Some("2024-01-02")
        );
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn rows_are_padded_to_template_width() {
        let r = ImportRow::new(2, vec![Cell::text("A")]);
        assert_eq!(r.cells.len(), COLUMNS);
        assert_eq!(r.cell(5), &Cell::Empty);
        assert_eq!(r.cell(99), &Cell::Empty);
        assert!(!r.is_blank());
        assert!(ImportRow::new(3, vec![]).is_blank());
    }

    #[test]
    fn unsupported_extension_is_a_file_level_error() {
        let p = std::env::temp_dir().join(format!("officedesk_import_{}.txt", std::process::id()));
        std::fs::write(&p, "x").unwrap();
        assert!(matches!(read_rows(&p), Err(AppError::Import(_))));
        std::fs::remove_file(&p).ok();

        assert!(matches!(
            read_rows(Path::new("/no/such/file.xlsx")),
            Err(AppError::Import(_))
        ));
    }
}
