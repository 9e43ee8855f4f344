// src/export/logic.rs

use crate::db::transactions;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::TransactionExport;
use crate::export::pdf_export::export_pdf;
use crate::export::pdf_font::FontSet;
use crate::export::xlsx::export_xlsx;
use crate::i18n::Locale;
use crate::models::status::StatusFilter;
use crate::models::transaction::SearchFilter;
use crate::ui::messages::warning;
use crate::utils::range::parse_range;
use rusqlite::Connection;
use std::path::Path;

/// What to export and how.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    /// Absolute output path.
    pub file: &'a str,
    /// `None`, `"all"` or a range expression: `YYYY`, `YYYY-MM`,
    /// `YYYY-MM-DD`, or two of the same shape joined by `:`.
    pub range: Option<&'a str>,
    pub status: StatusFilter,
    pub customer: Option<&'a str>,
    pub force: bool,
}

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the advanced-search result set. Returns the number of rows written.
    pub fn export(
        conn: &Connection,
        req: &ExportRequest<'_>,
        locale: Locale,
        fonts: FontSet,
    ) -> AppResult<usize> {
        let path = Path::new(req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        let bounds = match req.range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let filter = SearchFilter {
            customer: req.customer.map(str::to_string),
            date_from: bounds.map(|b| b.0),
            date_to: bounds.map(|b| b.1),
            status: req.status,
            ..SearchFilter::default()
        };

        // advanced search is newest first; exports read chronologically
        let mut rows = transactions::advanced_search(conn, &filter)?;
        rows.reverse();

        if rows.is_empty() {
            warning("No transactions found for the selected filters.");
            return Ok(0);
        }

        ensure_writable(path, req.force)?;

        let items: Vec<TransactionExport> = rows
            .iter()
            .map(|r| TransactionExport::from_row(r, locale))
            .collect();

        match req.format {
            ExportFormat::Csv => export_csv(&items, path)?,
            ExportFormat::Json => export_json(&items, path)?,
            ExportFormat::Xlsx => export_xlsx(&items, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(req.range, req.customer);
                export_pdf(&items, path, &title, fonts)?
            }
        }

        Ok(items.len())
    }
}

/// PDF title from the selected period and customer.
fn build_pdf_title(period: Option<&str>, customer: Option<&str>) -> String {
    let mut title = match period {
        None => "Transactions".to_string(),
        Some(p) if p.eq_ignore_ascii_case("all") => "Transactions".to_string(),
        Some(p) => match p.split_once(':') {
            Some((from, to)) => format!("Transactions from {} to {}", from, to),
            None => format!("Transactions for {}", p),
        },
    };

    if let Some(c) = customer {
        title.push_str(&format!(" ({})", c));
    }
    title
}
