// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, transactions_to_table};
use crate::export::pdf::PdfManager;
use crate::export::pdf_font::FontSet;
use crate::export::{TransactionExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Export PDF usando PdfManager e la tabella generata.
pub(crate) fn export_pdf(
    items: &[TransactionExport],
    path: &Path,
    title: &str,
    fonts: FontSet,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = transactions_to_table(items);

    let mut pdf = PdfManager::new(fonts);
    pdf.write_table(title, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
