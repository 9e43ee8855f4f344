// src/export/mod.rs

pub(crate) mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
pub mod pdf;
mod pdf_export;
pub mod pdf_font;
pub mod pdf_image;
pub mod receipt;
pub mod template;
mod xlsx;

pub(crate) use fs_utils::ensure_writable;
pub use logic::{ExportLogic, ExportRequest};
pub use model::TransactionExport;
pub use pdf_font::FontSet;
pub use receipt::{ReceiptData, ReceiptKind};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}
