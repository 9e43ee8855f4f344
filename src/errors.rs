//! Unified application error type.
//! All modules (db, core, import, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Cannot open database {path}: {1}", path = .0.display())]
    DbOpen(PathBuf, #[source] rusqlite::Error),

    #[error("Cannot create directory {path}: {1}", path = .0.display())]
    Storage(PathBuf, #[source] io::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid payment status: {0}")]
    InvalidStatus(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Invalid audit action: {0}")]
    InvalidAction(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("A customer named '{0}' already exists")]
    DuplicateCustomer(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(i64),

    #[error("Transaction not found: #{0}")]
    TransactionNotFound(i64),

    #[error("No attachment stored for transaction #{0}")]
    NoAttachment(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration {path}: {1}", path = .0.display())]
    ConfigLoad(PathBuf, #[source] io::Error),

    #[error("Failed to save configuration {path}: {1}", path = .0.display())]
    ConfigSave(PathBuf, #[source] io::Error),

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Import failed: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Receipt error: {0}")]
    Receipt(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
