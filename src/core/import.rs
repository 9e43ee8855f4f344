//! Batch import of transactions from spreadsheet rows.
//!
//! Rows are independent: a malformed row is recorded as a failure and the
//! import moves on. Only storage/IO errors abort the batch. Imported rows
//! are not audited one by one; the batch gets a single IMPORT entry.

use crate::core::vat;
use crate::db::{audit, customers, services, transactions};
use crate::errors::{AppError, AppResult};
use crate::import::{Cell, ImportRow};
use crate::models::audit::{AuditAction, tables};
use crate::models::status::PaymentStatus;
use crate::models::transaction::NewTransaction;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashMap;

const CUSTOMER: usize = 0;
const SERVICE: usize = 1;
const DATE: usize = 2;
const COST: usize = 3;
const STATUS: usize = 4;
const NOTES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportFailure {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub success: usize,
    pub failures: Vec<ImportFailure>,
    /// One line per processed row, in input order.
    pub log: Vec<String>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Errors that only disqualify the current row.
fn is_row_error(e: &AppError) -> bool {
    matches!(
        e,
        AppError::MissingField(_)
            | AppError::UnknownService(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidAmount(_)
            | AppError::InvalidStatus(_)
    )
}

fn required(row: &ImportRow, idx: usize, field: &'static str) -> AppResult<String> {
    row.cell(idx).as_text().ok_or(AppError::MissingField(field))
}

fn parse_date_cell(cell: &Cell) -> AppResult<NaiveDate> {
    match cell {
        Cell::Date(d) => Ok(*d),
        Cell::Text(s) => parse_date(s),
        other => Err(AppError::InvalidDate(other.as_text().unwrap_or_default())),
    }
}

fn parse_cost_cell(cell: &Cell) -> AppResult<f64> {
    match cell {
        Cell::Number(n) => vat::check_cost(*n),
        Cell::Text(s) => vat::parse_cost(s),
        other => Err(AppError::InvalidAmount(other.as_text().unwrap_or_default())),
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn apply(conn: &Connection, rows: &[ImportRow]) -> AppResult<ImportReport> {
        // Service lookup is case-insensitive.
        let available: HashMap<String, i64> = services::list(conn)?
            .into_iter()
            .map(|s| (s.name.to_lowercase(), s.id))
            .collect();

        let mut report = ImportReport::default();

        for row in rows {
            match Self::import_row(conn, &available, row) {
                Ok(customer) => {
                    report.success += 1;
                    report
                        .log
                        .push(format!("✅ Row {}: OK - {}", row.row, customer));
                }
                Err(e) if is_row_error(&e) => {
                    report
                        .log
                        .push(format!("❌ Row {}: Error - {}", row.row, e));
                    report.failures.push(ImportFailure {
                        row: row.row,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        audit::append(
            conn,
            AuditAction::Import,
            tables::TRANSACTIONS,
            0,
            &format!(
                "Batch import: {} succeeded, {} failed",
                report.success,
                report.failed()
            ),
            "",
            "",
        )?;

        Ok(report)
    }

    /// Validate and insert one row. Returns the customer name on success.
    fn import_row(
        conn: &Connection,
        available: &HashMap<String, i64>,
        row: &ImportRow,
    ) -> AppResult<String> {
        if row.is_blank() {
            return Err(AppError::MissingField("required data"));
        }
        let customer = required(row, CUSTOMER, "customer name")?;
        let service = required(row, SERVICE, "service")?;
        required(row, DATE, "date")?;
        required(row, COST, "final cost")?;
        let status_raw = required(row, STATUS, "status")?;
        let notes = row.cell(NOTES).as_text().unwrap_or_default();

        let service_id = *available
            .get(&service.to_lowercase())
            .ok_or_else(|| AppError::UnknownService(service.clone()))?;

        let date = parse_date_cell(row.cell(DATE))?;
        let cost = parse_cost_cell(row.cell(COST))?;

        let status = PaymentStatus::from_input(&status_raw)
            .filter(PaymentStatus::is_active)
            .ok_or_else(|| AppError::InvalidStatus(status_raw.clone()))?;

        let customer_id = customers::get_or_create(conn, &customer)?;

        transactions::add(
            conn,
            &NewTransaction {
                customer_id,
                service_id: Some(service_id),
                notes,
                date,
                cost_pre_vat: vat::pre_vat(cost),
                cost_final: cost,
                status,
                attachment_path: None,
            },
        )?;

        Ok(customer)
    }
}
