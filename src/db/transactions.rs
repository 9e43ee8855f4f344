//! Transaction repository.
//!
//! Listings are ordered newest `transaction_date` first, ties by descending id.
//! The stored `cost_pre_vat` is returned as written; nothing here derives it.

use crate::db::audit;
use crate::errors::AppResult;
use crate::i18n::Labels;
use crate::models::audit::{AuditAction, tables};
use crate::models::status::{PaymentStatus, StatusFilter};
use crate::models::transaction::{
    NewTransaction, SearchFilter, TransactionDetails, TransactionRow, TransactionSummary,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SELECT_ROWS: &str = "
    SELECT t.id, c.name, s.name, t.notes, t.transaction_date,
           t.cost_pre_vat, t.cost_final, t.status
    FROM transactions t
    JOIN customers c ON t.customer_id = c.id
    LEFT JOIN services s ON t.service_id = s.id";

const ORDER: &str = " ORDER BY t.transaction_date DESC, t.id DESC";

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

fn parse_status(idx: usize, s: &str) -> rusqlite::Result<PaymentStatus> {
    PaymentStatus::from_db_str(s).ok_or_else(|| conversion_error(idx, format!("invalid status: {}", s)))
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, format!("invalid transaction date: {}", s)))
}

fn map_row(row: &Row) -> rusqlite::Result<TransactionRow> {
    let date: String = row.get(4)?;
    let status: String = row.get(7)?;

    Ok(TransactionRow {
        id: row.get(0)?,
        customer: row.get(1)?,
        service: row.get(2)?,
        notes: super::text(row, 3)?,
        date: parse_date(4, &date)?,
        cost_pre_vat: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        cost_final: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
        status: parse_status(7, &status)?,
    })
}

fn collect_rows(conn: &Connection, sql: &str, values: &[Value]) -> AppResult<Vec<TransactionRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Plain insert. Customer and service ids are not checked here.
pub fn add(conn: &Connection, tx: &NewTransaction) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO transactions
            (customer_id, service_id, notes, transaction_date, cost_pre_vat, cost_final,
             status, attachment_path, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now', 'localtime'))",
        params![
            tx.customer_id,
            tx.service_id,
            tx.notes,
            tx.date.format("%Y-%m-%d").to_string(),
            tx.cost_pre_vat,
            tx.cost_final,
            tx.status.to_db_str(),
            tx.attachment_path.as_deref().unwrap_or("")
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_all(conn: &Connection, filter: StatusFilter) -> AppResult<Vec<TransactionRow>> {
    match filter.status() {
        None => collect_rows(conn, &format!("{SELECT_ROWS}{ORDER}"), &[]),
        Some(st) => collect_rows(
            conn,
            &format!("{SELECT_ROWS} WHERE t.status = ?1{ORDER}"),
            &[Value::Text(st.to_db_str().to_string())],
        ),
    }
}

/// Transactions of one customer (exact name).
pub fn list_by_customer(conn: &Connection, customer: &str) -> AppResult<Vec<TransactionRow>> {
    collect_rows(
        conn,
        &format!("{SELECT_ROWS} WHERE c.name = ?1{ORDER}"),
        &[Value::Text(customer.to_string())],
    )
}

pub fn get_row(conn: &Connection, id: i64) -> AppResult<Option<TransactionRow>> {
    let row = conn
        .query_row(
            &format!("{SELECT_ROWS} WHERE t.id = ?1"),
            params![id],
            map_row,
        )
        .optional()?;
    Ok(row)
}

pub fn get_details(conn: &Connection, id: i64) -> AppResult<Option<TransactionDetails>> {
    let details = conn
        .query_row(
            "SELECT id, notes, status FROM transactions WHERE id = ?1",
            params![id],
            |row| {
                let status: String = row.get(2)?;
                Ok(TransactionDetails {
                    id: row.get(0)?,
                    notes: super::text(row, 1)?,
                    status: parse_status(2, &status)?,
                })
            },
        )
        .optional()?;
    Ok(details)
}

/// Stored attachment path, if any.
pub fn get_attachment(conn: &Connection, id: i64) -> AppResult<Option<String>> {
    let path: Option<Option<String>> = conn
        .query_row(
            "SELECT attachment_path FROM transactions WHERE id = ?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(path.flatten().filter(|p| !p.trim().is_empty()))
}

pub fn get_summary(conn: &Connection, id: i64) -> AppResult<Option<TransactionSummary>> {
    let summary = conn
        .query_row(
            "SELECT t.id, COALESCE(c.name, ''), s.name, t.cost_final, t.transaction_date
             FROM transactions t
             LEFT JOIN customers c ON t.customer_id = c.id
             LEFT JOIN services s ON t.service_id = s.id
             WHERE t.id = ?1",
            params![id],
            |row| {
                let date: String = row.get(4)?;
                Ok(TransactionSummary {
                    id: row.get(0)?,
                    customer: row.get(1)?,
                    service: row.get(2)?,
                    amount: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    date: parse_date(4, &date)?,
                })
            },
        )
        .optional()?;
    Ok(summary)
}

fn status_notes(status: PaymentStatus, notes: &str) -> String {
    format!("Status: {}, Notes: {}", status.to_db_str(), notes)
}

/// Change status and notes, auditing the before/after pair.
///
/// Returns `false` (and writes no audit entry) when `id` does not exist.
pub fn update(conn: &Connection, id: i64, status: PaymentStatus, notes: &str) -> AppResult<bool> {
    let Some(prior) = get_details(conn, id)? else {
        return Ok(false);
    };

    conn.execute(
        "UPDATE transactions SET status = ?1, notes = ?2 WHERE id = ?3",
        params![status.to_db_str(), notes, id],
    )?;

    audit::append(
        conn,
        AuditAction::Update,
        tables::TRANSACTIONS,
        id,
        &format!("Transaction #{} updated", id),
        &status_notes(prior.status, &prior.notes),
        &status_notes(status, notes),
    )?;
    Ok(true)
}

/// Delete a transaction, auditing its summary first.
///
/// Returns `false` (and writes no audit entry) when `id` does not exist.
pub fn delete(conn: &Connection, id: i64, labels: &Labels) -> AppResult<bool> {
    let Some(summary) = get_summary(conn, id)? else {
        return Ok(false);
    };

    audit::append(
        conn,
        AuditAction::Delete,
        tables::TRANSACTIONS,
        id,
        &format!("Transaction #{} deleted", id),
        &summary.describe(labels),
        "",
    )?;

    conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
    Ok(true)
}

/// Conjunction of every filter that is set. Bounds are inclusive; the
/// customer filter is a case-sensitive substring of the name.
pub fn advanced_search(conn: &Connection, filter: &SearchFilter) -> AppResult<Vec<TransactionRow>> {
    let mut sql = format!("{SELECT_ROWS} WHERE 1=1");
    let mut values: Vec<Value> = Vec::new();

    if let Some(c) = filter.customer.as_deref().filter(|c| !c.is_empty()) {
        values.push(Value::Text(c.to_string()));
        sql.push_str(&format!(" AND instr(c.name, ?{}) > 0", values.len()));
    }
    if let Some(d) = filter.date_from {
        values.push(Value::Text(d.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND t.transaction_date >= ?{}", values.len()));
    }
    if let Some(d) = filter.date_to {
        values.push(Value::Text(d.format("%Y-%m-%d").to_string()));
        sql.push_str(&format!(" AND t.transaction_date <= ?{}", values.len()));
    }
    if let Some(min) = filter.min_amount {
        values.push(Value::Real(min));
        sql.push_str(&format!(" AND t.cost_final >= ?{}", values.len()));
    }
    if let Some(max) = filter.max_amount {
        values.push(Value::Real(max));
        sql.push_str(&format!(" AND t.cost_final <= ?{}", values.len()));
    }
    if let Some(st) = filter.status.status() {
        values.push(Value::Text(st.to_db_str().to_string()));
        sql.push_str(&format!(" AND t.status = ?{}", values.len()));
    }

    sql.push_str(ORDER);
    collect_rows(conn, &sql, &values)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
}

/// Earliest and latest transaction dates.
pub fn date_range(conn: &Connection) -> AppResult<Option<(String, String)>> {
    let range: (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(transaction_date), MAX(transaction_date) FROM transactions",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    Ok(match range {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    })
}
