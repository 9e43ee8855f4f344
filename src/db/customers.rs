//! Customer repository: creation, lookups, search and full-record edits.
//!
//! Name matching is case-sensitive everywhere (`substr` / `instr`, not `LIKE`).

use crate::db::audit;
use crate::errors::{AppError, AppResult};
use crate::models::audit::{AuditAction, tables};
use crate::models::customer::{Customer, CustomerDetails};
use rusqlite::{Connection, OptionalExtension, params};

pub const PREFIX_LIMIT: usize = 10;
pub const FUZZY_LIMIT: usize = 20;

/// Insert a customer by name.
///
/// A name that already exists is absorbed by storage: no row is written and
/// `None` is returned, so the caller re-fetches with [`get_id_by_name`].
pub fn add_customer(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingField("customer name"));
    }

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO customers (name, created_date)
         VALUES (?1, datetime('now', 'localtime'))",
        params![name],
    )?;

    Ok((inserted > 0).then(|| conn.last_insert_rowid()))
}

pub fn get_id_by_name(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM customers WHERE name = ?1",
            params![name.trim()],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Resolve a customer by name, creating it when unknown. Not audited.
pub fn get_or_create(conn: &Connection, name: &str) -> AppResult<i64> {
    if let Some(id) = add_customer(conn, name)? {
        return Ok(id);
    }
    get_id_by_name(conn, name)?.ok_or_else(|| AppError::CustomerNotFound(name.to_string()))
}

/// Names starting with `prefix`, alphabetical.
pub fn search_by_prefix(conn: &Connection, prefix: &str, limit: usize) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM customers
         WHERE substr(name, 1, length(?1)) = ?1
         ORDER BY name
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![prefix, limit as i64], |r| r.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Customers whose name contains every whitespace-separated token of `term`.
pub fn fuzzy_search(conn: &Connection, term: &str, limit: usize) -> AppResult<Vec<(i64, String)>> {
    let tokens: Vec<&str> = term.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut sql = String::from("SELECT id, name FROM customers WHERE 1=1");
    for i in 1..=tokens.len() {
        sql.push_str(&format!(" AND instr(name, ?{}) > 0", i));
    }
    sql.push_str(&format!(" ORDER BY name LIMIT {}", limit));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(tokens.iter()), |r| {
        Ok((r.get(0)?, r.get(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_details(conn: &Connection, id: i64) -> AppResult<Option<Customer>> {
    let customer = conn
        .query_row(
            "SELECT id, name, email, phone, tax_id, address, work_info,
                    taxis_username, taxis_password, notes, created_date
             FROM customers WHERE id = ?1",
            params![id],
            |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: super::text(row, 2)?,
                    phone: super::text(row, 3)?,
                    tax_id: super::text(row, 4)?,
                    address: super::text(row, 5)?,
                    work_info: super::text(row, 6)?,
                    portal_username: super::text(row, 7)?,
                    portal_secret: super::text(row, 8)?,
                    notes: super::text(row, 9)?,
                    created_date: super::text(row, 10)?,
                })
            },
        )
        .optional()?;
    Ok(customer)
}

/// Overwrite every mutable field (rename included) and audit the change.
///
/// Returns `false` without touching the audit log when `id` does not exist.
/// Renaming onto another customer's name is rejected.
pub fn update_details(conn: &Connection, id: i64, details: &CustomerDetails) -> AppResult<bool> {
    let new_name = details.name.trim();
    if new_name.is_empty() {
        return Err(AppError::MissingField("customer name"));
    }

    let old_name: Option<String> = conn
        .query_row(
            "SELECT name FROM customers WHERE id = ?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    let Some(old_name) = old_name else {
        return Ok(false);
    };

    if let Some(other) = get_id_by_name(conn, new_name)? {
        if other != id {
            return Err(AppError::DuplicateCustomer(new_name.to_string()));
        }
    }

    conn.execute(
        "UPDATE customers
         SET name = ?1, email = ?2, phone = ?3, tax_id = ?4, address = ?5,
             work_info = ?6, taxis_username = ?7, taxis_password = ?8, notes = ?9
         WHERE id = ?10",
        params![
            new_name,
            details.email,
            details.phone,
            details.tax_id,
            details.address,
            details.work_info,
            details.portal_username,
            details.portal_secret,
            details.notes,
            id
        ],
    )?;

    audit::append(
        conn,
        AuditAction::Update,
        tables::CUSTOMERS,
        id,
        &format!("Customer updated: {}", new_name),
        &old_name,
        new_name,
    )?;

    Ok(true)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM customers", [], |r| r.get(0))?)
}
