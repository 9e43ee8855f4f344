//! Append-only audit trail (`audit_log`).

use crate::errors::AppResult;
use crate::models::audit::{AuditAction, AuditEntry};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params, params_from_iter};

pub const DEFAULT_LIMIT: usize = 100;

/// Append one entry. The timestamp is assigned by SQLite.
pub fn append(
    conn: &Connection,
    action: AuditAction,
    table_name: &str,
    record_id: i64,
    description: &str,
    old_value: &str,
    new_value: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO audit_log (action_type, table_name, record_id, description, old_value, new_value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            action.to_db_str(),
            table_name,
            record_id,
            description,
            old_value,
            new_value
        ],
    )?;
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<AuditEntry> {
    let action_str: String = row.get(1)?;
    let action = AuditAction::from_db_str(&action_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("invalid audit action: {}", action_str).into(),
        )
    })?;

    Ok(AuditEntry {
        id: row.get(0)?,
        action,
        table_name: row.get(2)?,
        record_id: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        description: super::text(row, 4)?,
        old_value: super::text(row, 5)?,
        new_value: super::text(row, 6)?,
        timestamp: row.get(7)?,
    })
}

/// Newest entries first, optionally filtered by action kind and table.
pub fn query(
    conn: &Connection,
    limit: usize,
    action: Option<AuditAction>,
    table_name: Option<&str>,
) -> AppResult<Vec<AuditEntry>> {
    let mut sql = String::from(
        "SELECT id, action_type, table_name, record_id, description, old_value, new_value, timestamp
         FROM audit_log WHERE 1=1",
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(a) = action {
        values.push(Value::Text(a.to_db_str().to_string()));
        sql.push_str(&format!(" AND action_type = ?{}", values.len()));
    }
    if let Some(t) = table_name {
        values.push(Value::Text(t.to_string()));
        sql.push_str(&format!(" AND table_name = ?{}", values.len()));
    }

    values.push(Value::Integer(limit as i64));
    sql.push_str(&format!(
        " ORDER BY timestamp DESC, id DESC LIMIT ?{}",
        values.len()
    ));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM audit_log", [], |r| r.get(0))?)
}
