//! Service catalog.
//!
//! Deleting a service never touches transactions: the foreign key nulls
//! `transactions.service_id`, and readers resolve it to the sentinel label.

use crate::db::audit;
use crate::errors::{AppError, AppResult};
use crate::models::audit::{AuditAction, tables};
use crate::models::service::Service;
use rusqlite::{Connection, OptionalExtension, params};

/// Add a service. An existing name is a silent no-op returning `None`.
pub fn add(conn: &Connection, name: &str) -> AppResult<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingField("service name"));
    }

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO services (name) VALUES (?1)",
        params![name],
    )?;
    if inserted == 0 {
        return Ok(None);
    }

    let id = conn.last_insert_rowid();
    audit::append(
        conn,
        AuditAction::Insert,
        tables::SERVICES,
        id,
        &format!("New service: {}", name),
        "",
        name,
    )?;
    Ok(Some(id))
}

/// All services, ordered by name.
pub fn list(conn: &Connection) -> AppResult<Vec<Service>> {
    let mut stmt = conn.prepare("SELECT id, name FROM services ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(Service {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<Service>> {
    let s = conn
        .query_row(
            "SELECT id, name FROM services WHERE id = ?1",
            params![id],
            |r| {
                Ok(Service {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

/// Exact (case-sensitive) lookup by name.
pub fn find_by_name(conn: &Connection, name: &str) -> AppResult<Option<Service>> {
    let s = conn
        .query_row(
            "SELECT id, name FROM services WHERE name = ?1",
            params![name.trim()],
            |r| {
                Ok(Service {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

/// Delete a service and audit it. Returns `false` when `id` does not exist.
pub fn delete(conn: &Connection, id: i64) -> AppResult<bool> {
    let Some(service) = get(conn, id)? else {
        return Ok(false);
    };

    conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;

    audit::append(
        conn,
        AuditAction::Delete,
        tables::SERVICES,
        id,
        &format!("Service deleted: {}", service.name),
        &service.name,
        "",
    )?;
    Ok(true)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM services", [], |r| r.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{initialize::init_db, pool::DbPool};

    fn db() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn add_is_unique_and_audited_once() {
        let pool = db();
        assert!(add(&pool.conn, "Ε9").unwrap().is_some());
        assert_eq!(add(&pool.conn, "Ε9").unwrap(), None);

        assert_eq!(count(&pool.conn).unwrap(), 1);
        let log = audit::query(&pool.conn, 10, Some(AuditAction::Insert), None).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].table_name, tables::SERVICES);
    }

    #[test]
    fn list_is_sorted_by_name() {
        let pool = db();
        add(&pool.conn, "Μισθοδοσία").unwrap();
        add(&pool.conn, "Ενοίκια").unwrap();
        add(&pool.conn, "Ζ").unwrap();

        let names: Vec<String> = list(&pool.conn).unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Ενοίκια", "Ζ", "Μισθοδοσία"]);
    }

    #[test]
    fn delete_removes_row_and_audits() {
        let pool = db();
        let id = add(&pool.conn, "Ε1").unwrap().unwrap();

        assert!(delete(&pool.conn, id).unwrap());
        assert!(list(&pool.conn).unwrap().is_empty());
        assert!(!delete(&pool.conn, id).unwrap());

        let log = audit::query(&pool.conn, 10, Some(AuditAction::Delete), None).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].old_value, "Ε1");
    }
}
