use crate::core::{attach, vat};
use crate::db::{audit, customers, services, transactions};
use crate::errors::{AppError, AppResult};
use crate::models::audit::{AuditAction, tables};
use crate::models::status::PaymentStatus;
use crate::models::transaction::NewTransaction;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// A transaction as typed by the user.
#[derive(Debug, Clone)]
pub struct DirectEntry {
    pub customer: String,
    pub service: String,
    pub final_cost: f64,
    pub status: PaymentStatus,
    pub notes: String,
    pub date: NaiveDate,
    pub attachment: Option<PathBuf>,
}

/// High-level business logic for `tx add`.
pub struct AddLogic;

impl AddLogic {
    /// Validate, resolve references, derive VAT, store, audit.
    /// Returns the new transaction id.
    pub fn apply(conn: &Connection, entry: &DirectEntry, attachments_dir: &Path) -> AppResult<i64> {
        // ------------------------------------------------
        // 1️⃣ Validation
        // ------------------------------------------------
        let customer = entry.customer.trim();
        if customer.is_empty() {
            return Err(AppError::MissingField("customer name"));
        }
        let service_name = entry.service.trim();
        if service_name.is_empty() {
            return Err(AppError::MissingField("service"));
        }
        let cost = vat::check_cost(entry.final_cost)?;
        if !entry.status.is_active() {
            return Err(AppError::InvalidStatus(entry.status.to_db_str().to_string()));
        }

        // ------------------------------------------------
        // 2️⃣ References
        // ------------------------------------------------
        let service = services::find_by_name(conn, service_name)?
            .ok_or_else(|| AppError::UnknownService(service_name.to_string()))?;
        let customer_id = customers::get_or_create(conn, customer)?;

        // ------------------------------------------------
        // 3️⃣ Attachment
        // ------------------------------------------------
        let stored = match &entry.attachment {
            Some(src) => Some(attach::store_attachment(attachments_dir, src)?),
            None => None,
        };

        // ------------------------------------------------
        // 4️⃣ Insert + audit
        // ------------------------------------------------
        let inserted = transactions::add(
            conn,
            &NewTransaction {
                customer_id,
                service_id: Some(service.id),
                notes: entry.notes.trim().to_string(),
                date: entry.date,
                cost_pre_vat: vat::pre_vat(cost),
                cost_final: cost,
                status: entry.status,
                attachment_path: stored.as_ref().map(|p| p.to_string_lossy().into_owned()),
            },
        );
        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                // no row points at the copy
                if let Some(path) = &stored {
                    fs::remove_file(path).ok();
                }
                return Err(e);
            }
        };

        audit::append(
            conn,
            AuditAction::Insert,
            tables::TRANSACTIONS,
            id,
            &format!(
                "New transaction: {} - {} - {:.2}€",
                customer, service.name, cost
            ),
            "",
            &format!("Status: {}", entry.status.to_db_str()),
        )?;

        Ok(id)
    }
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

    fn entry(customer: &str, service: &str, cost: f64) -> DirectEntry {
        DirectEntry {
            customer: customer.into(),
            service: service.into(),
            final_cost: cost,
            status: PaymentStatus::Pending,
            notes: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            attachment: None,
        }
    }

    #[test]
    fn direct_entry_derives_vat_creates_customer_and_audits() {
        let pool = db();
        services::add(&pool.conn, "Ε1").unwrap();

        let id = AddLogic::apply(&pool.conn, &entry("Νέος Πελάτης", "Ε1", 124.0), Path::new(".")).unwrap();

        let row = transactions::get_row(&pool.conn, id).unwrap().unwrap();
        assert!((row.cost_pre_vat - 100.0).abs() < 1e-9);
        assert_eq!(row.customer, "Νέος Πελάτης");
        assert!(customers::get_id_by_name(&pool.conn, "Νέος Πελάτης").unwrap().is_some());

        let log = audit::query(&pool.conn, 10, None, Some(tables::TRANSACTIONS)).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, AuditAction::Insert);
        assert_eq!(log[0].record_id, id);
        assert!(log[0].description.contains("124.00€"));
    }

    #[test]
    fn unknown_service_and_bad_cost_are_rejected() {
        let pool = db();
        services::add(&pool.conn, "Ε1").unwrap();

        assert!(matches!(
            AddLogic::apply(&pool.conn, &entry("A", "Nope", 10.0), Path::new(".")),
            Err(AppError::UnknownService(_))
        ));
        assert!(matches!(
            AddLogic::apply(&pool.conn, &entry("A", "Ε1", 0.0), Path::new(".")),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(matches!(
            AddLogic::apply(&pool.conn, &entry("", "Ε1", 10.0), Path::new(".")),
            Err(AppError::MissingField(_))
        ));

        let mut overdue = entry("A", "Ε1", 10.0);
        overdue.status = PaymentStatus::Overdue;
        assert!(matches!(
            AddLogic::apply(&pool.conn, &overdue, Path::new(".")),
            Err(AppError::InvalidStatus(_))
        ));

        assert_eq!(transactions::count(&pool.conn).unwrap(), 0);
        assert_eq!(customers::count(&pool.conn).unwrap(), 0);
    }

    #[test]
    fn failed_insert_leaves_no_stored_attachment() {
        let pool = db();
        services::add(&pool.conn, "Ε1").unwrap();

        let dir = std::env::temp_dir().join(format!("officedesk_add_att_{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        let src = dir.join("invoice.pdf");
        fs::write(&src, b"%PDF-1.4").unwrap();
        let store = dir.join("attachments");

        pool.conn.execute_batch("DROP TABLE transactions;").unwrap();

        let mut e = entry("A", "Ε1", 10.0);
        e.attachment = Some(src);
        assert!(matches!(
            AddLogic::apply(&pool.conn, &e, &store),
            Err(AppError::Db(_))
        ));
        assert_eq!(fs::read_dir(&store).unwrap().count(), 0);

        fs::remove_dir_all(&dir).ok();
    }
}
