//! Company settings singleton (`company_settings`, id = 1).

use crate::db::audit;
use crate::errors::AppResult;
use crate::models::audit::{AuditAction, tables};
use crate::models::company::CompanySettings;
use rusqlite::{Connection, OptionalExtension, params};

pub fn get(conn: &Connection) -> AppResult<Option<CompanySettings>> {
    let settings = conn
        .query_row(
            "SELECT company_name, logo_path, signature_path, address, phone, email, tax_id, updated_at
             FROM company_settings WHERE id = 1",
            [],
            |row| {
                Ok(CompanySettings {
                    company_name: super::text(row, 0)?,
                    logo_path: super::text(row, 1)?,
                    signature_path: super::text(row, 2)?,
                    address: super::text(row, 3)?,
                    phone: super::text(row, 4)?,
                    email: super::text(row, 5)?,
                    tax_id: super::text(row, 6)?,
                    updated_at: super::text(row, 7)?,
                })
            },
        )
        .optional()?;
    Ok(settings)
}

/// Insert the singleton row or update it in place; always audited.
/// `updated_at` on the argument is ignored and refreshed by SQLite.
pub fn upsert(conn: &Connection, s: &CompanySettings) -> AppResult<()> {
    let old_name = get(conn)?.map(|o| o.company_name).unwrap_or_default();

    conn.execute(
        "INSERT INTO company_settings
            (id, company_name, logo_path, signature_path, address, phone, email, tax_id, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now', 'localtime'))
         ON CONFLICT(id) DO UPDATE SET
            company_name = excluded.company_name,
            logo_path = excluded.logo_path,
            signature_path = excluded.signature_path,
            address = excluded.address,
            phone = excluded.phone,
            email = excluded.email,
            tax_id = excluded.tax_id,
            updated_at = excluded.updated_at",
        params![
            s.company_name,
            s.logo_path,
            s.signature_path,
            s.address,
            s.phone,
            s.email,
            s.tax_id
        ],
    )?;

    audit::append(
        conn,
        AuditAction::Update,
        tables::COMPANY_SETTINGS,
        1,
        "Company settings updated",
        &old_name,
        &s.company_name,
    )?;
    Ok(())
}
