use crate::config::Config;
use crate::db::{settings, transactions};
use crate::errors::{AppError, AppResult};
use crate::export::receipt::{ReceiptData, ReceiptKind, save_receipt};
use crate::export::{FontSet, ensure_writable};
use crate::models::company::CompanySettings;
use crate::ui::messages::info;
use crate::utils::date::to_display;
use crate::utils::path::expand_tilde;
use chrono::Local;
use rusqlite::Connection;
use std::path::PathBuf;

/// Company fields given on the command line; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CompanyOverrides {
    pub company_name: Option<String>,
    pub logo_path: Option<String>,
    pub signature_path: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl CompanyOverrides {
    pub fn is_empty(&self) -> bool {
        [
            &self.company_name,
            &self.logo_path,
            &self.signature_path,
            &self.address,
            &self.phone,
            &self.email,
            &self.tax_id,
        ]
        .iter()
        .all(|v| v.is_none())
    }

    pub fn merge_into(&self, mut base: CompanySettings) -> CompanySettings {
        let pairs = [
            (&self.company_name, &mut base.company_name),
            (&self.logo_path, &mut base.logo_path),
            (&self.signature_path, &mut base.signature_path),
            (&self.address, &mut base.address),
            (&self.phone, &mut base.phone),
            (&self.email, &mut base.email),
            (&self.tax_id, &mut base.tax_id),
        ];
        for (over, field) in pairs {
            if let Some(v) = over {
                *field = v.trim().to_string();
            }
        }
        base
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptRequest {
    pub tx_id: i64,
    pub kind: ReceiptKind,
    /// Replaces the transaction notes when given.
    pub notes: Option<String>,
    pub file: Option<String>,
    pub company: CompanyOverrides,
    pub save_settings: bool,
    pub force: bool,
}

pub struct ReceiptLogic;

impl ReceiptLogic {
    /// Receipt contents for one transaction.
    pub fn build_data(
        conn: &Connection,
        tx_id: i64,
        kind: ReceiptKind,
        notes: Option<&str>,
        cfg: &Config,
    ) -> AppResult<ReceiptData> {
        let row = transactions::get_row(conn, tx_id)?.ok_or(AppError::TransactionNotFound(tx_id))?;
        let labels = cfg.locale.labels();

        Ok(ReceiptData {
            number: format!("#{}", row.id),
            customer: row.customer.clone(),
            amount: row.cost_final,
            description: row.service_label(labels).to_string(),
            date: to_display(row.date),
            notes: notes.map(str::to_string).unwrap_or_else(|| row.notes.clone()),
            kind,
        })
    }

    /// Merge company settings, optionally persist them, render the PDF.
    /// Returns the written path.
    pub fn generate(conn: &Connection, cfg: &Config, req: &ReceiptRequest) -> AppResult<PathBuf> {
        // 1️⃣ company identity
        let stored = settings::get(conn)?.unwrap_or_default();
        let company = req.company.merge_into(stored);

        if company.company_name.trim().is_empty() {
            return Err(AppError::MissingField("company name"));
        }

        // 2️⃣ receipt data (fails before anything is saved)
        let data = Self::build_data(conn, req.tx_id, req.kind, req.notes.as_deref(), cfg)?;

        if req.save_settings {
            settings::upsert(conn, &company)?;
            info("Company settings saved.");
        }

        // 3️⃣ output path
        let path = match &req.file {
            Some(f) => expand_tilde(f),
            None => PathBuf::from(default_file_name(req.tx_id)),
        };
        ensure_writable(&path, req.force)?;

        // 4️⃣ render
        let fonts = FontSet::resolve(
            cfg.receipt_font.as_deref().map(expand_tilde).as_deref(),
            cfg.receipt_font_bold.as_deref().map(expand_tilde).as_deref(),
        );
        save_receipt(&path, &data, &company, cfg.locale.labels(), fonts)?;

        Ok(path)
    }
}

/// `receipt_<id>_<YYYYmmdd_HHMMSS>.pdf`
pub fn default_file_name(tx_id: i64) -> String {
    format!(
        "receipt_{}_{}.pdf",
        tx_id,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}
