// src/export/model.rs

use crate::i18n::Locale;
use crate::models::transaction::TransactionRow;
use crate::utils::date::to_iso;
use serde::Serialize;

/// Flat transaction record for CSV / JSON / XLSX / PDF exports.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TransactionExport {
    pub id: i64,
    pub date: String,
    pub customer: String,
    pub service: String,
    pub notes: String,
    pub cost_pre_vat: f64,
    pub cost_final: f64,
    pub status: String,
}

impl TransactionExport {
    pub fn from_row(r: &TransactionRow, locale: Locale) -> Self {
        let labels = locale.labels();
        Self {
            id: r.id,
            date: to_iso(r.date),
            customer: r.customer.clone(),
            service: r.service_label(labels).to_string(),
            notes: r.notes.clone(),
            cost_pre_vat: r.cost_pre_vat,
            cost_final: r.cost_final,
            status: r.status.display(locale).to_string(),
        }
    }
}

/// Header per CSV / JSON / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "customer",
        "service",
        "notes",
        "cost_pre_vat",
        "cost_final",
        "status",
    ]
}

pub(crate) fn transaction_to_row(t: &TransactionExport) -> Vec<String> {
    vec![
        t.id.to_string(),
        t.date.clone(),
        t.customer.clone(),
        t.service.clone(),
        t.notes.clone(),
        format!("{:.2}", t.cost_pre_vat),
        format!("{:.2}", t.cost_final),
        t.status.clone(),
    ]
}

pub(crate) fn transactions_to_table(items: &[TransactionExport]) -> Vec<Vec<String>> {
    items.iter().map(transaction_to_row).collect()
}
