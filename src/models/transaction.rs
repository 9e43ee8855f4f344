use super::status::{PaymentStatus, StatusFilter};
use crate::i18n::Labels;
use chrono::NaiveDate;
use serde::Serialize;

/// Values written by a transaction insert.
///
/// `cost_pre_vat` is a snapshot derived from `cost_final` by the caller
/// (see `core::vat`); it is stored as-is and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub customer_id: i64,
    pub service_id: Option<i64>,
    pub notes: String,
    pub date: NaiveDate,
    pub cost_pre_vat: f64,
    pub cost_final: f64,
    pub status: PaymentStatus,
    pub attachment_path: Option<String>,
}

/// A transaction joined with its customer and service names.
///
/// `service` is `None` once the referenced service has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub customer: String,
    pub service: Option<String>,
    pub notes: String,
    pub date: NaiveDate,
    pub cost_pre_vat: f64,
    pub cost_final: f64,
    pub status: PaymentStatus,
}

impl TransactionRow {
    /// Service name, or the deleted-service sentinel.
    pub fn service_label<'a>(&'a self, labels: &'a Labels) -> &'a str {
        self.service.as_deref().unwrap_or(labels.deleted_service)
    }
}

/// Editable fields of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub id: i64,
    pub notes: String,
    pub status: PaymentStatus,
}

/// Human-readable summary used by delete auditing and receipts.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    pub id: i64,
    pub customer: String,
    pub service: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
}

impl TransactionSummary {
    pub fn service_label<'a>(&'a self, labels: &'a Labels) -> &'a str {
        self.service.as_deref().unwrap_or(labels.deleted_service)
    }

    pub fn describe(&self, labels: &Labels) -> String {
        format!(
            "Customer: {}, Service: {}, Amount: {:.2}€, Date: {}",
            self.customer,
            self.service_label(labels),
            self.amount,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Composable filters for the advanced search. Every bound is inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub customer: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub status: StatusFilter,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            customer: None,
            date_from: None,
            date_to: None,
            min_amount: None,
            max_amount: None,
            status: StatusFilter::All,
        }
    }
}

/// Paid / outstanding totals of one customer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    pub paid: f64,
    pub outstanding: f64,
}

impl Balance {
    pub fn from_rows(rows: &[TransactionRow]) -> Self {
        rows.iter().fold(Balance::default(), |mut acc, r| {
            if r.status.is_paid() {
                acc.paid += r.cost_final;
            } else {
                acc.outstanding += r.cost_final;
            }
            acc
        })
    }
}
