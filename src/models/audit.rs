use serde::Serialize;
use std::fmt;

/// Kind of mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
    Import,
}

impl AuditAction {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Import => "IMPORT",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INSERT" => Some(AuditAction::Insert),
            "UPDATE" => Some(AuditAction::Update),
            "DELETE" => Some(AuditAction::Delete),
            "IMPORT" => Some(AuditAction::Import),
            _ => None,
        }
    }

    /// Helper: CLI input (lowercase or uppercase)
    pub fn from_input(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_uppercase())
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Table names written into `audit_log.table_name`.
pub mod tables {
    pub const CUSTOMERS: &str = "customers";
    pub const SERVICES: &str = "services";
    pub const TRANSACTIONS: &str = "transactions";
    pub const COMPANY_SETTINGS: &str = "company_settings";
}

/// One row of `audit_log`.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub action: AuditAction,
    pub table_name: String,
    pub record_id: i64,
    pub description: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: String,
}
