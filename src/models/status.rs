use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

/// Payment status of a transaction.
///
/// The stored labels are the Greek ones used by existing data files;
/// `Overdue` only survives from the legacy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    /// Statuses accepted for new transactions (direct entry and import).
    pub const ACTIVE: [PaymentStatus; 2] = [PaymentStatus::Pending, PaymentStatus::Paid];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Εκκρεμεί",
            PaymentStatus::Paid => "Πληρώθηκε",
            PaymentStatus::Overdue => "Καθυστέρηση",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Εκκρεμεί" => Some(PaymentStatus::Pending),
            "Πληρώθηκε" => Some(PaymentStatus::Paid),
            "Καθυστέρηση" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }

    /// Parse user input: the stored label or the English word (any case).
    pub fn from_input(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(st) = Self::from_db_str(s) {
            return Some(st);
        }

        match s.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "overdue" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }

    /// Human label for the given locale.
    pub fn display(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::El => self.to_db_str(),
            Locale::En => match self {
                PaymentStatus::Pending => "Pending",
                PaymentStatus::Paid => "Paid",
                PaymentStatus::Overdue => "Overdue",
            },
        }
    }
}

/// Status filter used by transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(PaymentStatus),
}

impl StatusFilter {
    /// `all` / `Όλα` select everything, anything else must be a status.
    pub fn from_input(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("all") || t == "Όλα" {
            return Some(StatusFilter::All);
        }
        PaymentStatus::from_input(t).map(StatusFilter::Only)
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(s) => Some(*s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_and_english_labels() {
        assert_eq!(
            PaymentStatus::from_input("Πληρώθηκε"),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentStatus::from_input(" PENDING "),
            Some(PaymentStatus::Pending)
        );
        assert_eq!(PaymentStatus::from_input("maybe"), None);
    }

    #[test]
    fn overdue_is_legacy_only() {
        assert!(!PaymentStatus::Overdue.is_active());
        assert!(PaymentStatus::Paid.is_active());
    }

    #[test]
    fn filter_sentinels() {
        assert_eq!(StatusFilter::from_input("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::from_input("Όλα"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::from_input("paid"),
            Some(StatusFilter::Only(PaymentStatus::Paid))
        );
    }
}
