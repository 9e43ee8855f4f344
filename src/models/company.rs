use serde::Serialize;

/// Singleton company identity used on receipts (`company_settings`, id = 1).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanySettings {
    pub company_name: String,
    pub logo_path: String,
    pub signature_path: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub tax_id: String,
    pub updated_at: String,
}
