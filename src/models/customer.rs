use serde::Serialize;

/// Full customer profile (`customers` row).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    pub address: String,
    pub work_info: String,
    pub portal_username: String,
    pub portal_secret: String,
    pub notes: String,
    pub created_date: String,
}

/// Mutable part of a customer, written in full by an edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    pub address: String,
    pub work_info: String,
    pub portal_username: String,
    pub portal_secret: String,
    pub notes: String,
}

impl From<&Customer> for CustomerDetails {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            tax_id: c.tax_id.clone(),
            address: c.address.clone(),
            work_info: c.work_info.clone(),
            portal_username: c.portal_username.clone(),
            portal_secret: c.portal_secret.clone(),
            notes: c.notes.clone(),
        }
    }
}
