//! Business logic over the repositories.

pub mod add;
pub mod attach;
pub mod backup;
pub mod customer;
pub mod import;
pub mod log;
pub mod receipt;
pub mod vat;
