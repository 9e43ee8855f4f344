pub mod backup;
pub mod config;
pub mod customer;
pub mod db;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod receipt;
pub mod service;
pub mod settings;
pub mod template;
pub mod tx;

use crate::errors::{AppError, AppResult};
use crate::models::status::{PaymentStatus, StatusFilter};

pub(crate) fn parse_status(s: &str) -> AppResult<PaymentStatus> {
    PaymentStatus::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

pub(crate) fn parse_status_filter(s: &str) -> AppResult<StatusFilter> {
    StatusFilter::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}
