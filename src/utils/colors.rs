//! ANSI color helper utilities for terminal output.
use crate::models::status::PaymentStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Paid → green, pending → yellow, overdue → red.
pub fn color_for_status(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => GREEN,
        PaymentStatus::Pending => YELLOW,
        PaymentStatus::Overdue => RED,
    }
}

/// Grey placeholder for empty values.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
