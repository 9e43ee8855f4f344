// src/export/excel_date.rs

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Day zero of the Excel 1900 date system (with the Lotus leap-year bug folded in).
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Prova a interpretare una stringa come data o data/ora,
/// restituendo il *seriale Excel* + formattazione numerica.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive_datetime_to_excel_serial(&dt).map(|v| ("yyyy-mm-dd hh:mm", v));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date_to_excel_serial(d).map(|v| ("yyyy-mm-dd", v));
    }

    None
}

pub(crate) fn date_to_excel_serial(d: NaiveDate) -> Option<f64> {
    naive_datetime_to_excel_serial(&d.and_hms_opt(0, 0, 0)?)
}

/// Whole days since the epoch; a time-of-day fraction is dropped.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    excel_epoch()?.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let epoch = excel_epoch()?.and_hms_opt(0, 0, 0)?;
    let duration = *dt - epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}
