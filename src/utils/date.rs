use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD` (zero-padded, nothing else).
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let t = s.trim();
    let b = t.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());

    if !shaped {
        return Err(AppError::InvalidDate(t.to_string()));
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(t.to_string()))
}

/// Storage form, sortable as text.
pub fn to_iso(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Display form used on receipts.
pub fn to_display(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_is_strict() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(" 2024-01-05 ").is_ok());

        for bad in ["2024-1-5", "05/01/2024", "2023-02-29", "2024-13-01", "", "20240105"] {
            assert!(
                matches!(parse_date(bad), Err(AppError::InvalidDate(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn display_form_is_day_first() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(to_display(d), "07/03/2024");
        assert_eq!(to_iso(d), "2024-03-07");
    }
}
