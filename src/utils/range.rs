//! `--range` parsing for listings and exports.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

fn bad(r: &str) -> AppError {
    AppError::InvalidDate(format!("unsupported range '{}'", r))
}

/// First and last day covered by a single period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| bad(p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad(p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad(p))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p[0..4].parse().map_err(|_| bad(p))?;
            let m: u32 = p[5..7].parse().map_err(|_| bad(p))?;
            let last = month_last_day(y, m).ok_or_else(|| bad(p))?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| bad(p))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| bad(p))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = crate::utils::date::parse_date(p)?;
            Ok((d, d))
        }
        _ => Err(bad(p)),
    }
}

/// Parse --range (inclusive bounds).
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above as `start:end`, both sides with the same shape
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    if !r.is_ascii() {
        return Err(bad(r));
    }

    match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidDate(
                    "start and end must have same format".into(),
                ));
            }
            let (d1, _) = period_bounds(start)?;
            let (_, d2) = period_bounds(end)?;
            Ok((d1, d2))
        }
        None => period_bounds(r),
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2023-02").unwrap(), (d(2023, 2, 1), d(2023, 2, 28)));
        assert_eq!(parse_range("2024-06-15").unwrap(), (d(2024, 6, 15), d(2024, 6, 15)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2023:2024").unwrap(),
            (d(2023, 1, 1), d(2024, 12, 31))
        );
        assert_eq!(
            parse_range("2024-01:2024-03").unwrap(),
            (d(2024, 1, 1), d(2024, 3, 31))
        );
        assert_eq!(
            parse_range("2024-01-10:2024-01-20").unwrap(),
            (d(2024, 1, 10), d(2024, 1, 20))
        );
    }

    #[test]
    fn rejects_mixed_or_malformed() {
        assert!(parse_range("2024:2024-01").is_err());
        assert!(parse_range("2024-13").is_err());
        assert!(parse_range("24").is_err());
        assert!(parse_range("αβγδ").is_err());
    }
}
