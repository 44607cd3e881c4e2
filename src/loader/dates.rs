//! Pay-period date normalisation.

use chrono::{NaiveDate, NaiveDateTime};

/// Parses a date cell with the first matching format.
///
/// Formats carrying a time part are accepted; the time is dropped.
///
/// # Examples
///
/// ```
/// use payroll_audit::loader::parse_date;
/// use chrono::NaiveDate;
///
/// let formats = vec!["%Y-%m-%d".to_string(), "%m/%d/%Y".to_string()];
/// assert_eq!(
///     parse_date("01/31/2025", &formats),
///     NaiveDate::from_ymd_opt(2025, 1, 31)
/// );
/// assert_eq!(parse_date("not a date", &formats), None);
/// ```
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    formats.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMATS;

    fn defaults() -> Vec<String> {
        DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date("2025-01-31", &defaults()), date(2025, 1, 31));
    }

    #[test]
    fn test_us_date() {
        assert_eq!(parse_date("1/31/2025", &defaults()), date(2025, 1, 31));
    }

    #[test]
    fn test_month_name_date() {
        assert_eq!(parse_date("31-Jan-2025", &defaults()), date(2025, 1, 31));
    }

    #[test]
    fn test_datetime_drops_time() {
        assert_eq!(
            parse_date("2025-01-31 17:30:00", &defaults()),
            date(2025, 1, 31)
        );
        assert_eq!(
            parse_date("2025-01-31T00:00:00", &defaults()),
            date(2025, 1, 31)
        );
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        assert_eq!(parse_date("2025-02-30", &defaults()), None);
        assert_eq!(parse_date("13/45/2025", &defaults()), None);
    }

    #[test]
    fn test_only_configured_formats_are_tried() {
        let formats = vec!["%d.%m.%Y".to_string()];
        assert_eq!(parse_date("31.01.2025", &formats), date(2025, 1, 31));
        assert_eq!(parse_date("2025-01-31", &formats), None);
    }
}
