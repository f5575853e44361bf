//! Calendar date parsing for reservation dates.
//!
//! Backends emit `YYYY-MM-DD` or a full timestamp (`YYYY-MM-DDT...`).
//! Only the date part is significant.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_part = value.split_once('T').map_or(value, |(date, _)| date);
    NaiveDate::parse_from_str(date_part.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        assert_eq!(
            parse_date("2026-10-16").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
    }

    #[test]
    fn test_timestamp_is_truncated_to_date() {
        assert_eq!(
            parse_date("2026-10-16T23:59:59Z").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert_eq!(
            parse_date("2026-10-16T00:00:00+03:00").unwrap(),
            parse_date("2026-10-16").unwrap()
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_date("").is_err());
        assert!(parse_date("16.10.2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("T2026-10-16").is_err());
    }
}
