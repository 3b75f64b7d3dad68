//! Calendar-date handling for query parameters.
//!
//! Date parameters are validated at the HTTP boundary before any query
//! executes; inside SQL, truncation uses SQLite's own `date()` function.

pub use chrono::NaiveDate;

/// Format a calendar date the way the fact tables store it (`YYYY-MM-DD`).
pub fn to_sql_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(to_sql_day(day), "2024-01-05");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!("2024-13-01".parse::<NaiveDate>().is_err());
        assert!("not-a-date".parse::<NaiveDate>().is_err());
        assert!("2024-02-30".parse::<NaiveDate>().is_err());
    }
}
