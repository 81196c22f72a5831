//! Civil date helpers
//!
//! All scheduling works on `NaiveDate` values. Dates are formatted as
//! "YYYY-MM-DD" and months as "YYYY-MM" for storage and display.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current time as a Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a "YYYY-MM-DD" date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Format a date as "YYYY-MM-DD"
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Month key for a date.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use lifequest::engine::calendar::month_key;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(month_key(date), "2024-03");
/// ```
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Local date of a millisecond timestamp
pub fn local_date_of(timestamp_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .unwrap_or_else(today)
}
