//! Date-to-string fallback for calendar dates that end up inside JSON output.

use chrono::NaiveDate;
use serde::Serializer;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn to_datetime_string(date: &NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.format(DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| date.to_string())
}

pub fn serialize_dates<S>(dates: &[NaiveDate], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(dates.iter().map(to_datetime_string))
}
