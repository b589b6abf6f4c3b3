//! Calendar-day arithmetic and the fixed-width `YYYY-MM-DD` codec.
//!
//! Dates are `chrono::NaiveDate` values on the proleptic Gregorian calendar.
//! Only the persistence boundary sees strings; everything else compares and
//! adds real dates.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::ChoreError;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`, or `None` for a month outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    let days = *DAYS_IN_MONTH.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(29)
    } else {
        Some(days)
    }
}

/// Validates a (year, month, day) triple and builds the date.
pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, ChoreError> {
    let invalid = || ChoreError::invalid_date(format!("{year:04}-{month:02}-{day:02}"));
    let max_day = days_in_month(year, month).ok_or_else(invalid)?;
    if day == 0 || day > max_day {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parses exactly `YYYY-MM-DD`. Shorter fields, time components or offsets are rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, ChoreError> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, byte)| idx == 4 || idx == 7 || byte.is_ascii_digit());
    if !well_formed {
        return Err(ChoreError::invalid_date(input));
    }

    let field = |range: std::ops::Range<usize>| input[range].parse::<u32>();
    let (Ok(year), Ok(month), Ok(day)) = (field(0..4), field(5..7), field(8..10)) else {
        return Err(ChoreError::invalid_date(input));
    };
    let year = i32::try_from(year).map_err(|_| ChoreError::invalid_date(input))?;
    from_ymd(year, month, day).map_err(|_| ChoreError::invalid_date(input))
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Adds `n` whole days, rolling months and years over.
pub fn add_days(date: NaiveDate, n: u64) -> Result<NaiveDate, ChoreError> {
    date.checked_add_days(Days::new(n))
        .ok_or_else(|| ChoreError::invalid_date(format!("{} + {n} days", format_date(date))))
}

/// Signed day count `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub(crate) fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

/// Serde adapter for optional dates stored as fixed-width strings.
pub(crate) mod optional_date {
    use chrono::NaiveDate;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&super::format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|value| super::parse_date(&value).map_err(D::Error::custom))
            .transpose()
    }
}
