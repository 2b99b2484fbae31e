//! Field-level validators for form input.
//!
//! Everything here is a pure function of its arguments: the current time is
//! always passed in, never read from the system clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Days per month in a common year
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Reason a date string was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFormat {
    #[error("date must be written as YYYY-MM-DD")]
    Pattern,
    #[error("month {0} is outside 1-12")]
    Month(u32),
    #[error("day {day} is outside 1-{max} for that month")]
    Day { day: u32, max: u32 },
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, or `None` when `month` is not 1-12
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    if month == 2 && is_leap_year(year) {
        return Some(29);
    }
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    DAYS_IN_MONTH.get(index).copied()
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, InvalidFormat> {
    if !DATE_PATTERN.is_match(input) {
        return Err(InvalidFormat::Pattern);
    }

    // The pattern guarantees three all-digit parts
    let year: i32 = input[0..4].parse().map_err(|_| InvalidFormat::Pattern)?;
    let month: u32 = input[5..7].parse().map_err(|_| InvalidFormat::Pattern)?;
    let day: u32 = input[8..10].parse().map_err(|_| InvalidFormat::Pattern)?;

    let max = days_in_month(month, year).ok_or(InvalidFormat::Month(month))?;
    if day < 1 || day > max {
        return Err(InvalidFormat::Day { day, max });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(InvalidFormat::Pattern)
}

/// True when the date, taken at midnight, lies strictly after `now`.
///
/// Unparsable input is never "future"; format is checked separately.
pub fn is_future_date(input: &str, now: NaiveDateTime) -> bool {
    match parse_calendar_date(input) {
        Ok(date) => date.and_hms_opt(0, 0, 0).map_or(false, |midnight| midnight > now),
        Err(_) => false,
    }
}

/// Whole years between `dob` and `today`
pub fn compute_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_pending = (today.month(), today.day()) < (dob.month(), dob.day());
    today.year() - dob.year() - i32::from(birthday_pending)
}

pub fn is_ten_digit_phone(input: &str) -> bool {
    input.len() == 10 && input.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}
