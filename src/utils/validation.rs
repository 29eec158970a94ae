use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{validate_email, validate_length, ValidationError};

// ASCII classes only: `\d` in the regex crate also matches non-ASCII digits.
static EMPLOYEE_ID_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}[A-Z]{2}[0-9]{3,6}$").expect("valid employee id regex"));
static PHONE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

pub const EMPLOYEE_ID_MIN_LEN: u64 = 7;
pub const EMPLOYEE_ID_MAX_LEN: u64 = 10;

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Length half of the employee id rule. Reports the bound that was missed.
pub fn validate_employee_id_length(value: &str) -> Result<(), ValidationError> {
    if !validate_length(value, Some(EMPLOYEE_ID_MIN_LEN), None, None) {
        return Err(rejected("length", "Minimum 7 characters"));
    }
    if !validate_length(value, None, Some(EMPLOYEE_ID_MAX_LEN), None) {
        return Err(rejected("length", "Maximum 10 characters"));
    }
    Ok(())
}

/// Pattern half of the employee id rule: 2-digit year, 2-letter department
/// code, 3 to 6 digit sequence number.
pub fn validate_employee_id_format(value: &str) -> Result<(), ValidationError> {
    if !EMPLOYEE_ID_FORMAT.is_match(value) {
        return Err(rejected("regex", "EmployeeId Format: YYDEPTSNO, e.g., 22CS001"));
    }
    Ok(())
}

pub fn validate_employee_email(value: &str) -> Result<(), ValidationError> {
    if !validate_email(value) {
        return Err(rejected("email", "Invalid Email ID"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_FORMAT.is_match(value) {
        return Err(rejected("regex", "Phone number must be 10 digits"));
    }
    Ok(())
}

/// Fails on the empty string only; surrounding whitespace is kept as given.
pub fn validate_required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if !validate_length(value, Some(1), None, None) {
        return Err(rejected("length", message));
    }
    Ok(())
}

/// Parses a joining date and checks it is not after `now`.
///
/// Accepts either a calendar date (`2022-01-10`, taken as midnight UTC) or a
/// full RFC 3339 timestamp. A value equal to `now` is accepted.
pub fn validate_date_of_joining(
    value: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    let parsed = parse_date(value).ok_or_else(|| rejected("date", "Invalid date"))?;
    if parsed > now {
        return Err(rejected("date", "Date of Joining cannot be a future date"));
    }
    Ok(parsed)
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}
