use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{domain::ReservationRequest, error::ValidationError};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses the date control's `YYYY-MM-DD` value.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Checks a request against the booking rules, stopping at the first
/// violation. Returns the parsed reservation date on success.
///
/// Order: email shape, date parse, not before `today`, not a weekend.
/// The upper bound of the booking window is left to the date control.
pub fn validate(
    request: &ReservationRequest,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }

    let date = parse_date(&request.date)?;
    if date < today {
        return Err(ValidationError::PastDate);
    }
    if is_weekend(date) {
        return Err(ValidationError::WeekendDate);
    }

    Ok(date)
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
