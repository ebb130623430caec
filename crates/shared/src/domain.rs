use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days past today that the date control allows.
pub const DEFAULT_BOOKING_HORIZON_DAYS: u64 = 30;

/// Raw values of the reservation form's named fields, as read at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub message: String,
}

/// One booking attempt. Built fresh from the form on every submit and
/// dropped once the attempt finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub name: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub message: String,
    pub timestamp: String,
}

impl ReservationRequest {
    pub fn from_form(values: FormValues, timestamp: impl Into<String>) -> Self {
        Self {
            name: values.name,
            department: values.department,
            email: values.email,
            phone: values.phone,
            date: values.date,
            time: values.time,
            guests: values.guests,
            message: values.message,
            timestamp: timestamp.into(),
        }
    }
}

/// Selectable range for the date control, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl BookingWindow {
    pub fn with_horizon(today: NaiveDate, horizon_days: u64) -> Self {
        let max = today
            .checked_add_days(Days::new(horizon_days))
            .unwrap_or(NaiveDate::MAX);
        Self { min: today, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Loading,
    Success,
    Error,
}

impl NoticeKind {
    /// State class appended to the status region's base class.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Loading => "loading",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}
