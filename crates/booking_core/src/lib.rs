//! Reservation form controller for the office café booking page.
//!
//! The page itself (fields, date control, submit button, status line) is
//! reached only through the collaborator traits in [`ui`]; the controller
//! owns validation, the submission lifecycle and user feedback.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub mod controller;
pub mod endpoint;
pub mod notifier;
pub mod transport;
pub mod ui;
pub mod validation;

pub use controller::{ReservationController, SubmissionOutcome};
pub use endpoint::{AckMode, ControllerConfig, Endpoint, EndpointError, UNCONFIGURED_ENDPOINT};
pub use notifier::StatusNotifier;
pub use transport::{HttpTransport, ReservationTransport, TransportError};
pub use ui::{Alerter, DateInput, FormBindings, FormFields, StatusRegion, SubmitButton};

/// Source of "today" and "now". Day comparisons use the local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
