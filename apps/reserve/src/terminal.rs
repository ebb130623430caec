//! Terminal-backed form elements: values come from the command line,
//! notices go to stdout and alerts to stderr.

use std::sync::{Arc, Mutex, PoisonError};

use booking_core::{Alerter, DateInput, FormBindings, FormFields, StatusRegion, SubmitButton};
use shared::{
    domain::{BookingWindow, FormValues, NoticeKind},
    error::BindingError,
};
use tracing::debug;

pub struct TerminalForm {
    values: Mutex<FormValues>,
}

impl TerminalForm {
    pub fn new(values: FormValues) -> Arc<Self> {
        Arc::new(Self {
            values: Mutex::new(values),
        })
    }
}

impl FormFields for TerminalForm {
    fn read(&self) -> FormValues {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn reset(&self) {
        *self.values.lock().unwrap_or_else(PoisonError::into_inner) = FormValues::default();
        debug!("form reset");
    }
}

impl DateInput for TerminalForm {
    fn set_bounds(&self, window: BookingWindow) {
        debug!(min = %window.min, max = %window.max, "date input bounded");
    }

    fn clear(&self) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .date
            .clear();
    }
}

impl SubmitButton for TerminalForm {
    fn set_enabled(&self, enabled: bool) {
        debug!(enabled, "submit button");
    }

    fn set_label(&self, label: &str) {
        debug!(label, "submit button label");
    }
}

pub struct StdoutStatus;

impl StatusRegion for StdoutStatus {
    fn render(&self, kind: Option<NoticeKind>, text: &str) {
        match kind {
            Some(kind) => println!("[{}] {text}", kind.as_str()),
            None => debug!("status cleared"),
        }
    }
}

pub struct StderrAlerts;

impl Alerter for StderrAlerts {
    fn alert(&self, text: &str) {
        eprintln!("! {text}");
    }
}

pub fn bind(form: &Arc<TerminalForm>) -> Result<FormBindings, BindingError> {
    FormBindings::builder()
        .fields(form.clone())
        .date_input(form.clone())
        .submit_button(form.clone())
        .status(Arc::new(StdoutStatus))
        .alerts(Arc::new(StderrAlerts))
        .build()
}
