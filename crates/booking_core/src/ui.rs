//! Collaborators the controller drives: the form's fields, the date
//! control, the submit button, the status line, and blocking alerts.

use std::sync::Arc;

use shared::{
    domain::{BookingWindow, FormValues, NoticeKind},
    error::BindingError,
};

pub const SUBMIT_LABEL_IDLE: &str = "Request reservation";
pub const SUBMIT_LABEL_BUSY: &str = "Processing reservation...";

pub trait FormFields: Send + Sync {
    fn read(&self) -> FormValues;
    fn reset(&self);
}

pub trait DateInput: Send + Sync {
    fn set_bounds(&self, window: BookingWindow);
    fn clear(&self);
}

pub trait SubmitButton: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: &str);
}

pub trait StatusRegion: Send + Sync {
    /// `None` means the region is emptied and loses its state class.
    fn render(&self, kind: Option<NoticeKind>, text: &str);
}

pub trait Alerter: Send + Sync {
    fn alert(&self, text: &str);
}

/// Handles to every element the controller touches, resolved once.
#[derive(Clone)]
pub struct FormBindings {
    pub fields: Arc<dyn FormFields>,
    pub date_input: Arc<dyn DateInput>,
    pub submit_button: Arc<dyn SubmitButton>,
    pub status: Arc<dyn StatusRegion>,
    pub alerts: Arc<dyn Alerter>,
}

impl FormBindings {
    pub fn builder() -> FormBindingsBuilder {
        FormBindingsBuilder::default()
    }
}

#[derive(Default)]
pub struct FormBindingsBuilder {
    fields: Option<Arc<dyn FormFields>>,
    date_input: Option<Arc<dyn DateInput>>,
    submit_button: Option<Arc<dyn SubmitButton>>,
    status: Option<Arc<dyn StatusRegion>>,
    alerts: Option<Arc<dyn Alerter>>,
}

impl FormBindingsBuilder {
    pub fn fields(mut self, fields: Arc<dyn FormFields>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn date_input(mut self, date_input: Arc<dyn DateInput>) -> Self {
        self.date_input = Some(date_input);
        self
    }

    pub fn submit_button(mut self, submit_button: Arc<dyn SubmitButton>) -> Self {
        self.submit_button = Some(submit_button);
        self
    }

    pub fn status(mut self, status: Arc<dyn StatusRegion>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn alerts(mut self, alerts: Arc<dyn Alerter>) -> Self {
        self.alerts = Some(alerts);
        self
    }

    pub fn build(self) -> Result<FormBindings, BindingError> {
        Ok(FormBindings {
            fields: self.fields.ok_or(BindingError::MissingElement("form fields"))?,
            date_input: self
                .date_input
                .ok_or(BindingError::MissingElement("date input"))?,
            submit_button: self
                .submit_button
                .ok_or(BindingError::MissingElement("submit button"))?,
            status: self
                .status
                .ok_or(BindingError::MissingElement("status message"))?,
            alerts: self.alerts.ok_or(BindingError::MissingElement("alerts"))?,
        })
    }
}
