//! Submission lifecycle for the reservation form.

use std::sync::Arc;

use chrono::SecondsFormat;
use shared::{
    domain::{BookingWindow, NoticeKind, ReservationRequest, SubmissionState},
    error::{SubmitError, ValidationError},
    protocol::DeliveryReceipt,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    endpoint::ControllerConfig,
    notifier::StatusNotifier,
    transport::ReservationTransport,
    ui::{FormBindings, SubmitButton, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE},
    validation, Clock,
};

pub const WEEKEND_CLOSED_ALERT: &str = "The café is closed on weekends. Please pick a weekday.";
pub const LOADING_NOTICE: &str = "Processing your reservation...";
pub const SUCCESS_NOTICE: &str = "Reservation complete! Please check your confirmation email.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Invalid(ValidationError),
    Succeeded(DeliveryReceipt),
    Failed(SubmitError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

pub struct ReservationController {
    bindings: FormBindings,
    config: ControllerConfig,
    transport: Arc<dyn ReservationTransport>,
    clock: Arc<dyn Clock>,
    notifier: StatusNotifier,
    state: watch::Sender<SubmissionState>,
}

impl ReservationController {
    pub fn new(
        bindings: FormBindings,
        config: ControllerConfig,
        transport: Arc<dyn ReservationTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notifier = StatusNotifier::new(Arc::clone(&bindings.status), config.success_clear_after);
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            bindings,
            config,
            transport,
            clock,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn booking_window(&self) -> BookingWindow {
        BookingWindow::with_horizon(self.clock.today(), self.config.booking_horizon_days)
    }

    /// Restricts the date control to today through the booking horizon.
    pub fn initialize(&self) -> BookingWindow {
        let window = self.booking_window();
        self.bindings.date_input.set_bounds(window);
        debug!(min = %window.min, max = %window.max, "date bounds applied");
        window
    }

    /// Date control change handler. Weekend picks are cleared on the spot;
    /// returns whether the value was kept.
    pub fn on_date_changed(&self, value: &str) -> bool {
        let Ok(date) = validation::parse_date(value) else {
            return true;
        };
        if !validation::is_weekend(date) {
            return true;
        }

        debug!(%date, "weekend date rejected");
        self.bindings.date_input.clear();
        self.bindings.alerts.alert(WEEKEND_CLOSED_ALERT);
        false
    }

    /// Snapshot of the form as a request, stamped with the current instant.
    pub fn collect(&self) -> ReservationRequest {
        let timestamp = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        ReservationRequest::from_form(self.bindings.fields.read(), timestamp)
    }

    /// Collects the form without sending anything.
    pub fn preview(&self) -> ReservationRequest {
        let request = self.collect();
        info!(?request, "reservation preview");
        request
    }

    pub fn validate(&self, request: &ReservationRequest) -> bool {
        self.check(request).is_ok()
    }

    pub fn notify(&self, kind: NoticeKind, text: &str) {
        self.notifier.notify(kind, text);
    }

    /// Sends a validated request. The submit button is disabled for the
    /// duration and re-enabled on every path out of this call.
    pub async fn submit(
        &mut self,
        request: &ReservationRequest,
    ) -> Result<DeliveryReceipt, SubmitError> {
        self.transition(SubmissionState::Submitting);
        let result = {
            let _busy = BusyButton::engage(self.bindings.submit_button.as_ref());
            self.notifier.notify(NoticeKind::Loading, LOADING_NOTICE);
            self.deliver(request).await
        };

        match &result {
            Ok(receipt) => {
                info!(?receipt, date = %request.date, "reservation delivered");
                self.transition(SubmissionState::Succeeded);
            }
            Err(err) => {
                warn!(error = %err, "reservation submission failed");
                self.transition(SubmissionState::Failed);
            }
        }
        self.transition(SubmissionState::Idle);
        result
    }

    /// Form submit handler: collect, validate, send, report.
    pub async fn handle_submit(&mut self) -> SubmissionOutcome {
        let request = self.collect();

        self.transition(SubmissionState::Validating);
        if let Err(err) = self.check(&request) {
            self.transition(SubmissionState::Idle);
            return SubmissionOutcome::Invalid(err);
        }

        match self.submit(&request).await {
            Ok(receipt) => {
                self.notifier.notify(NoticeKind::Success, SUCCESS_NOTICE);
                self.bindings.fields.reset();
                SubmissionOutcome::Succeeded(receipt)
            }
            Err(err) => {
                self.notifier.notify(NoticeKind::Error, &err.user_message());
                SubmissionOutcome::Failed(err)
            }
        }
    }

    async fn deliver(&self, request: &ReservationRequest) -> Result<DeliveryReceipt, SubmitError> {
        let Some(url) = self.config.endpoint.url() else {
            return Err(SubmitError::Unconfigured);
        };

        match self
            .transport
            .deliver(url, request, self.config.ack_mode)
            .await
        {
            Ok(DeliveryReceipt::Rejected(message)) => Err(SubmitError::Rejected(message)),
            Ok(receipt) => Ok(receipt),
            // Alternate format carries the source chain.
            Err(err) => Err(SubmitError::Transport(format!(
                "{:#}",
                anyhow::Error::from(err)
            ))),
        }
    }

    fn check(&self, request: &ReservationRequest) -> Result<(), ValidationError> {
        match validation::validate(request, self.clock.today()) {
            Ok(_) => Ok(()),
            Err(err) => {
                debug!(error = %err, "reservation form rejected");
                self.bindings.alerts.alert(err.user_message());
                Err(err)
            }
        }
    }

    fn transition(&self, next: SubmissionState) {
        let previous = self.state.send_replace(next);
        debug!(?previous, ?next, "submission state");
    }
}

/// Holds the submit button in its busy state until dropped.
struct BusyButton<'a> {
    button: &'a dyn SubmitButton,
}

impl<'a> BusyButton<'a> {
    fn engage(button: &'a dyn SubmitButton) -> Self {
        button.set_enabled(false);
        button.set_label(SUBMIT_LABEL_BUSY);
        Self { button }
    }
}

impl Drop for BusyButton<'_> {
    fn drop(&mut self) {
        self.button.set_enabled(true);
        self.button.set_label(SUBMIT_LABEL_IDLE);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
