//! In-memory stand-ins for the page elements and the clock, plus a local
//! booking endpoint.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shared::{
    domain::{BookingWindow, FormValues, NoticeKind, ReservationRequest, SubmissionState},
    protocol::DeliveryReceipt,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::watch};
use url::Url;

use crate::{
    endpoint::AckMode,
    transport::{ReservationTransport, TransportError},
    ui::{Alerter, DateInput, FormBindings, FormFields, StatusRegion, SubmitButton},
    Clock,
};

pub struct FixedClock {
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

impl FixedClock {
    /// Thursday 2026-10-15, 09:30 UTC.
    pub fn thursday() -> Self {
        Self {
            today: ymd(2026, 10, 15),
            now: Utc
                .with_ymd_and_hms(2026, 10, 15, 9, 30, 0)
                .single()
                .expect("valid instant"),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Fields, date control and submit button of one fake form.
#[derive(Default)]
pub struct FakeForm {
    pub values: Mutex<FormValues>,
    pub bounds: Mutex<Option<BookingWindow>>,
    pub enabled: Mutex<Vec<bool>>,
    pub labels: Mutex<Vec<String>>,
    pub resets: Mutex<u32>,
}

impl FakeForm {
    pub fn with_values(values: FormValues) -> Arc<Self> {
        let form = Self::default();
        *form.values.lock().expect("values") = values;
        Arc::new(form)
    }

    pub fn values(&self) -> FormValues {
        self.values.lock().expect("values").clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.lock().expect("enabled").last().copied().unwrap_or(true)
    }

    pub fn last_label(&self) -> Option<String> {
        self.labels.lock().expect("labels").last().cloned()
    }
}

impl FormFields for FakeForm {
    fn read(&self) -> FormValues {
        self.values()
    }

    fn reset(&self) {
        *self.values.lock().expect("values") = FormValues::default();
        *self.resets.lock().expect("resets") += 1;
    }
}

impl DateInput for FakeForm {
    fn set_bounds(&self, window: BookingWindow) {
        *self.bounds.lock().expect("bounds") = Some(window);
    }

    fn clear(&self) {
        self.values.lock().expect("values").date.clear();
    }
}

impl SubmitButton for FakeForm {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.lock().expect("enabled").push(enabled);
    }

    fn set_label(&self, label: &str) {
        self.labels.lock().expect("labels").push(label.to_string());
    }
}

#[derive(Default)]
pub struct RecordingStatus {
    pub current: Mutex<Option<(NoticeKind, String)>>,
    pub history: Mutex<Vec<Option<(NoticeKind, String)>>>,
}

impl RecordingStatus {
    pub fn current(&self) -> Option<(NoticeKind, String)> {
        self.current.lock().expect("current").clone()
    }

    pub fn kinds(&self) -> Vec<Option<NoticeKind>> {
        self.history
            .lock()
            .expect("history")
            .iter()
            .map(|entry| entry.as_ref().map(|(kind, _)| *kind))
            .collect()
    }
}

impl StatusRegion for RecordingStatus {
    fn render(&self, kind: Option<NoticeKind>, text: &str) {
        let entry = kind.map(|kind| (kind, text.to_string()));
        *self.current.lock().expect("current") = entry.clone();
        self.history.lock().expect("history").push(entry);
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub shown: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().expect("alerts").clone()
    }
}

impl Alerter for RecordingAlerts {
    fn alert(&self, text: &str) {
        self.shown.lock().expect("alerts").push(text.to_string());
    }
}

pub struct Page {
    pub form: Arc<FakeForm>,
    pub status: Arc<RecordingStatus>,
    pub alerts: Arc<RecordingAlerts>,
}

impl Page {
    pub fn new(values: FormValues) -> Self {
        Self {
            form: FakeForm::with_values(values),
            status: Arc::new(RecordingStatus::default()),
            alerts: Arc::new(RecordingAlerts::default()),
        }
    }

    pub fn bindings(&self) -> FormBindings {
        FormBindings::builder()
            .fields(self.form.clone())
            .date_input(self.form.clone())
            .submit_button(self.form.clone())
            .status(self.status.clone())
            .alerts(self.alerts.clone())
            .build()
            .expect("all elements bound")
    }
}

/// The example booking: Kim from Eng, two guests at noon.
pub fn kim_form(date: NaiveDate) -> FormValues {
    FormValues {
        name: "Kim".into(),
        department: "Eng".into(),
        email: "kim@corp.com".into(),
        phone: "010-1234-5678".into(),
        date: date.format("%Y-%m-%d").to_string(),
        time: "12:00".into(),
        guests: "2".into(),
        message: String::new(),
    }
}

pub enum Scripted {
    Receipt(DeliveryReceipt),
    Fail(String),
}

/// Transport that answers from a script and records what it was sent.
pub struct ScriptedTransport {
    reply: Scripted,
    pub sent: Mutex<Vec<(Url, ReservationRequest)>>,
    /// Whether the submit button was disabled while the call was in flight.
    pub button_seen_disabled: Mutex<Option<bool>>,
    /// Controller state observed while the call was in flight.
    pub state_probe: Mutex<Option<watch::Receiver<SubmissionState>>>,
    pub state_seen: Mutex<Option<SubmissionState>>,
    form: Option<Arc<FakeForm>>,
}

impl ScriptedTransport {
    pub fn new(reply: Scripted) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
            button_seen_disabled: Mutex::new(None),
            state_probe: Mutex::new(None),
            state_seen: Mutex::new(None),
            form: None,
        }
    }

    pub fn watching(mut self, form: Arc<FakeForm>) -> Self {
        self.form = Some(form);
        self
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().expect("sent").len()
    }
}

#[async_trait]
impl ReservationTransport for ScriptedTransport {
    async fn deliver(
        &self,
        url: &Url,
        request: &ReservationRequest,
        _ack_mode: AckMode,
    ) -> Result<DeliveryReceipt, TransportError> {
        self.sent
            .lock()
            .expect("sent")
            .push((url.clone(), request.clone()));
        if let Some(form) = &self.form {
            *self.button_seen_disabled.lock().expect("seen") = Some(!form.is_enabled());
        }
        if let Some(probe) = self.state_probe.lock().expect("probe").as_ref() {
            *self.state_seen.lock().expect("state") = Some(*probe.borrow());
        }
        match &self.reply {
            Scripted::Receipt(receipt) => Ok(receipt.clone()),
            Scripted::Fail(reason) => Err(TransportError::Other(anyhow::anyhow!(reason.clone()))),
        }
    }
}

/// Booking endpoint served by axum on an ephemeral port.
#[derive(Clone)]
pub struct EndpointState {
    pub received: Arc<tokio::sync::Mutex<Vec<(Option<String>, Value)>>>,
    status: StatusCode,
    reply: Value,
}

async fn handle_booking(
    State(state): State<EndpointState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.received.lock().await.push((content_type, body));
    (state.status, Json(state.reply.clone()))
}

pub async fn spawn_endpoint(
    status: StatusCode,
    reply: Value,
) -> anyhow::Result<(Url, EndpointState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = EndpointState {
        received: Arc::new(tokio::sync::Mutex::new(Vec::new())),
        status,
        reply,
    };
    let app = Router::new()
        .route("/exec", post(handle_booking))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}/exec"))?, state))
}
