use serde::{Deserialize, Serialize};

/// Reply body of an endpoint that answers with a readable acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the caller knows about a delivered reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReceipt {
    /// The request went out without error. The response was not inspected.
    Assumed,
    Confirmed,
    Rejected(String),
}
