use thiserror::Error;

/// A rule the form violated. Only the first violation is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email address is not well formed")]
    InvalidEmail,
    #[error("date '{0}' is not a valid YYYY-MM-DD value")]
    InvalidDate(String),
    #[error("date is in the past")]
    PastDate,
    #[error("date falls on a weekend")]
    WeekendDate,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "Please enter a valid email address.",
            ValidationError::InvalidDate(_) => "Please pick a reservation date.",
            ValidationError::PastDate => "Past dates cannot be selected.",
            ValidationError::WeekendDate => {
                "Reservations are not available on weekends. Please pick a weekday."
            }
        }
    }
}

/// Failure of an attempt that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("booking endpoint is not configured")]
    Unconfigured,
    #[error("booking endpoint rejected the reservation: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Unconfigured => {
                "The booking endpoint is not configured yet. See the setup guide.".to_string()
            }
            SubmitError::Rejected(message) => format!("Reservation failed: {message}"),
            SubmitError::Transport(_) => {
                "Could not reach the booking server. Please try again later.".to_string()
            }
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SubmitError::Unconfigured)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("required form element is missing: {0}")]
    MissingElement(&'static str),
}
