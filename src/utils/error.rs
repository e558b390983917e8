use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No guest ID provided")]
    MissingGuestId,

    #[error("Guest not found")]
    GuestNotFound { guest_id: String },

    #[error("RSVP endpoint reported an error: {message}")]
    RemoteError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RsvpError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RsvpError::HttpError(_) | RsvpError::RemoteError { .. } => ErrorCategory::Network,
            RsvpError::CsvError(_)
            | RsvpError::IoError(_)
            | RsvpError::SerializationError(_) => ErrorCategory::Storage,
            RsvpError::ConfigValidationError { .. } | RsvpError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            RsvpError::ValidationError { .. }
            | RsvpError::MissingGuestId
            | RsvpError::GuestNotFound { .. } => ErrorCategory::Request,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Whether the failure was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RsvpError::HttpError(_) => "Check that the RSVP endpoint is reachable and try again",
            RsvpError::RemoteError { .. } => "Inspect the server logs for the failed request",
            RsvpError::CsvError(_) => "Open the sheet and make sure the header row is intact",
            RsvpError::IoError(_) => "Check that the data directory exists and is writable",
            RsvpError::SerializationError(_) => "Make sure the request body is valid JSON",
            RsvpError::ConfigValidationError { .. } | RsvpError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and restart"
            }
            RsvpError::ValidationError { .. } => "Correct the submitted values and resubmit",
            RsvpError::MissingGuestId => "Open the personal link that contains ?guest=<id>",
            RsvpError::GuestNotFound { .. } => "Make sure the guest ID exists in the Guests sheet",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RsvpError::HttpError(_) => "Could not reach the RSVP server".to_string(),
            RsvpError::GuestNotFound { guest_id } => format!("Guest '{}' was not found", guest_id),
            RsvpError::MissingGuestId => "No guest ID was given".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RsvpError>;
