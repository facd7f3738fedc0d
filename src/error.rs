//! Error types surfaced by the summarization client.
//!
//! Every variant of [`SummarizeError`] renders as the message shown to the user;
//! a message provided by the server replaces the built-in default text but never
//! changes the variant.

use thiserror::Error;

use crate::SummaryMode;
use crate::constants::{MAX_FILE_BYTES, MIN_TEXT_CHARS};

const RATE_LIMITED_MESSAGE: &str = "Service is rate-limited. Please try again shortly.";
const SERVICE_WARMING_MESSAGE: &str = "Model is warming up. Retrying in a moment may help.";
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Input is too large for the service.";
const TRANSCRIPT_DISABLED_MESSAGE: &str =
    "Content is unavailable: access is disabled for this resource.";
const NOT_FOUND_MESSAGE: &str = "Requested content was not found.";

/// Input rejected locally, before any request is dispatched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text")]
    EmptyText,

    #[error("Text must be at least {} characters long", MIN_TEXT_CHARS)]
    TextTooShort { chars: usize },

    #[error("Please select a PDF file")]
    NotPdf { name: String },

    #[error("Please select a PDF file")]
    EmptyFile { name: String },

    #[error("File size must be less than {}MB", MAX_FILE_BYTES / (1024 * 1024))]
    FileTooLarge { bytes: u64 },

    #[error("Summary length must be a positive number of words")]
    InvalidMaxLength,

    #[error("A {mode} request must carry a {mode} payload")]
    ModeMismatch { mode: SummaryMode },
}

/// Every outcome of a submission that is not a summary.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A {0} summary is already being generated")]
    InFlight(SummaryMode),

    #[error("{}", .message.as_deref().unwrap_or(RATE_LIMITED_MESSAGE))]
    RateLimited { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or(SERVICE_WARMING_MESSAGE))]
    ServiceWarming { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or(PAYLOAD_TOO_LARGE_MESSAGE))]
    PayloadTooLarge { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or(TRANSCRIPT_DISABLED_MESSAGE))]
    TranscriptDisabled { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or(NOT_FOUND_MESSAGE))]
    NotFound { message: Option<String> },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}. Check your connection and the API URL.")]
    Network(String),

    #[error("{0}")]
    ServerReported(String),

    #[error("Unexpected response from the service: {0}")]
    MalformedResponse(String),
}

impl SummarizeError {
    /// Maps a non-success HTTP status and the optional server message to an error kind.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            429 => SummarizeError::RateLimited { message },
            503 => SummarizeError::ServiceWarming { message },
            413 => SummarizeError::PayloadTooLarge { message },
            403 => SummarizeError::TranscriptDisabled { message },
            404 => SummarizeError::NotFound { message },
            status => SummarizeError::Http {
                status,
                message: message.unwrap_or_else(|| format!("HTTP error! status: {status}")),
            },
        }
    }

    /// Whether the error was raised locally without contacting the service.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SummarizeError::Validation(_) | SummarizeError::InFlight(_)
        )
    }
}

/// Reasons the health probe considers the service unreachable.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("health check timed out after {0} seconds")]
    Timeout(u64),

    #[error("health check returned status {0}")]
    Unhealthy(u16),

    #[error("health check failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        SummarizeError::Network(error.to_string())
    }
}
