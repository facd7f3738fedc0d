//! The textsum library is a client for a remote summarization API.
//! It validates PDF and text input locally, uploads it as a multipart request
//! and maps every outcome to a result or a single user-facing notification.

pub mod config;
pub mod constants;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod session;
pub mod storage;
pub mod transport;
pub mod view;

use crate::constants::{SUMMARIZE_PDF_PATH, SUMMARIZE_TEXT_PATH};

/// Enum representing the form a summary request was submitted from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SummaryMode {
    /// Uploaded PDF document
    Pdf,
    /// Pasted plain text
    Text,
}

impl SummaryMode {
    /// Endpoint path for this mode, relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            SummaryMode::Pdf => SUMMARIZE_PDF_PATH,
            SummaryMode::Text => SUMMARIZE_TEXT_PATH,
        }
    }
}

impl std::str::FromStr for SummaryMode {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "pdf" => Ok(SummaryMode::Pdf),
            "text" => Ok(SummaryMode::Text),
            _ => Err(format!("Invalid summary mode: {}", input)),
        }
    }
}

impl std::fmt::Display for SummaryMode {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMode::Pdf => write!(formatter, "pdf"),
            SummaryMode::Text => write!(formatter, "text"),
        }
    }
}

/// Enum representing the persisted colour theme.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {}", input)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

pub use config::resolve_api_base_url;
pub use error::{SummarizeError, ValidationError};
pub use orchestrator::{FormState, Orchestrator};
pub use request::{Payload, SelectedFile, SummaryRequest};
pub use response::SummaryResult;
pub use session::Session;
pub use transport::{ReqwestTransport, Transport};
