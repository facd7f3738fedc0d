//! The response module turns a raw HTTP exchange into a [`SummaryResult`] or a
//! [`SummarizeError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SummarizeError;
use crate::transport::RawResponse;

/// Fields a server may use to report a failure, in order of precedence.
const SERVER_ERROR_FIELDS: [&str; 2] = ["detail", "error"];

/// Summary returned by the service along with word-count statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "summary")]
    pub summary_text: String,
    #[serde(default)]
    pub original_text: String,
    #[serde(rename = "original_length")]
    pub original_word_count: u64,
    #[serde(rename = "summary_length")]
    pub summary_word_count: u64,
}

impl SummaryResult {
    /// Percentage by which the summary is shorter than the original, rounded
    /// half-up to the nearest integer.
    ///
    /// The service is not trusted to return a shorter summary, so the value can
    /// be negative. An empty original yields `0`.
    pub fn reduction_percentage(&self) -> i64 {
        if self.original_word_count == 0 {
            return 0;
        }
        let original = self.original_word_count as f64;
        let reduction = (original - self.summary_word_count as f64) / original * 100.0;

        (reduction + 0.5).floor() as i64
    }
}

/// Interprets a completed exchange with a summarization endpoint.
///
/// # Errors
///
/// Returns the [`SummarizeError`] matching a non-success status, a
/// [`SummarizeError::ServerReported`] when a success body carries an error field,
/// or [`SummarizeError::MalformedResponse`] when the body is not a summary.
pub fn interpret_response(response: &RawResponse) -> Result<SummaryResult, SummarizeError> {
    if !response.is_success() {
        return Err(SummarizeError::from_status(
            response.status,
            server_message(&response.body),
        ));
    }

    let body: Value = serde_json::from_str(&response.body)
        .map_err(|e| SummarizeError::MalformedResponse(e.to_string()))?;

    if let Some(message) = error_field(&body) {
        return Err(SummarizeError::ServerReported(message));
    }

    serde_json::from_value(body).map_err(|e| SummarizeError::MalformedResponse(e.to_string()))
}

/// Extracts the server-provided error message from a JSON body, if any.
pub fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_field)
}

fn error_field(body: &Value) -> Option<String> {
    SERVER_ERROR_FIELDS
        .iter()
        .filter_map(|field| body.get(field))
        .find_map(message_of)
}

// Empty, null, false and zero values do not count as a message.
fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
