//! The orchestrator module turns a validated [`SummaryRequest`] into exactly one
//! outbound request and tracks the per-form submission state.

use log::{debug, info, warn};
use std::sync::Mutex;

use crate::SummaryMode;
use crate::constants::{HEALTH_PATH, HEALTH_TIMEOUT};
use crate::error::{HealthError, SummarizeError};
use crate::request::SummaryRequest;
use crate::response::{SummaryResult, interpret_response};
use crate::transport::Transport;

/// Lifecycle of one form: `Idle -> Submitting -> {Succeeded, Failed}`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Dispatches summarization requests and health probes to the summarization API.
///
/// The PDF and text forms are tracked independently: each admits at most one
/// request in flight, while requests from the two forms may overlap.
pub struct Orchestrator<T: Transport> {
    transport: T,
    base_url: String,
    pdf_state: Mutex<FormState>,
    text_state: Mutex<FormState>,
}

impl<T: Transport> Orchestrator<T> {
    /// Creates an orchestrator talking to the API at `base_url` (without trailing slash).
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            pdf_state: Mutex::new(FormState::Idle),
            text_state: Mutex::new(FormState::Idle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current state of the form for `mode`.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn state(&self, mode: SummaryMode) -> FormState {
        *self
            .state_cell(mode)
            .lock()
            .expect("Form state mutex poisoned")
    }

    /// Submits `request` and waits for the summary.
    ///
    /// The request is validated locally first; nothing is sent if validation fails
    /// or if the same form already has a request in flight. Failed requests are not
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::InFlight`] while the form is submitting,
    /// [`SummarizeError::Validation`] for invalid input, and otherwise the error
    /// kind the response or the transport failure maps to.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub async fn submit(&self, request: &SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        let submission = self.begin(request)?;

        let url = format!("{}{}", self.base_url, request.mode.endpoint());
        info!("Submitting {} summary request to {url}", request.mode);

        let result = self
            .transport
            .post_multipart(&url, request.form_fields())
            .await
            .and_then(|response| {
                debug!("Summary endpoint answered with {}", response.status);
                interpret_response(&response)
            });

        match &result {
            Ok(summary) => info!(
                "Received {} summary: {} -> {} words",
                request.mode, summary.original_word_count, summary.summary_word_count
            ),
            Err(error) => warn!("{} summary request failed: {error}", request.mode),
        }
        submission.finish(result.is_ok());

        result
    }

    /// Checks that the service answers `GET /health` with a success status within
    /// the health timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`HealthError`] when the probe times out, cannot reach the service,
    /// or receives a non-success status.
    pub async fn probe_health(&self) -> Result<(), HealthError> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);
        debug!("Probing {url}");

        let response = tokio::time::timeout(HEALTH_TIMEOUT, self.transport.get(&url))
            .await
            .map_err(|_| HealthError::Timeout(HEALTH_TIMEOUT.as_secs()))?
            .map_err(|e| HealthError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(HealthError::Unhealthy(response.status));
        }

        Ok(())
    }

    fn state_cell(&self, mode: SummaryMode) -> &Mutex<FormState> {
        match mode {
            SummaryMode::Pdf => &self.pdf_state,
            SummaryMode::Text => &self.text_state,
        }
    }

    /// Moves the form to `Submitting` if it is free and the request is valid.
    fn begin(&self, request: &SummaryRequest) -> Result<Submission<'_>, SummarizeError> {
        let cell = self.state_cell(request.mode);
        let mut state = cell.lock().expect("Form state mutex poisoned");

        if *state == FormState::Submitting {
            return Err(SummarizeError::InFlight(request.mode));
        }
        request.validate()?;
        *state = FormState::Submitting;

        Ok(Submission {
            cell,
            finished: false,
        })
    }
}

/// Leaves `Submitting` exactly once, on whichever exit path is taken.
struct Submission<'a> {
    cell: &'a Mutex<FormState>,
    finished: bool,
}

impl Submission<'_> {
    fn finish(mut self, succeeded: bool) {
        self.settle(if succeeded {
            FormState::Succeeded
        } else {
            FormState::Failed
        });
    }

    fn settle(&mut self, outcome: FormState) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Ok(mut state) = self.cell.lock() {
            *state = outcome;
        }
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        // Reached without `finish` only when the submitting future is dropped.
        self.settle(FormState::Failed);
    }
}
