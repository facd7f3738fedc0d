//! The session module holds the state of one client run: the orchestrator bound
//! to the resolved API, the notification slot and the summary on display.

use anyhow::{Result, anyhow};
use copypasta::ClipboardProvider;
use log::{info, warn};
use std::path::Path;
use std::sync::Mutex;

use crate::Theme;
use crate::notify::{NotificationCenter, NotificationKind};
use crate::orchestrator::Orchestrator;
use crate::request::SummaryRequest;
use crate::response::SummaryResult;
use crate::transport::Transport;
use crate::view::write_summary;

const SUCCESS_MESSAGE: &str = "Summary generated successfully!";
const DOWNLOADED_MESSAGE: &str = "Summary downloaded!";
const COPIED_MESSAGE: &str = "Summary copied to clipboard!";
const READY_MESSAGE: &str = "Ready for new summary!";
const UNREACHABLE_MESSAGE: &str =
    "Backend not reachable. Check the API URL from settings (--api YOUR_URL).";
const ABOUT_MESSAGE: &str = "AI Summarizer - Powered by Hugging Face AI models for intelligent text summarization.";
const PRIVACY_MESSAGE: &str = "Your data is processed securely and not stored permanently.";

/// Context shared by every operation of a client run.
pub struct Session<T: Transport> {
    orchestrator: Orchestrator<T>,
    notifications: NotificationCenter,
    theme: Theme,
    current: Mutex<Option<SummaryResult>>,
}

impl<T: Transport> Session<T> {
    pub fn new(orchestrator: Orchestrator<T>, theme: Theme) -> Self {
        Self {
            orchestrator,
            notifications: NotificationCenter::default(),
            theme,
            current: Mutex::new(None),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<T> {
        &self.orchestrator
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Summary on display, if any.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn current_summary(&self) -> Option<SummaryResult> {
        self.current
            .lock()
            .expect("Session mutex poisoned")
            .clone()
    }

    /// Submits `request` and reports the outcome as a notification.
    ///
    /// A successful summary replaces the one on display, whichever form produced
    /// it. Failures leave the display untouched and are not propagated.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub async fn summarize(&self, request: &SummaryRequest) -> Option<SummaryResult> {
        match self.orchestrator.submit(request).await {
            Ok(result) => {
                *self.current.lock().expect("Session mutex poisoned") = Some(result.clone());
                self.notifications
                    .show(NotificationKind::Success, SUCCESS_MESSAGE);
                Some(result)
            }
            Err(error) => {
                self.notifications.show_error(&error);
                None
            }
        }
    }

    /// Probes the API and shows an advisory warning when it is unreachable.
    pub async fn check_health(&self) -> bool {
        match self.orchestrator.probe_health().await {
            Ok(()) => {
                info!("API at {} is healthy", self.orchestrator.base_url());
                true
            }
            Err(error) => {
                warn!("{error}");
                self.notifications
                    .show(NotificationKind::Warning, UNREACHABLE_MESSAGE);
                false
            }
        }
    }

    /// Saves the summary on display to `path`. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn download_summary(&self, path: &Path) -> Result<bool> {
        let Some(result) = self.current_summary() else {
            return Ok(false);
        };

        write_summary(path, &result.summary_text)?;
        info!("Summary written to {}", path.display());
        self.notifications
            .show(NotificationKind::Success, DOWNLOADED_MESSAGE);
        Ok(true)
    }

    /// Places the summary on display on `clipboard`. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard rejects the content
    pub fn copy_summary<C: ClipboardProvider>(&self, clipboard: &mut C) -> Result<bool> {
        let Some(result) = self.current_summary() else {
            return Ok(false);
        };

        clipboard
            .set_contents(result.summary_text)
            .map_err(|e| anyhow!("Clipboard error: {}", e))?;
        self.notifications
            .show(NotificationKind::Success, COPIED_MESSAGE);
        Ok(true)
    }

    /// Clears the display for the next submission.
    pub fn new_summary(&self) {
        self.close_result();
        self.notifications.show(NotificationKind::Info, READY_MESSAGE);
    }

    /// Hides the summary on display.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn close_result(&self) {
        self.current.lock().expect("Session mutex poisoned").take();
    }

    pub fn show_about(&self) {
        self.notifications.show(NotificationKind::Info, ABOUT_MESSAGE);
    }

    pub fn show_privacy(&self) {
        self.notifications
            .show(NotificationKind::Info, PRIVACY_MESSAGE);
    }
}
