//! Single-slot notification center. Showing a notification replaces the one
//! currently on screen; each notification expires after a fixed lifetime.

use log::debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::constants::NOTIFICATION_LIFETIME;
use crate::error::SummarizeError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

pub struct NotificationCenter {
    current: Mutex<Option<Notification>>,
    lifetime: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NOTIFICATION_LIFETIME)
    }
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: Mutex::new(None),
            lifetime,
        }
    }

    /// Shows `message`, replacing whatever is currently shown.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        let notification = Notification {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        };
        debug!("Notification {:?}: {}", kind, notification.message);

        let mut current = self.current.lock().expect("Notification mutex poisoned");
        *current = Some(notification.clone());
        notification
    }

    /// Shows the notification describing `error`.
    pub fn show_error(&self, error: &SummarizeError) -> Notification {
        self.show(NotificationKind::Error, format!("Error: {error}"))
    }

    /// Returns the notification on screen, if it has not expired yet.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn current(&self) -> Option<Notification> {
        let mut current = self.current.lock().expect("Notification mutex poisoned");
        if current
            .as_ref()
            .is_some_and(|notification| notification.shown_at.elapsed() >= self.lifetime)
        {
            *current = None;
        }

        current.clone()
    }

    /// Removes the notification on screen.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn dismiss(&self) {
        self.current
            .lock()
            .expect("Notification mutex poisoned")
            .take();
    }
}
