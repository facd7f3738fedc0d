//! Terminal rendering for summaries, statistics and notifications.

use anyhow::{Context, Result};
use std::path::Path;

use crate::Theme;
use crate::constants::{CHAR_COUNT_HIGHLIGHT_ABOVE, CHAR_COUNT_WARNING_ABOVE};
use crate::notify::{Notification, NotificationKind};
use crate::response::SummaryResult;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count in base-1024 units with at most two decimals,
/// e.g. `0 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{rounded} {}", SIZE_UNITS.get(unit).unwrap_or(&"GB"))
}

/// Emphasis applied to the character counter of the text form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CharCountLevel {
    Muted,
    Highlight,
    Warning,
}

pub fn char_count_level(count: usize) -> CharCountLevel {
    if count > CHAR_COUNT_WARNING_ABOVE {
        CharCountLevel::Warning
    } else if count > CHAR_COUNT_HIGHLIGHT_ABOVE {
        CharCountLevel::Highlight
    } else {
        CharCountLevel::Muted
    }
}

pub fn char_count_label(text: &str) -> String {
    format!("{} characters", text.chars().count())
}

pub fn words_label(count: u64) -> String {
    format!("{count} words")
}

/// Renders the result region: summary text followed by word-count statistics.
pub fn render_result(result: &SummaryResult) -> String {
    format!(
        "Summary\n-------\n{}\n\nOriginal: {}\nSummary:  {}\nReduced:  {}%",
        result.summary_text.trim(),
        words_label(result.original_word_count),
        words_label(result.summary_word_count),
        result.reduction_percentage()
    )
}

fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Warning => "⚠",
        NotificationKind::Info => "ℹ",
    }
}

// ANSI colour codes; the dark theme uses the bright variants.
fn notification_color(kind: NotificationKind, theme: Theme) -> u8 {
    let base = match kind {
        NotificationKind::Success => 32,
        NotificationKind::Error => 31,
        NotificationKind::Warning => 33,
        NotificationKind::Info => 36,
    };
    match theme {
        Theme::Dark => base + 60,
        Theme::Light => base,
    }
}

/// Renders a notification line, coloured for `theme` when `colored` is set.
pub fn render_notification(notification: &Notification, theme: Theme, colored: bool) -> String {
    let icon = notification_icon(notification.kind);
    if colored {
        format!(
            "\x1b[{}m{icon}\x1b[0m {}",
            notification_color(notification.kind, theme),
            notification.message
        )
    } else {
        format!("{icon} {}", notification.message)
    }
}

/// Writes the summary text to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_summary(path: &Path, summary: &str) -> Result<()> {
    std::fs::write(path, summary)
        .with_context(|| format!("Failed to write summary to {}", path.display()))
}
