use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://text-sum-7t11.onrender.com";

pub const SUMMARIZE_PDF_PATH: &str = "/summarize-pdf";
pub const SUMMARIZE_TEXT_PATH: &str = "/summarize-text";
pub const HEALTH_PATH: &str = "/health";

/// Minimum number of characters of trimmed text accepted for summarization.
pub const MIN_TEXT_CHARS: usize = 50;

/// Upload cap for PDF files (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(4);

pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

pub const SHORT_SUMMARY_LENGTH: u32 = 100;
pub const MEDIUM_SUMMARY_LENGTH: u32 = 150;
pub const LONG_SUMMARY_LENGTH: u32 = 200;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub(crate) const PDF_MAGIC: &[u8] = b"%PDF-";

pub const DEFAULT_DOWNLOAD_FILE: &str = "summary.txt";

pub(crate) const PREF_API_BASE_URL: &str = "apiBaseUrl";
pub(crate) const PREF_THEME: &str = "theme";

pub(crate) const CHAR_COUNT_WARNING_ABOVE: usize = 10_000;
pub(crate) const CHAR_COUNT_HIGHLIGHT_ABOVE: usize = 5_000;
