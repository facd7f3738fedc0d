//! The request module holds the input side of a summarization round trip:
//! the selected file or pasted text, its local validation, and the multipart
//! fields it is uploaded as.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use crate::SummaryMode;
use crate::constants::{
    LONG_SUMMARY_LENGTH, MAX_FILE_BYTES, MEDIUM_SUMMARY_LENGTH, MIN_TEXT_CHARS,
    PDF_CONTENT_TYPE, PDF_MAGIC, SHORT_SUMMARY_LENGTH,
};
use crate::error::ValidationError;
use crate::transport::FormField;
use crate::view::format_file_size;

/// A file picked for upload, held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Creates a file from its name and content, guessing the content type from the name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_owned();

        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Reads the file at `path` for upload.
    ///
    /// The size is checked before the content is read, so an oversized file is
    /// never loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or a [`ValidationError::FileTooLarge`]
    /// (downcastable from the returned error) if it exceeds [`MAX_FILE_BYTES`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to inspect {}", path.display()))?;
        if metadata.len() > MAX_FILE_BYTES {
            return Err(ValidationError::FileTooLarge {
                bytes: metadata.len(),
            }
            .into());
        }

        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Selected {name} ({} bytes)", bytes.len());

        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the content type or the leading bytes identify a PDF document.
    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
            || self.bytes.starts_with(PDF_MAGIC)
    }

    /// Name and human-readable size, as shown once a file is picked.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size()))
    }
}

/// Content submitted for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    File(SelectedFile),
    Text(String),
}

/// A single summarization request, validated locally before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub mode: SummaryMode,
    pub payload: Payload,
    /// Upper bound on the summary size in words.
    pub max_length: u32,
}

impl SummaryRequest {
    pub fn pdf(file: SelectedFile) -> Self {
        Self {
            mode: SummaryMode::Pdf,
            payload: Payload::File(file),
            max_length: MEDIUM_SUMMARY_LENGTH,
        }
    }

    pub fn text(text: impl Into<String>, max_length: u32) -> Self {
        Self {
            mode: SummaryMode::Text,
            payload: Payload::Text(text.into()),
            max_length,
        }
    }

    /// Checks the request against the local input constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the payload does not match the mode, the
    /// trimmed text is empty or shorter than [`MIN_TEXT_CHARS`], the file is empty,
    /// not a PDF or exceeds [`MAX_FILE_BYTES`], or `max_length` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.mode, &self.payload) {
            (SummaryMode::Pdf, Payload::File(file)) => {
                if file.bytes.is_empty() {
                    return Err(ValidationError::EmptyFile {
                        name: file.name.clone(),
                    });
                }
                if !file.is_pdf() {
                    return Err(ValidationError::NotPdf {
                        name: file.name.clone(),
                    });
                }
                if file.size() > MAX_FILE_BYTES {
                    return Err(ValidationError::FileTooLarge { bytes: file.size() });
                }
            }
            (SummaryMode::Text, Payload::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ValidationError::EmptyText);
                }
                let chars = text.chars().count();
                if chars < MIN_TEXT_CHARS {
                    return Err(ValidationError::TextTooShort { chars });
                }
            }
            (mode, _) => return Err(ValidationError::ModeMismatch { mode }),
        }

        if self.max_length == 0 {
            return Err(ValidationError::InvalidMaxLength);
        }

        Ok(())
    }

    /// Multipart fields for the request body. The PDF endpoint takes only the file.
    pub fn form_fields(&self) -> Vec<FormField> {
        match &self.payload {
            Payload::File(file) => vec![FormField::File {
                name: "file".to_owned(),
                file_name: file.name.clone(),
                content_type: file.content_type.clone(),
                bytes: file.bytes.clone(),
            }],
            Payload::Text(text) => vec![
                FormField::Text {
                    name: "text".to_owned(),
                    value: text.trim().to_owned(),
                },
                FormField::Text {
                    name: "max_length".to_owned(),
                    value: self.max_length.to_string(),
                },
            ],
        }
    }
}

/// Parses a summary length given as a preset name (`short`, `medium`, `long`) or
/// as a positive number of words.
///
/// # Errors
///
/// Returns a message naming the accepted values if `input` is neither.
pub fn parse_summary_length(input: &str) -> Result<u32, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "short" => Ok(SHORT_SUMMARY_LENGTH),
        "medium" => Ok(MEDIUM_SUMMARY_LENGTH),
        "long" => Ok(LONG_SUMMARY_LENGTH),
        other => match other.parse::<u32>() {
            Ok(words) if words > 0 => Ok(words),
            _ => Err(format!(
                "expected short, medium, long or a positive number of words, got '{input}'"
            )),
        },
    }
}
