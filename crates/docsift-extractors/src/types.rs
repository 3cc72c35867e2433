//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An uploaded file handed to the pipeline.
///
/// The pipeline only borrows it; nothing is cached past a single call.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Original filename, used for extension sniffing and multipart uploads.
    pub name: String,
    /// Declared MIME type, if the uploader sent one.
    pub mime_type: Option<String>,
    /// Raw payload.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a file with no declared MIME type.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    /// Attach a declared MIME type. Empty strings are treated as absent.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        self.mime_type = if mime_type.trim().is_empty() {
            None
        } else {
            Some(mime_type)
        };
        self
    }

    /// Lower-cased filename for extension checks.
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Which leaf strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    PlainText,
    Csv,
    Json,
    Html,
    Docx,
    Xlsx,
    Pdf,
    VisionOcr,
    Transcription,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::PlainText => "plain-text",
            ExtractorKind::Csv => "csv",
            ExtractorKind::Json => "json",
            ExtractorKind::Html => "html",
            ExtractorKind::Docx => "docx",
            ExtractorKind::Xlsx => "xlsx",
            ExtractorKind::Pdf => "pdf",
            ExtractorKind::VisionOcr => "vision-ocr",
            ExtractorKind::Transcription => "transcription",
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized output of every extractor.
///
/// `text` is always present (possibly empty). No warnings means the
/// extractor succeeded. `meta` is extractor-specific: page counts for PDF,
/// sheet names for XLSX, a method tag for remote extractors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text for indexing.
    pub text: String,

    /// Human-readable problems encountered while extracting.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,

    /// Extractor-specific diagnostics, serialized in insertion order.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty", default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Successful result carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Empty-text result with a single warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::default().with_warning(message)
    }

    /// Append a warning.
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }

    /// Add metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// True when no warnings were recorded.
    pub fn is_success(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
