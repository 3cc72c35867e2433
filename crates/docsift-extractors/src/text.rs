//! Text-like formats: plain text, CSV, JSON and HTML.
//!
//! None of these can fail hard. Malformed UTF-8 is decoded lossily and
//! malformed JSON falls back to the raw text with a warning.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractResult;
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

pub(crate) fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Verbatim UTF-8 decode. Also used for CSV, which is kept as-is.
#[derive(Debug, Clone)]
pub struct PlainTextExtractor {
    kind: ExtractorKind,
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self {
            kind: ExtractorKind::PlainText,
        }
    }

    /// Same decoding, tagged as the CSV extractor.
    pub fn csv() -> Self {
        Self {
            kind: ExtractorKind::Csv,
        }
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for PlainTextExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        Ok(ExtractedContent::text(decode_lossy(&file.bytes)))
    }

    fn kind(&self) -> ExtractorKind {
        self.kind
    }

    fn name(&self) -> &str {
        match self.kind {
            ExtractorKind::Csv => "csv-text",
            _ => "plain-text",
        }
    }
}

/// Parses JSON and re-serializes it with two-space indentation.
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for JsonExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        let raw = decode_lossy(&file.bytes);

        let pretty = serde_json::from_str::<serde_json::Value>(&raw)
            .and_then(|value| serde_json::to_string_pretty(&value));

        match pretty {
            Ok(text) => Ok(ExtractedContent::text(text)),
            Err(e) => {
                tracing::debug!(file = %file.name, error = %e, "JSON parse failed, keeping raw text");
                Ok(ExtractedContent::text(raw).with_warning("Invalid JSON, returned raw text"))
            }
        }
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Json
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Strip `<script>`/`<style>` blocks and all tags, then collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, " ");
    let without_styles = STYLE_BLOCK.replace_all(&without_scripts, " ");
    let without_tags = ANY_TAG.replace_all(&without_styles, " ");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Lossy HTML-to-text conversion.
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for HtmlExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        Ok(ExtractedContent::text(strip_html(&decode_lossy(&file.bytes))))
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Html
    }

    fn name(&self) -> &str {
        "html-strip"
    }
}
