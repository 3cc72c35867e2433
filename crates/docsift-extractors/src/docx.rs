//! DOCX text extraction straight from `word/document.xml`.
//!
//! Only the body part is read. Headers, footers, footnotes and embedded
//! media live in other archive entries and are ignored.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractResult;
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

const DOCUMENT_ENTRY: &str = "word/document.xml";

static PARAGRAPH_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>").expect("valid regex"));
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:(?:br|cr)\b[^>]*/>").expect("valid regex"));
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\b[^>]*/>").expect("valid regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\f\v]+").expect("valid regex"));

/// DOCX extractor reading the raw WordprocessingML body.
///
/// Work runs inside `spawn_blocking` because zip inflation is synchronous.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read `word/document.xml`, or `None` when the archive has no such entry.
    fn read_document_xml(content: &[u8]) -> ExtractResult<Option<String>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(content))?;

        let mut entry = match archive.by_name(DOCUMENT_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut raw = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut raw)?;
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    fn extract_sync(content: Vec<u8>) -> ExtractResult<ExtractedContent> {
        match Self::read_document_xml(&content)? {
            Some(xml) => Ok(ExtractedContent::text(document_xml_to_text(&xml))),
            None => Ok(ExtractedContent::warning("No document.xml in DOCX (corrupt?)")),
        }
    }
}

/// Turn WordprocessingML into paragraph-per-line text.
pub fn document_xml_to_text(xml: &str) -> String {
    let marked = PARAGRAPH_END.replace_all(xml, "\n");
    let marked = LINE_BREAK.replace_all(&marked, "\n");
    let marked = TAB.replace_all(&marked, "\t");
    let stripped = ANY_TAG.replace_all(&marked, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| HORIZONTAL_SPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        let content = file.bytes.clone();

        let result = tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;

        if result.is_success() && result.is_empty() {
            tracing::debug!(file = %file.name, "DOCX body contained no text");
        }

        Ok(result)
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Docx
    }

    fn name(&self) -> &str {
        "docx-xml"
    }
}
