//! Content-type sniffing from weak signals.

use crate::types::SourceFile;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_CSV: &str = "text/csv";
pub const MIME_JSON: &str = "application/json";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";

const EXTENSIONS: &[(&str, &str)] = &[
    (".pdf", MIME_PDF),
    (".docx", MIME_DOCX),
    (".xlsx", MIME_XLSX),
    (".csv", MIME_CSV),
    (".json", MIME_JSON),
    (".md", MIME_MARKDOWN),
    (".txt", MIME_PLAIN),
];

/// Infer a content type for `file`.
///
/// A declared MIME type wins (lower-cased). Otherwise the filename
/// extension is looked up case-insensitively. An empty string means
/// "unknown", which the pipeline treats as plain text.
pub fn sniff_content_type(file: &SourceFile) -> String {
    if let Some(declared) = file.mime_type.as_deref() {
        let declared = declared.trim();
        if !declared.is_empty() {
            return declared.to_lowercase();
        }
    }

    let name = file.lower_name();
    EXTENSIONS
        .iter()
        .find(|(ext, _)| name.ends_with(ext))
        .map(|(_, mime)| (*mime).to_string())
        .unwrap_or_default()
}
