//! docsift-extractors - Text extraction from heterogeneous uploaded files.
//!
//! Sniffs a file's type from its declared MIME type or extension, routes it
//! to one of the format extractors, and always hands back a uniform
//! [`ExtractedContent`] record. Failures surface as warnings on the result,
//! never as errors to the caller.
//!
//! # Formats
//!
//! - plain text, markdown and CSV (verbatim UTF-8 decode)
//! - JSON (re-indented), HTML (tags stripped)
//! - DOCX (`word/document.xml` body), XLSX (every sheet as CSV)
//! - PDF (page-capped, per-page markers)
//! - images via a vision model, audio/video via a speech-to-text model
//!
//! # Example
//!
//! ```ignore
//! use docsift_extractors::{ExtractionConfig, ExtractorFactory, SourceFile};
//!
//! let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::from_env());
//! let file = SourceFile::new("report.pdf", pdf_bytes);
//! let result = pipeline.extract(&file, &api_key).await;
//! for warning in &result.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

mod config;
mod docx;
mod error;
mod factory;
mod pdf;
mod pipeline;
mod sniff;
mod text;
mod transcription;
mod types;
mod vision;
mod xlsx;

pub mod openai;

pub use config::{ExtractionConfig, DEFAULT_PDF_MAX_PAGES};
pub use docx::{document_xml_to_text, DocxExtractor};
pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pdf::PdfExtractor;
pub use pipeline::{ExtractionPipeline, Route, RoutePredicate, RouteProbe, FALLBACK_ROUTE};
pub use sniff::{
    sniff_content_type, MIME_CSV, MIME_DOCX, MIME_HTML, MIME_JSON, MIME_MARKDOWN, MIME_PDF,
    MIME_PLAIN, MIME_XLSX,
};
pub use text::{strip_html, HtmlExtractor, JsonExtractor, PlainTextExtractor};
pub use transcription::TranscriptionExtractor;
pub use types::{ExtractedContent, ExtractorKind, SourceFile};
pub use vision::VisionOcrExtractor;
pub use xlsx::XlsxExtractor;

use async_trait::async_trait;

/// Core Extractor trait - every format strategy implements this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text from `file`.
    ///
    /// `api_key` is only consulted by remote extractors. Returning `Err`
    /// is allowed; the pipeline turns it into a warning.
    async fn extract(&self, file: &SourceFile, api_key: &str) -> ExtractResult<ExtractedContent>;

    /// Which strategy this is.
    fn kind(&self) -> ExtractorKind;

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
