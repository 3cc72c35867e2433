//! Factory for creating extractors and the standard routing table.

use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::docx::DocxExtractor;
use crate::openai::OpenAiClient;
use crate::pdf::PdfExtractor;
use crate::pipeline::{ExtractionPipeline, RouteProbe};
use crate::sniff::{MIME_CSV, MIME_HTML, MIME_JSON, MIME_MARKDOWN, MIME_PDF};
use crate::text::{HtmlExtractor, JsonExtractor, PlainTextExtractor};
use crate::transcription::TranscriptionExtractor;
use crate::vision::VisionOcrExtractor;
use crate::xlsx::XlsxExtractor;
use crate::Extractor;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a plain-text extractor.
    pub fn plain_text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create a CSV extractor (verbatim decode).
    pub fn csv() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::csv())
    }

    /// Create a JSON extractor.
    pub fn json() -> Arc<dyn Extractor> {
        Arc::new(JsonExtractor::new())
    }

    /// Create an HTML extractor.
    pub fn html() -> Arc<dyn Extractor> {
        Arc::new(HtmlExtractor::new())
    }

    /// Create a DOCX extractor.
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create an XLSX extractor.
    pub fn xlsx() -> Arc<dyn Extractor> {
        Arc::new(XlsxExtractor::new())
    }

    /// Create a PDF extractor with a page ceiling.
    pub fn pdf(max_pages: usize) -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::with_max_pages(max_pages))
    }

    /// Create a vision OCR extractor sharing `client`.
    pub fn vision(client: Arc<OpenAiClient>) -> Arc<dyn Extractor> {
        Arc::new(VisionOcrExtractor::new(client))
    }

    /// Create a transcription extractor sharing `client`.
    pub fn transcription(client: Arc<OpenAiClient>) -> Arc<dyn Extractor> {
        Arc::new(TranscriptionExtractor::new(client))
    }

    /// Build the standard routing table.
    ///
    /// Order matters: `text/markdown` and `text/html` declared types are
    /// taken by the `text/` prefix route before their dedicated routes are
    /// consulted, so those routes only fire on filename matches.
    pub fn pipeline(config: &ExtractionConfig) -> ExtractionPipeline {
        let client = Arc::new(OpenAiClient::new(config));
        let plain = Self::plain_text();

        ExtractionPipeline::new()
            .add_route("unknown-type", |p: &RouteProbe| p.content_type.is_empty(), plain.clone())
            .add_route("pdf", |p| p.content_type == MIME_PDF, Self::pdf(config.pdf_max_pages))
            .add_route(
                "docx",
                |p| p.content_type.contains("wordprocessingml.document"),
                Self::docx(),
            )
            .add_route(
                "xlsx",
                |p| p.content_type.contains("spreadsheetml.sheet"),
                Self::xlsx(),
            )
            .add_route(
                "csv",
                |p| p.content_type == MIME_CSV || p.has_extension(".csv"),
                Self::csv(),
            )
            .add_route(
                "json",
                |p| p.content_type == MIME_JSON || p.has_extension(".json"),
                Self::json(),
            )
            .add_route("text", |p| p.content_type.starts_with("text/"), plain.clone())
            .add_route(
                "markdown",
                |p| p.content_type == MIME_MARKDOWN || p.has_extension(".md"),
                plain.clone(),
            )
            .add_route(
                "html",
                |p| p.content_type == MIME_HTML || p.has_extension(".html"),
                Self::html(),
            )
            .add_route("image", |p| p.content_type.starts_with("image/"), Self::vision(client.clone()))
            .add_route(
                "audio-video",
                |p| p.content_type.starts_with("audio/") || p.content_type.starts_with("video/"),
                Self::transcription(client),
            )
            .with_fallback(plain)
    }
}
