//! Extraction error types.

use thiserror::Error;

/// Errors that can occur inside a single extractor.
///
/// These never escape [`ExtractionPipeline::extract`](crate::ExtractionPipeline::extract);
/// the pipeline folds them into a warning on an empty result.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extraction process failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF-specific extraction error.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX-specific extraction error.
    #[error("DOCX extraction error: {0}")]
    Docx(String),

    /// XLSX-specific extraction error.
    #[error("XLSX extraction error: {0}")]
    Xlsx(String),

    /// Task join error from spawn_blocking (includes parser panics).
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::Docx(err.to_string())
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
