//! Extraction configuration.

use serde::{Deserialize, Serialize};

/// Default ceiling on processed PDF pages.
pub const DEFAULT_PDF_MAX_PAGES: usize = 30;

/// Tunables for the extraction pipeline and its remote collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pages past this count are skipped and a truncation warning is added.
    pub pdf_max_pages: usize,
    /// Base URL of the OpenAI-compatible API (no trailing slash).
    pub api_base: String,
    /// Vision-capable chat model used for OCR.
    pub vision_model: String,
    /// Speech-to-text model used for audio/video.
    pub transcription_model: String,
    /// Per-request timeout for remote calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_max_pages: DEFAULT_PDF_MAX_PAGES,
            api_base: "https://api.openai.com/v1".to_string(),
            vision_model: "gpt-4o".to_string(),
            transcription_model: "whisper-1".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl ExtractionConfig {
    /// Create configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(pages) = std::env::var("DOCSIFT_PDF_MAX_PAGES") {
            if let Ok(pages) = pages.parse::<usize>() {
                if pages > 0 {
                    config.pdf_max_pages = pages;
                }
            }
        }

        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            if !base.trim().is_empty() {
                config.api_base = base.trim().trim_end_matches('/').to_string();
            }
        }

        if let Ok(model) = std::env::var("DOCSIFT_VISION_MODEL") {
            config.vision_model = model;
        }

        if let Ok(model) = std::env::var("DOCSIFT_TRANSCRIPTION_MODEL") {
            config.transcription_model = model;
        }

        if let Ok(secs) = std::env::var("DOCSIFT_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout_secs = secs;
            }
        }

        config
    }

    /// Point remote calls at a different API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the PDF page ceiling.
    pub fn with_pdf_max_pages(mut self, pages: usize) -> Self {
        self.pdf_max_pages = pages.max(1);
        self
    }

    /// Override the per-request timeout for remote calls.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.pdf_max_pages, 30);
        assert_eq!(config.vision_model, "gpt-4o");
        assert_eq!(config.transcription_model, "whisper-1");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ExtractionConfig::default().with_api_base("http://127.0.0.1:9000/v1/");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn test_page_ceiling_never_zero() {
        let config = ExtractionConfig::default().with_pdf_max_pages(0);
        assert_eq!(config.pdf_max_pages, 1);
    }
}
