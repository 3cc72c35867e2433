//! Server state management.

use std::sync::Arc;

use docsift_extractors::{ExtractionConfig, ExtractionPipeline, ExtractorFactory};

/// Shared application state.
///
/// Both fields are fixed at startup; handlers only read them.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ExtractionPipeline>,
    api_key: Option<Arc<str>>,
}

impl AppState {
    /// Build the pipeline from `config`. A missing key is reported once here.
    pub fn new(config: &ExtractionConfig, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; image OCR and transcription will return warnings");
        }

        Self {
            pipeline: Arc::new(ExtractorFactory::pipeline(config)),
            api_key: api_key.map(Arc::from),
        }
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    /// Whether OCR/transcription have a process-wide credential.
    pub fn is_ai_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Server key, or empty when none was configured.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}
