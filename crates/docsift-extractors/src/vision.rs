//! Image OCR through a vision-capable chat model.
//!
//! The image is inlined as a base64 data URI. Remote failures become
//! warnings here; this extractor never returns `Err`.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::ExtractResult;
use crate::openai::{OpenAiClient, RemoteOutcome, VisionPrompt};
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

const SYSTEM_PROMPT: &str = "You are an OCR engine. Extract all visible text from the image \
     in natural reading order. Output only the extracted text, with no commentary, \
     descriptions or formatting.";

const USER_PROMPT: &str = "Extract all visible text from this image, in reading order only.";

/// Vision OCR extractor.
pub struct VisionOcrExtractor {
    client: Arc<OpenAiClient>,
}

impl VisionOcrExtractor {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Build `data:<mime>;base64,<payload>`.
    pub fn data_uri(mime_type: &str, content: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, STANDARD.encode(content))
    }
}

#[async_trait]
impl Extractor for VisionOcrExtractor {
    async fn extract(&self, file: &SourceFile, api_key: &str) -> ExtractResult<ExtractedContent> {
        if api_key.trim().is_empty() {
            return Ok(ExtractedContent::warning("Vision OCR error: missing API key"));
        }

        let mime_type = file
            .mime_type
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "image/png".to_string());
        let data_uri = Self::data_uri(&mime_type, &file.bytes);

        let prompt = VisionPrompt {
            system: SYSTEM_PROMPT,
            instruction: USER_PROMPT,
        };

        let result = match self.client.describe_image(api_key, prompt, &data_uri).await {
            RemoteOutcome::Success(text) => {
                tracing::info!(
                    file = %file.name,
                    model = %self.client.vision_model(),
                    chars = text.len(),
                    "Vision OCR completed"
                );
                ExtractedContent::text(text).with_meta("method", "vision-ocr")
            }
            RemoteOutcome::HttpError { status, body } => {
                ExtractedContent::warning(format!("Vision OCR failed: {} - {}", status, body))
            }
            RemoteOutcome::TransportError(message) => {
                ExtractedContent::warning(format!("Vision OCR error: {}", message))
            }
        };

        Ok(result)
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::VisionOcr
    }

    fn name(&self) -> &str {
        "vision-ocr"
    }
}
