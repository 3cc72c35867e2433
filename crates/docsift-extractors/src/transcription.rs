//! Audio/video transcription through a speech-to-text model.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::openai::{OpenAiClient, RemoteOutcome};
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

/// Transcription extractor. Remote failures become warnings.
pub struct TranscriptionExtractor {
    client: Arc<OpenAiClient>,
}

impl TranscriptionExtractor {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for TranscriptionExtractor {
    async fn extract(&self, file: &SourceFile, api_key: &str) -> ExtractResult<ExtractedContent> {
        if api_key.trim().is_empty() {
            return Ok(ExtractedContent::warning("Transcription error: missing API key"));
        }

        let outcome = self
            .client
            .transcribe(
                api_key,
                &file.name,
                file.mime_type.as_deref(),
                file.bytes.clone(),
            )
            .await;

        let result = match outcome {
            RemoteOutcome::Success(transcription) => {
                tracing::info!(
                    file = %file.name,
                    model = %self.client.transcription_model(),
                    duration = ?transcription.duration,
                    "Transcription completed"
                );
                ExtractedContent::text(transcription.text.trim())
                    .with_meta("duration", transcription.duration)
                    .with_meta("method", "whisper")
            }
            RemoteOutcome::HttpError { status, body } => {
                ExtractedContent::warning(format!("Transcription failed: {} - {}", status, body))
            }
            RemoteOutcome::TransportError(message) => {
                ExtractedContent::warning(format!("Transcription error: {}", message))
            }
        };

        Ok(result)
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Transcription
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
