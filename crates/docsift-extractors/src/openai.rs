//! Minimal OpenAI-compatible HTTP client for vision OCR and transcription.
//!
//! Every call is a single attempt. Outcomes are returned as a tagged
//! [`RemoteOutcome`] so callers can tell an empty answer apart from a
//! failed call without parsing strings.

use std::time::Duration;

use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;

/// Result of one remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome<T> {
    /// 2xx response with a decoded body.
    Success(T),
    /// Non-2xx response; `body` is the raw response text.
    HttpError { status: u16, body: String },
    /// The request never produced a usable response.
    TransportError(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: ChatContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Decoded `verbose_json` transcription response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// A vision prompt: system instruction plus user instruction text.
#[derive(Debug, Clone, Copy)]
pub struct VisionPrompt<'a> {
    pub system: &'a str,
    pub instruction: &'a str,
}

/// Shared HTTP client for the remote extractors.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    vision_model: String,
    transcription_model: String,
}

impl OpenAiClient {
    pub fn new(config: &ExtractionConfig) -> Self {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout_secs = config.request_timeout_secs,
                    "Failed to build HTTP client, falling back to defaults without timeout"
                );
                reqwest::Client::new()
            }
        };

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            vision_model: config.vision_model.clone(),
            transcription_model: config.transcription_model.clone(),
        }
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    pub fn transcription_model(&self) -> &str {
        &self.transcription_model
    }

    /// Ask a vision model to read `data_uri`. Success carries the first
    /// choice's message content, empty when the model returned none.
    pub async fn describe_image(
        &self,
        api_key: &str,
        prompt: VisionPrompt<'_>,
        data_uri: &str,
    ) -> RemoteOutcome<String> {
        let url = format!("{}/chat/completions", self.api_base);

        let request = ChatRequest {
            model: &self.vision_model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ChatContent::Text(prompt.system),
                },
                ChatMessage {
                    role: "user",
                    content: ChatContent::Parts(vec![
                        ContentPart::Text {
                            text: prompt.instruction,
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_uri },
                        },
                    ]),
                },
            ],
        };

        tracing::debug!(model = %self.vision_model, "Sending image to vision model");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RemoteOutcome::TransportError(e.to_string()),
        };

        match read_json::<ChatResponse>(response).await {
            RemoteOutcome::Success(body) => RemoteOutcome::Success(
                body.choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message)
                    .and_then(|m| m.content)
                    .unwrap_or_default(),
            ),
            RemoteOutcome::HttpError { status, body } => RemoteOutcome::HttpError { status, body },
            RemoteOutcome::TransportError(e) => RemoteOutcome::TransportError(e),
        }
    }

    /// Upload audio/video bytes for transcription with `verbose_json` output.
    pub async fn transcribe(
        &self,
        api_key: &str,
        file_name: &str,
        mime_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> RemoteOutcome<Transcription> {
        let url = format!("{}/audio/transcriptions", self.api_base);

        let mut file_part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(mime) = mime_type {
            file_part = match file_part.mime_str(mime) {
                Ok(part) => part,
                Err(e) => return RemoteOutcome::TransportError(format!("mime: {}", e)),
            };
        }

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json");

        tracing::debug!(model = %self.transcription_model, "Sending media to transcription model");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RemoteOutcome::TransportError(e.to_string()),
        };

        read_json::<Transcription>(response).await
    }
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> RemoteOutcome<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return RemoteOutcome::HttpError {
            status: status.as_u16(),
            body,
        };
    }

    match response.json::<T>().await {
        Ok(body) => RemoteOutcome::Success(body),
        Err(e) => RemoteOutcome::TransportError(e.to_string()),
    }
}
