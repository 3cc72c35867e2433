//! Vision OCR and transcription against a local stand-in API.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use docsift_extractors::{ExtractionConfig, ExtractionPipeline, ExtractorFactory, SourceFile};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Captured {
    chat: Arc<Mutex<Option<(String, Value)>>>,
    fields: Arc<Mutex<Vec<(String, Option<String>, String)>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

/// Base URL of a port nobody is listening on.
async fn dead_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}

fn pipeline_for(base: &str) -> ExtractionPipeline {
    ExtractorFactory::pipeline(&ExtractionConfig::default().with_api_base(base))
}

async fn chat_ok(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    *captured.chat.lock().unwrap() = Some((auth, body));
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "INVOICE 42\nTotal: 10.00" } }]
    }))
}

async fn transcribe_ok(State(captured): State<Captured>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        captured
            .fields
            .lock()
            .unwrap()
            .push((name, file_name, String::from_utf8_lossy(&bytes).into_owned()));
    }
    Json(json!({ "text": "  hello from the meeting \n", "duration": 12.5, "language": "english" }))
}

async fn unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, "invalid api key")
}

fn png() -> SourceFile {
    SourceFile::new("scan.png", vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
        .with_mime_type("image/png")
}

fn mp3() -> SourceFile {
    SourceFile::new("standup.mp3", b"ID3fake-audio".to_vec()).with_mime_type("audio/mpeg")
}

#[tokio::test]
async fn test_vision_ocr_success() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/v1/chat/completions", post(chat_ok))
        .with_state(captured.clone());
    let base = serve(router).await;

    let result = pipeline_for(&base).extract(&png(), "sk-test").await;

    assert!(result.is_success(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.text, "INVOICE 42\nTotal: 10.00");
    assert_eq!(result.meta["method"], "vision-ocr");

    let (auth, body) = captured.chat.lock().unwrap().clone().unwrap();
    assert_eq!(auth, "Bearer sk-test");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"][0]["type"], "text");
    assert_eq!(
        body["messages"][1]["content"][1]["image_url"]["url"],
        "data:image/png;base64,iVBORw0KGgo="
    );
}

#[tokio::test]
async fn test_vision_ocr_missing_content_is_empty_text() {
    async fn no_content() -> Json<Value> {
        Json(json!({ "choices": [] }))
    }
    let base = serve(Router::new().route("/v1/chat/completions", post(no_content))).await;

    let result = pipeline_for(&base).extract(&png(), "sk-test").await;
    assert_eq!(result.text, "");
    assert!(result.is_success());
    assert_eq!(result.meta["method"], "vision-ocr");
}

#[tokio::test]
async fn test_vision_ocr_http_error() {
    let base = serve(Router::new().route("/v1/chat/completions", post(unauthorized))).await;

    let result = pipeline_for(&base).extract(&png(), "sk-bad").await;
    assert_eq!(result.text, "");
    assert_eq!(result.warnings, vec!["Vision OCR failed: 401 - invalid api key"]);
}

#[tokio::test]
async fn test_vision_ocr_network_failure() {
    let base = dead_base().await;

    let result = pipeline_for(&base).extract(&png(), "sk-test").await;
    assert_eq!(result.text, "");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Vision OCR error: "));
    assert!(result.warnings[0].len() > "Vision OCR error: ".len());
}

async fn chat_slow() -> Json<Value> {
    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    Json(json!({ "choices": [] }))
}

#[tokio::test]
async fn test_configured_timeout_bounds_remote_calls() {
    let router = Router::new().route("/v1/chat/completions", post(chat_slow));
    let base = serve(router).await;
    let config = ExtractionConfig::default()
        .with_api_base(&base)
        .with_request_timeout_secs(1);
    let pipeline = ExtractorFactory::pipeline(&config);

    let started = std::time::Instant::now();
    let result = pipeline.extract(&png(), "sk-test").await;

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(result.text, "");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Vision OCR error: "), "{:?}", result.warnings);
}

#[tokio::test]
async fn test_transcription_success() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/v1/audio/transcriptions", post(transcribe_ok))
        .with_state(captured.clone());
    let base = serve(router).await;

    let result = pipeline_for(&base).extract(&mp3(), "sk-test").await;

    assert!(result.is_success(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.text, "hello from the meeting");
    assert_eq!(result.meta["duration"], 12.5);
    assert_eq!(result.meta["method"], "whisper");

    let fields = captured.fields.lock().unwrap().clone();
    let field = |name: &str| fields.iter().find(|(n, _, _)| n == name).cloned().unwrap();
    assert_eq!(field("file").1.as_deref(), Some("standup.mp3"));
    assert_eq!(field("file").2, "ID3fake-audio");
    assert_eq!(field("model").2, "whisper-1");
    assert_eq!(field("response_format").2, "verbose_json");
}

#[tokio::test]
async fn test_transcription_http_error() {
    async fn overloaded() -> impl IntoResponse {
        (StatusCode::SERVICE_UNAVAILABLE, "try later")
    }
    let base = serve(Router::new().route("/v1/audio/transcriptions", post(overloaded))).await;

    let file = SourceFile::new("clip.mp4", b"fake-video".to_vec()).with_mime_type("video/mp4");
    let result = pipeline_for(&base).extract(&file, "sk-test").await;
    assert_eq!(result.text, "");
    assert_eq!(result.warnings, vec!["Transcription failed: 503 - try later"]);
}

#[tokio::test]
async fn test_transcription_network_failure() {
    let base = dead_base().await;

    let result = pipeline_for(&base).extract(&mp3(), "sk-test").await;
    assert_eq!(result.text, "");
    assert!(result.warnings[0].starts_with("Transcription error: "));
}
