//! File upload extraction endpoint.

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use docsift_extractors::{ExtractedContent, SourceFile};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::API_KEY_HEADER;

/// Multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Extract text from an uploaded file.
/// POST /extract
///
/// Expects a multipart body with a `file` part. The part's filename and
/// content type drive routing. An `X-OpenAI-Key` header overrides the
/// server key for this call.
pub async fn extract_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<ExtractedContent>> {
    let mut upload: Option<SourceFile> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let mut file = SourceFile::new(name, bytes.to_vec());
        if let Some(content_type) = content_type {
            file = file.with_mime_type(content_type);
        }
        upload = Some(file);
        break;
    }

    let file = upload.ok_or_else(|| ApiError::bad_request("Missing multipart field 'file'"))?;

    let request_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());
    let api_key = request_key.unwrap_or_else(|| state.api_key());

    let result = state.pipeline().extract(&file, api_key).await;

    tracing::info!(
        file = %file.name,
        bytes = file.len(),
        chars = result.text.len(),
        warnings = result.warnings.len(),
        "Extraction finished"
    );

    Ok(Json(result))
}
