//! Classification preview handler
//!
//! The mobile app never talks to the detection endpoint directly; it uploads
//! the image here so the detection API key stays server-side.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::dto::{ApiError, ApiResponse, ClassificationDto};
use crate::shared::DomainError;

use super::AppState;

pub(super) struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Pull the `image` part out of a multipart body.
pub(super) async fn read_image_field(
    multipart: &mut Multipart,
) -> Result<Option<ImageUpload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload.jpg").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| DomainError::Validation(format!("failed to read image: {e}")))?;
            if bytes.is_empty() {
                return Err(DomainError::Validation("image is empty".to_string()).into());
            }
            return Ok(Some(ImageUpload {
                bytes: bytes.to_vec(),
                filename,
            }));
        }
    }
    Ok(None)
}

/// Classify a waste image
///
/// Runs the detection backend (with retry) and returns the mapped category.
/// Falls back to a synthetic result tagged `source: "synthetic"` when the
/// backend is unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/classify",
    tag = "Classification",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Classification result", body = ApiResponse<ClassificationDto>),
        (status = 400, description = "Missing or empty image part"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn classify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ClassificationDto>>, ApiError> {
    let upload = read_image_field(&mut multipart)
        .await?
        .ok_or_else(|| DomainError::Validation("missing 'image' part".to_string()))?;

    let classification = state
        .classifier
        .classify(upload.bytes, &upload.filename)
        .await;
    Ok(Json(ApiResponse::success(ClassificationDto::from(
        &classification,
    ))))
}
