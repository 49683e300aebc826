//! Waste submission handlers

use axum::extract::{Multipart, Query, State};
use axum::{Extension, Json};

use crate::api::dto::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, SubmissionDto, SubmissionResultDto,
};
use crate::application::SubmitCommand;
use crate::auth::AuthenticatedUser;
use crate::domain::waste::Category;
use crate::shared::DomainError;

use super::classify::{read_image_field, ImageUpload};
use super::AppState;

struct SubmissionForm {
    image: ImageUpload,
    declared_category: Category,
    qr_token: String,
}

/// The classification runs server-side on the uploaded image, so clients
/// cannot submit a forged prediction or confidence.
async fn parse_submission_form(multipart: &mut Multipart) -> Result<SubmissionForm, ApiError> {
    let mut image = None;
    let mut declared = None;
    let mut qr_token = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload.jpg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::Validation(format!("failed to read image: {e}")))?;
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    filename,
                });
            }
            Some("declared_category") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| DomainError::Validation(e.to_string()))?;
                declared = Some(Category::parse(&text).ok_or_else(|| {
                    DomainError::Validation(format!(
                        "declared_category must be one of dry, wet, hazardous; got '{text}'"
                    ))
                })?);
            }
            Some("qr_token") => {
                qr_token = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| DomainError::Validation(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let image = image
        .filter(|u| !u.bytes.is_empty())
        .ok_or_else(|| DomainError::Validation("missing 'image' part".to_string()))?;
    let declared_category = declared
        .ok_or_else(|| DomainError::Validation("missing 'declared_category' part".to_string()))?;
    let qr_token =
        qr_token.ok_or_else(|| DomainError::Validation("missing 'qr_token' part".to_string()))?;

    Ok(SubmissionForm {
        image,
        declared_category,
        qr_token,
    })
}

/// Submit a classified waste drop-off
///
/// Multipart form: `image` (file), `declared_category` (`dry`/`wet`/
/// `hazardous`), `qr_token` (the scanned household token). The image is
/// classified server-side, scored against the declared category, and the
/// result is committed atomically to the submitter's ledger.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    tag = "Submissions",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Submission committed", body = ApiResponse<SubmissionResultDto>),
        (status = 400, description = "Missing form parts or empty QR token"),
        (status = 403, description = "QR token belongs to a different user"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SubmissionResultDto>>, ApiError> {
    let form = parse_submission_form(&mut multipart).await?;

    let classification = state
        .classifier
        .classify(form.image.bytes, &form.image.filename)
        .await;
    let is_correct = classification.category == form.declared_category;

    let committed = state
        .ledger
        .submit(SubmitCommand {
            user_id: auth.user_id.clone(),
            declared_category: form.declared_category,
            classification: classification.clone(),
            qr_token: form.qr_token,
            collector_id: None,
            image_ref: Some(form.image.filename),
        })
        .await?;

    Ok(Json(ApiResponse::success(SubmissionResultDto::new(
        &committed,
        &classification,
        is_correct,
    ))))
}

/// Own submission history, newest first
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    tag = "Submissions",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of history", body = ApiResponse<PaginatedResponse<SubmissionDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<SubmissionDto>>>, ApiError> {
    let page = state
        .ledger
        .history(&auth.user_id, params.page, params.limit)
        .await?;

    let items: Vec<SubmissionDto> = page.items.iter().map(SubmissionDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, page.total, page.page, page.limit,
    ))))
}
