//! Collector role request handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::dto::{ApiError, ApiResponse, CollectorRequestDto, PendingRequestDto};
use crate::auth::AuthenticatedUser;

use super::AppState;

/// Request the collector role
///
/// At most one pending request per user; a second one returns 409.
#[utoipa::path(
    post,
    path = "/api/v1/collector-requests",
    tag = "Collector Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request filed", body = ApiResponse<CollectorRequestDto>),
        (status = 409, description = "Already pending, or user is already a collector"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<CollectorRequestDto>>, ApiError> {
    let request = state.collector.request_role(&auth.user_id).await?;
    Ok(Json(ApiResponse::success(CollectorRequestDto::from(
        &request,
    ))))
}

/// Pending requests awaiting review (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/collector-requests/pending",
    tag = "Collector Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending requests, oldest first", body = ApiResponse<Vec<PendingRequestDto>>),
        (status = 403, description = "Admin role required"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<PendingRequestDto>>>, ApiError> {
    auth.require_admin()?;
    let pending = state.collector.list_pending().await?;
    let items = pending.iter().map(PendingRequestDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Approve a pending request and promote the user (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/collector-requests/{id}/approve",
    tag = "Collector Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request id")),
    responses(
        (status = 200, description = "Approved; user is now a collector", body = ApiResponse<CollectorRequestDto>),
        (status = 409, description = "Request already resolved"),
        (status = 404, description = "No such request"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn approve_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CollectorRequestDto>>, ApiError> {
    auth.require_admin()?;
    let request = state.collector.approve(id).await?;
    Ok(Json(ApiResponse::success(CollectorRequestDto::from(
        &request,
    ))))
}

/// Reject a pending request (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/collector-requests/{id}/reject",
    tag = "Collector Requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request id")),
    responses(
        (status = 200, description = "Rejected; the user may file again", body = ApiResponse<CollectorRequestDto>),
        (status = 409, description = "Request already resolved"),
        (status = 404, description = "No such request"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CollectorRequestDto>>, ApiError> {
    auth.require_admin()?;
    let request = state.collector.reject(id).await?;
    Ok(Json(ApiResponse::success(CollectorRequestDto::from(
        &request,
    ))))
}
