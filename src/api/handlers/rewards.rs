//! Reward catalog and redemption handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::dto::{
    ApiError, ApiResponse, CreateRewardRequest, RedemptionDto, RedemptionReceiptDto, RewardDto,
    ValidatedJson,
};
use crate::auth::AuthenticatedUser;
use crate::domain::reward::RewardCatalogEntry;

use super::AppState;

/// Reward catalog, cheapest first
#[utoipa::path(
    get,
    path = "/api/v1/rewards",
    tag = "Rewards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog entries", body = ApiResponse<Vec<RewardDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_rewards(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RewardDto>>>, ApiError> {
    let catalog = state.rewards.catalog().await?;
    let items = catalog.iter().map(RewardDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Redeem a reward, spending points
#[utoipa::path(
    post,
    path = "/api/v1/rewards/{id}/redeem",
    tag = "Rewards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reward id")),
    responses(
        (status = 200, description = "Redeemed; points debited", body = ApiResponse<RedemptionReceiptDto>),
        (status = 400, description = "Insufficient points or reward unavailable"),
        (status = 404, description = "No such reward"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn redeem_reward(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RedemptionReceiptDto>>, ApiError> {
    let receipt = state.rewards.redeem(&auth.user_id, id).await?;
    Ok(Json(ApiResponse::success(RedemptionReceiptDto::from(
        &receipt,
    ))))
}

/// Own redemption history, newest first
#[utoipa::path(
    get,
    path = "/api/v1/rewards/redemptions",
    tag = "Rewards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Past redemptions", body = ApiResponse<Vec<RedemptionDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_redemptions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<RedemptionDto>>>, ApiError> {
    let redemptions = state.rewards.redemptions(&auth.user_id).await?;
    let items = redemptions.iter().map(RedemptionDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Add a catalog entry (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/rewards",
    tag = "Rewards",
    security(("bearer_auth" = [])),
    request_body = CreateRewardRequest,
    responses(
        (status = 200, description = "Entry created", body = ApiResponse<RewardDto>),
        (status = 403, description = "Admin role required"),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_reward(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRewardRequest>,
) -> Result<Json<ApiResponse<RewardDto>>, ApiError> {
    auth.require_admin()?;
    let entry = state
        .rewards
        .add_catalog_entry(RewardCatalogEntry {
            id: 0,
            title: request.title,
            description: request.description,
            cost_points: request.cost_points,
            category: request.category,
            is_available: true,
        })
        .await?;
    Ok(Json(ApiResponse::success(RewardDto::from(&entry))))
}
