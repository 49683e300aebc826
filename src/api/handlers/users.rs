//! User stats and leaderboard handlers

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::dto::{leaderboard_rows, ApiError, ApiResponse, LeaderboardEntryDto, UserStatsDto};
use crate::auth::AuthenticatedUser;

use super::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct LeaderboardParams {
    /// Number of rows to return (1-100). Default: 10
    #[serde(default = "default_leaderboard_limit")]
    pub limit: u64,
}

fn default_leaderboard_limit() -> u64 {
    10
}

/// Current user's aggregate stats
///
/// Points, level, accuracy and per-category counts, all derived from one
/// consistent read.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/stats",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stats snapshot", body = ApiResponse<UserStatsDto>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn my_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserStatsDto>>, ApiError> {
    let user = state.ledger.stats(&auth.user_id).await?;
    Ok(Json(ApiResponse::success(UserStatsDto::from(&user))))
}

/// Leaderboard: top users by points, admins excluded
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked rows", body = ApiResponse<Vec<LeaderboardEntryDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>, ApiError> {
    let users = state.ledger.leaderboard(params.limit).await?;
    Ok(Json(ApiResponse::success(leaderboard_rows(&users))))
}
