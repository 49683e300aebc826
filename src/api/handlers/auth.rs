//! Authentication handlers

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::dto::{
    ApiError, ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserProfileDto,
    ValidatedJson,
};
use crate::auth::AuthenticatedUser;

use super::AppState;

fn auth_response(state: &AppState, session: crate::application::AuthenticatedSession) -> AuthResponse {
    AuthResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expiration_hours * 3600,
        user: UserProfileDto::from(&session.user),
    }
}

/// Register a new household account
///
/// Returns a JWT token and the generated household QR token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let session = state
        .identity
        .register(&request.username, &request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(auth_response(&state, session))))
}

/// Log in with username or email
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let session = state
        .identity
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(auth_response(&state, session))))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserProfileDto>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserProfileDto>>, ApiError> {
    let user = state.identity.profile(&auth.user_id).await?;
    Ok(Json(ApiResponse::success(UserProfileDto::from(&user))))
}
