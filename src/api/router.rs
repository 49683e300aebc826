//! API router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{
    auth, classify, collector_requests, health, rewards, submissions, users, AppState,
};
use crate::auth::{auth_middleware, AuthState};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        health::metrics,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Classification
        classify::classify,
        // Submissions
        submissions::create_submission,
        submissions::list_submissions,
        // Users
        users::my_stats,
        users::leaderboard,
        // Collector requests
        collector_requests::create_request,
        collector_requests::list_pending,
        collector_requests::approve_request,
        collector_requests::reject_request,
        // Rewards
        rewards::list_rewards,
        rewards::create_reward,
        rewards::redeem_reward,
        rewards::list_redemptions,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<SubmissionDto>,
            PaginationParams,
            // Auth
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserProfileDto,
            // Classification / submissions
            ClassificationDto,
            SubmissionResultDto,
            SubmissionDto,
            // Users
            UserStatsDto,
            CategoryCountsDto,
            LeaderboardEntryDto,
            // Collector requests
            CollectorRequestDto,
            PendingRequestDto,
            // Rewards
            RewardDto,
            CreateRewardRequest,
            RedemptionReceiptDto,
            RedemptionDto,
            // Health
            health::HealthStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness check and Prometheus metrics."),
        (name = "Authentication", description = "Registration, login and profile. The token is returned in the `token` field and passed as `Authorization: Bearer <token>`."),
        (name = "Classification", description = "Server-side waste image classification. Results are tagged `remote` (real detection) or `synthetic` (fallback when the detection endpoint is unreachable)."),
        (name = "Submissions", description = "Scored waste drop-offs. Each submission is classified, compared against the declared category, and committed atomically to the user's point ledger."),
        (name = "Users", description = "Per-user stats (points, level, accuracy, per-category counts) and the points leaderboard."),
        (name = "Collector Requests", description = "Workflow for users requesting the collector role. Listing, approval and rejection are admin-only; approval promotes the user in the same step."),
        (name = "Rewards", description = "Reward catalog and point redemption. Redemptions debit the same balance submissions credit."),
    ),
    info(
        title = "EcoSort API",
        version = "1.0.0",
        description = "REST API for the EcoSort waste-segregation rewards service.

## Authentication

Obtain a JWT via `POST /api/v1/auth/register` or `POST /api/v1/auth/login`
and pass it as `Authorization: Bearer <token>`. Everything except
register/login/health/metrics requires it.

## Response format

All responses use the standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

## Pagination

List endpoints take `page` (from 1) and `limit` (default 50, max 100).",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = AuthState {
        jwt_config: state.jwt.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public auth routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(state.clone());

    // Everything behind the JWT middleware
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/classify", post(classify::classify))
        .route(
            "/submissions",
            post(submissions::create_submission).get(submissions::list_submissions),
        )
        .route("/users/me/stats", get(users::my_stats))
        .route("/leaderboard", get(users::leaderboard))
        .route("/collector-requests", post(collector_requests::create_request))
        .route(
            "/collector-requests/pending",
            get(collector_requests::list_pending),
        )
        .route(
            "/collector-requests/{id}/approve",
            post(collector_requests::approve_request),
        )
        .route(
            "/collector-requests/{id}/reject",
            post(collector_requests::reject_request),
        )
        .route(
            "/rewards",
            get(rewards::list_rewards).post(rewards::create_reward),
        )
        .route("/rewards/redemptions", get(rewards::list_redemptions))
        .route("/rewards/{id}/redeem", post(rewards::redeem_reward))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state.clone());

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .with_state(state)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
