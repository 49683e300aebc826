//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UserProfileDto;

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "eco_warrior",
    "email": "eco@example.com",
    "password": "secure_password_123"
}))]
pub struct RegisterRequest {
    /// Unique username, 3-50 characters
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    /// Unique email address
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Minimum 8 characters
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Login request; `username` also accepts the email address
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "eco_warrior",
    "password": "secure_password_123"
}))]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful register/login response. Pass the token in the
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserProfileDto,
}
