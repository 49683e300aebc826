//! Collector role request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::collector::{CollectorRequest, PendingRequest};

/// Collector role request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CollectorRequestDto {
    pub id: i32,
    pub user_id: String,
    /// `PENDING`, `APPROVED` or `REJECTED`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<&CollectorRequest> for CollectorRequestDto {
    fn from(r: &CollectorRequest) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id.clone(),
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
            resolved_at: r.resolved_at,
        }
    }
}

/// Pending request with requester details for the admin review list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PendingRequestDto {
    pub id: i32,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&PendingRequest> for PendingRequestDto {
    fn from(p: &PendingRequest) -> Self {
        Self {
            id: p.request.id,
            user_id: p.request.user_id.clone(),
            username: p.username.clone(),
            email: p.email.clone(),
            created_at: p.request.created_at,
        }
    }
}
