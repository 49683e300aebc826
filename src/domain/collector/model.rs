//! Collector role request entity

use chrono::{DateTime, Utc};

/// Request lifecycle: `Pending` → `Approved` or `Rejected`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct CollectorRequest {
    pub id: i32,
    pub user_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Pending request joined with the requesting user, for the admin panel
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request: CollectorRequest,
    pub username: String,
    pub email: String,
}
