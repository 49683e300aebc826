//! User-facing DTOs: profile, stats, leaderboard

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub id: String,
    pub username: String,
    pub email: String,
    /// `user`, `collector` or `admin`
    pub role: String,
    /// Household QR token to print/display for collectors to scan
    pub qr_token: String,
    pub total_points: i32,
    pub level: i32,
}

impl From<&User> for UserProfileDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            qr_token: user.qr_token.clone(),
            total_points: user.total_points,
            level: user.level(),
        }
    }
}

/// Per-category submission counts
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountsDto {
    pub dry: i32,
    pub wet: i32,
    pub hazardous: i32,
}

/// Stats snapshot; level and accuracy are derived from the same read, so the
/// numbers are always mutually consistent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStatsDto {
    pub total_points: i32,
    pub level: i32,
    pub total_submissions: i32,
    pub correct_submissions: i32,
    /// Fraction in [0, 1]; 0 for users with no submissions
    pub accuracy: f64,
    pub category_counts: CategoryCountsDto,
}

impl From<&User> for UserStatsDto {
    fn from(user: &User) -> Self {
        Self {
            total_points: user.total_points,
            level: user.level(),
            total_submissions: user.total_submissions,
            correct_submissions: user.correct_submissions,
            accuracy: user.accuracy(),
            category_counts: CategoryCountsDto {
                dry: user.dry_count,
                wet: user.wet_count,
                hazardous: user.hazardous_count,
            },
        }
    }
}

/// One leaderboard row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// 1-based position
    pub rank: u32,
    pub username: String,
    pub total_points: i32,
    pub level: i32,
}

pub fn leaderboard_rows(users: &[User]) -> Vec<LeaderboardEntryDto> {
    users
        .iter()
        .enumerate()
        .map(|(i, user)| LeaderboardEntryDto {
            rank: (i + 1) as u32,
            username: user.username.clone(),
            total_points: user.total_points,
            level: user.level(),
        })
        .collect()
}
