use chrono::{DateTime, Utc};

use crate::domain::waste::Category;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Collector,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Collector => "collector",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "collector" => Some(Self::Collector),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// Level derived from cumulative points: one level per 100 points,
/// floored at 1 (negative balances do not produce negative levels).
pub fn level_for_points(total_points: i32) -> i32 {
    if total_points < 0 {
        1
    } else {
        total_points / 100 + 1
    }
}

/// User model with running ledger rollups.
///
/// `total_points` and the counters are maintained transactionally by the
/// submission ledger; level and accuracy are always derived so they cannot
/// drift from the totals.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// Household QR token scanned as proof at submission time
    pub qr_token: String,
    pub total_points: i32,
    pub total_submissions: i32,
    pub correct_submissions: i32,
    pub dry_count: i32,
    pub wet_count: i32,
    pub hazardous_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn level(&self) -> i32 {
        level_for_points(self.total_points)
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_submissions == 0 {
            0.0
        } else {
            self.correct_submissions as f64 / self.total_submissions as f64
        }
    }

    pub fn category_count(&self, category: Category) -> i32 {
        match category {
            Category::Dry => self.dry_count,
            Category::Wet => self.wet_count,
            Category::Hazardous => self.hazardous_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_one_per_hundred_points() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(42), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(250), 3);
    }

    #[test]
    fn negative_balances_floor_at_level_one() {
        assert_eq!(level_for_points(-5), 1);
        assert_eq!(level_for_points(-500), 1);
    }
}
