use async_trait::async_trait;

use super::model::WasteSubmission;
use crate::domain::waste::{Category, ClassificationSource};
use crate::shared::{DomainResult, PaginatedResult};

/// A submission ready to be committed; `points_earned` has already been
/// computed by the scoring engine.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: String,
    pub collector_id: Option<String>,
    pub waste_label: String,
    pub predicted_category: Category,
    pub declared_category: Category,
    pub confidence: f64,
    pub points_earned: i32,
    pub source: ClassificationSource,
    pub qr_token: String,
    pub image_ref: Option<String>,
}

/// Outcome of an atomically applied submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub submission_id: i32,
    pub points_earned: i32,
    pub new_total_points: i32,
    pub new_level: i32,
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Append the submission and apply its rollups (total points, counters)
    /// to the user in one transaction: readers see the record and the new
    /// total together or not at all.
    async fn append(&self, submission: NewSubmission) -> DomainResult<Committed>;

    /// Newest-first history slice for one user.
    async fn history_for_user(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<WasteSubmission>>;
}
