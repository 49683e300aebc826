//! Submission and classification DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::submission::{Committed, WasteSubmission};
use crate::domain::waste::Classification;

/// Classification result returned by `/classify` and embedded in committed
/// submissions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassificationDto {
    /// Normalized waste kind, e.g. `plastic_bottle`
    pub label: String,
    /// Raw detector class
    pub detected_object: String,
    /// `dry`, `wet` or `hazardous`
    pub category: String,
    pub confidence: f64,
    /// `remote` or `synthetic`
    pub source: String,
}

impl From<&Classification> for ClassificationDto {
    fn from(c: &Classification) -> Self {
        Self {
            label: c.label.clone(),
            detected_object: c.detected_object.clone(),
            category: c.category.as_str().to_string(),
            confidence: c.confidence,
            source: c.source.as_str().to_string(),
        }
    }
}

/// Outcome of a committed submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResultDto {
    pub submission_id: i32,
    /// Signed point delta for this submission
    pub points_earned: i32,
    pub new_total_points: i32,
    pub new_level: i32,
    pub classification: ClassificationDto,
    /// Whether the declared category matched the prediction
    pub is_correct: bool,
}

impl SubmissionResultDto {
    pub fn new(committed: &Committed, classification: &Classification, is_correct: bool) -> Self {
        Self {
            submission_id: committed.submission_id,
            points_earned: committed.points_earned,
            new_total_points: committed.new_total_points,
            new_level: committed.new_level,
            classification: classification.into(),
            is_correct,
        }
    }
}

/// One history entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDto {
    pub id: i32,
    pub waste_label: String,
    pub predicted_category: String,
    pub declared_category: String,
    pub confidence: f64,
    pub points_earned: i32,
    pub is_correct: bool,
    pub source: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&WasteSubmission> for SubmissionDto {
    fn from(s: &WasteSubmission) -> Self {
        Self {
            id: s.id,
            waste_label: s.waste_label.clone(),
            predicted_category: s.predicted_category.as_str().to_string(),
            declared_category: s.declared_category.as_str().to_string(),
            confidence: s.confidence,
            points_earned: s.points_earned,
            is_correct: s.is_correct(),
            source: s.source.as_str().to_string(),
            submitted_at: s.submitted_at,
        }
    }
}
