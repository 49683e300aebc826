//! Waste submission domain entity

use chrono::{DateTime, Utc};

use crate::domain::waste::{Category, ClassificationSource};

/// Immutable record of one scored classification event. Append-only; never
/// mutated or deleted.
#[derive(Debug, Clone)]
pub struct WasteSubmission {
    pub id: i32,
    /// Submitting user
    pub user_id: String,
    /// Collector who verified the drop-off, if any
    pub collector_id: Option<String>,
    /// Normalized waste kind, e.g. `plastic_bottle`
    pub waste_label: String,
    pub predicted_category: Category,
    pub declared_category: Category,
    pub confidence: f64,
    /// Signed point delta applied to the user's total
    pub points_earned: i32,
    pub source: ClassificationSource,
    /// QR token scanned as proof of location/identity
    pub qr_token: String,
    pub image_ref: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl WasteSubmission {
    pub fn is_correct(&self) -> bool {
        self.predicted_category == self.declared_category
    }
}
