//! SeaORM implementation of SubmissionRepository
//!
//! `append` runs in a database transaction so the submission row and the
//! user's rollups commit together; readers never see one without the other.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::submission::{Committed, NewSubmission, SubmissionRepository, WasteSubmission};
use crate::domain::user::level_for_points;
use crate::domain::waste::{Category, ClassificationSource};
use crate::shared::{DomainError, DomainResult, PaginatedResult};

use super::super::entities::{submission, user};
use super::user_repository::db_err;

pub struct SeaOrmSubmissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: submission::Model) -> DomainResult<WasteSubmission> {
    let predicted = Category::parse(&m.predicted_category).ok_or_else(|| {
        DomainError::Validation(format!("invalid category in store: {}", m.predicted_category))
    })?;
    let declared = Category::parse(&m.declared_category).ok_or_else(|| {
        DomainError::Validation(format!("invalid category in store: {}", m.declared_category))
    })?;
    let source =
        ClassificationSource::parse(&m.source).unwrap_or(ClassificationSource::Remote);

    Ok(WasteSubmission {
        id: m.id,
        user_id: m.user_id,
        collector_id: m.collector_id,
        waste_label: m.waste_label,
        predicted_category: predicted,
        declared_category: declared,
        confidence: m.confidence,
        points_earned: m.points_earned,
        source,
        qr_token: m.qr_token,
        image_ref: m.image_ref,
        submitted_at: m.submitted_at,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn append(&self, new: NewSubmission) -> DomainResult<Committed> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let user_model = user::Entity::find_by_id(&new.user_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("user", "id", &new.user_id))?;

        let is_correct = new.predicted_category == new.declared_category;

        let row = submission::ActiveModel {
            user_id: Set(new.user_id.clone()),
            collector_id: Set(new.collector_id),
            waste_label: Set(new.waste_label),
            predicted_category: Set(new.predicted_category.as_str().to_string()),
            declared_category: Set(new.declared_category.as_str().to_string()),
            confidence: Set(new.confidence),
            points_earned: Set(new.points_earned),
            source: Set(new.source.as_str().to_string()),
            qr_token: Set(new.qr_token),
            image_ref: Set(new.image_ref),
            submitted_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = row.insert(&txn).await.map_err(db_err)?;

        let new_total = user_model.total_points + new.points_earned;

        let mut active: user::ActiveModel = user_model.clone().into();
        active.total_points = Set(new_total);
        active.total_submissions = Set(user_model.total_submissions + 1);
        if is_correct {
            active.correct_submissions = Set(user_model.correct_submissions + 1);
        }
        match new.predicted_category {
            Category::Dry => active.dry_count = Set(user_model.dry_count + 1),
            Category::Wet => active.wet_count = Set(user_model.wet_count + 1),
            Category::Hazardous => {
                active.hazardous_count = Set(user_model.hazardous_count + 1)
            }
        }
        active.updated_at = Set(Utc::now());
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok(Committed {
            submission_id: inserted.id,
            points_earned: new.points_earned,
            new_total_points: new_total,
            new_level: level_for_points(new_total),
        })
    }

    async fn history_for_user(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<WasteSubmission>> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let query = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id))
            .order_by_desc(submission::Column::SubmittedAt)
            .order_by_desc(submission::Column::Id);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        // Widen before multiplying; `page` is attacker-controlled input.
        let offset = (page as u64 - 1) * limit as u64;
        let models = query
            .offset(offset)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total, page, limit))
    }
}
