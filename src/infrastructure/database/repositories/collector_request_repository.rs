//! SeaORM implementation of CollectorRequestRepository
//!
//! Approval touches two tables (request status + user role) and therefore
//! runs in a database transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::collector::{
    CollectorRequest, CollectorRequestRepository, PendingRequest, RequestStatus,
};
use crate::shared::{DomainError, DomainResult};

use super::super::entities::{collector_request, user};
use super::user_repository::db_err;

pub struct SeaOrmCollectorRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmCollectorRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: collector_request::Model) -> CollectorRequest {
    CollectorRequest {
        id: m.id,
        user_id: m.user_id,
        status: RequestStatus::parse(&m.status).unwrap_or(RequestStatus::Pending),
        created_at: m.created_at,
        resolved_at: m.resolved_at,
    }
}

impl SeaOrmCollectorRequestRepository {
    /// Shared PENDING → terminal transition; promotes the user on approval.
    async fn resolve(&self, id: i32, status: RequestStatus) -> DomainResult<CollectorRequest> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = collector_request::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("collector request", "id", id.to_string()))?;

        let current = RequestStatus::parse(&model.status).unwrap_or(RequestStatus::Pending);
        if current.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "request {} already resolved as {}",
                id,
                current.as_str()
            )));
        }

        let user_id = model.user_id.clone();

        let mut active: collector_request::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.resolved_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await.map_err(db_err)?;

        if status == RequestStatus::Approved {
            let user_model = user::Entity::find_by_id(&user_id)
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or_else(|| DomainError::not_found("user", "id", &user_id))?;

            let mut active_user: user::ActiveModel = user_model.into();
            active_user.role = Set(user::UserRole::Collector);
            active_user.updated_at = Set(Utc::now());
            active_user.update(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(model_to_domain(updated))
    }
}

#[async_trait]
impl CollectorRequestRepository for SeaOrmCollectorRequestRepository {
    async fn create(&self, user_id: &str) -> DomainResult<CollectorRequest> {
        let pending = collector_request::Entity::find()
            .filter(collector_request::Column::UserId.eq(user_id))
            .filter(collector_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if pending.is_some() {
            return Err(DomainError::Conflict(
                "a collector request is already pending for this user".to_string(),
            ));
        }

        let row = collector_request::ActiveModel {
            user_id: Set(user_id.to_string()),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            resolved_at: Set(None),
            ..Default::default()
        };

        let inserted = row.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CollectorRequest>> {
        let model = collector_request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_pending(&self) -> DomainResult<Vec<PendingRequest>> {
        let rows = collector_request::Entity::find()
            .filter(collector_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .order_by_asc(collector_request::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut pending = Vec::with_capacity(rows.len());
        for (request, maybe_user) in rows {
            let user = maybe_user.ok_or_else(|| {
                DomainError::not_found("user", "id", request.user_id.clone())
            })?;
            pending.push(PendingRequest {
                request: model_to_domain(request),
                username: user.username,
                email: user.email,
            });
        }
        Ok(pending)
    }

    async fn approve(&self, id: i32) -> DomainResult<CollectorRequest> {
        self.resolve(id, RequestStatus::Approved).await
    }

    async fn reject(&self, id: i32) -> DomainResult<CollectorRequest> {
        self.resolve(id, RequestStatus::Rejected).await
    }
}
