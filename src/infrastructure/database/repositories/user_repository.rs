//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::user::{NewUser, User, UserRepository, UserRole};
use crate::shared::{DomainError, DomainResult};

use super::super::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Collector => UserRole::Collector,
        user::UserRole::Admin => UserRole::Admin,
    }
}

pub(crate) fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Collector => user::UserRole::Collector,
        UserRole::Admin => user::UserRole::Admin,
    }
}

pub(crate) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        qr_token: model.qr_token,
        total_points: model.total_points,
        total_submissions: model.total_submissions,
        correct_submissions: model.correct_submissions,
        dry_count: model.dry_count,
        wet_count: model.wet_count,
        hazardous_count: model.hazardous_count,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::ExternalService(format!("Database error: {}", e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let model = user::ActiveModel {
            id: Set(id),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(domain_role_to_entity(new.role)),
            qr_token: Set(new.qr_token),
            total_points: Set(0),
            total_submissions: Set(0),
            correct_submissions: Set(0),
            dry_count: Set(0),
            wet_count: Set(0),
            hazardous_count: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict("Username or email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_identifier(&self, identifier: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(
                user::Column::Username
                    .eq(identifier)
                    .or(user::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("user", "id", id))?;

        let mut active: user::ActiveModel = model.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<()> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("user", "id", id))?;

        let mut active: user::ActiveModel = model.into();
        active.role = Set(domain_role_to_entity(role));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn leaderboard(&self, limit: u64) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Role.ne(user::UserRole::Admin))
            .order_by_desc(user::Column::TotalPoints)
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }
}
