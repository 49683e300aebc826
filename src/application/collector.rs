//! Collector role workflow
//!
//! Users ask to become collectors; an admin approves or rejects. Approval
//! promotes the user's role in the same transaction that resolves the
//! request, so the two can never disagree.

use std::sync::Arc;

use tracing::info;

use crate::domain::collector::{CollectorRequest, PendingRequest};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRole;
use crate::shared::{DomainError, DomainResult};

pub struct CollectorService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CollectorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// File a collector role request for `user_id`.
    pub async fn request_role(&self, user_id: &str) -> DomainResult<CollectorRequest> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", "id", user_id))?;

        if user.role != UserRole::User {
            return Err(DomainError::Conflict(format!(
                "user already has role {}",
                user.role.as_str()
            )));
        }

        let request = self.repos.collector_requests().create(user_id).await?;
        info!(user_id, request_id = request.id, "collector role requested");
        Ok(request)
    }

    pub async fn list_pending(&self) -> DomainResult<Vec<PendingRequest>> {
        self.repos.collector_requests().list_pending().await
    }

    /// Approve a pending request and promote the user to collector.
    pub async fn approve(&self, request_id: i32) -> DomainResult<CollectorRequest> {
        let request = self.repos.collector_requests().approve(request_id).await?;
        info!(request_id, user_id = %request.user_id, "collector request approved");
        Ok(request)
    }

    pub async fn reject(&self, request_id: i32) -> DomainResult<CollectorRequest> {
        let request = self.repos.collector_requests().reject(request_id).await?;
        info!(request_id, user_id = %request.user_id, "collector request rejected");
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collector::RequestStatus;
    use crate::domain::user::{NewUser, User, UserRepository};
    use crate::infrastructure::MemoryStore;

    async fn seed_user(repos: &MemoryStore, username: &str) -> User {
        repos
            .users()
            .create(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "hash".to_string(),
                role: UserRole::User,
                qr_token: format!("QR-{username}"),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn second_pending_request_is_a_conflict() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;

        service.request_role(&user.id).await.unwrap();
        let err = service.request_role(&user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn approval_promotes_the_user() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;

        let request = service.request_role(&user.id).await.unwrap();
        let resolved = service.approve(request.id).await.unwrap();
        assert_eq!(resolved.status, RequestStatus::Approved);
        assert!(resolved.resolved_at.is_some());

        let promoted = repos.users().find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(promoted.role, UserRole::Collector);
    }

    #[tokio::test]
    async fn resolving_twice_is_a_conflict() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;

        let request = service.request_role(&user.id).await.unwrap();
        service.approve(request.id).await.unwrap();

        assert!(matches!(
            service.approve(request.id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            service.reject(request.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn rejection_leaves_the_role_unchanged_and_allows_retry() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;

        let request = service.request_role(&user.id).await.unwrap();
        let resolved = service.reject(request.id).await.unwrap();
        assert_eq!(resolved.status, RequestStatus::Rejected);

        let unchanged = repos.users().find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(unchanged.role, UserRole::User);

        // A rejected request is terminal, so the user may file a new one.
        assert!(service.request_role(&user.id).await.is_ok());
    }

    #[tokio::test]
    async fn existing_collectors_cannot_refile() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;

        let request = service.request_role(&user.id).await.unwrap();
        service.approve(request.id).await.unwrap();

        assert!(matches!(
            service.request_role(&user.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn pending_list_carries_user_details() {
        let repos = Arc::new(MemoryStore::new());
        let service = CollectorService::new(Arc::clone(&repos) as _);
        let user = seed_user(&repos, "asha").await;
        service.request_role(&user.id).await.unwrap();

        let pending = service.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].username, "asha");
        assert_eq!(pending[0].request.status, RequestStatus::Pending);
    }
}
