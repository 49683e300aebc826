use async_trait::async_trait;

use super::model::{CollectorRequest, PendingRequest};
use crate::shared::DomainResult;

#[async_trait]
pub trait CollectorRequestRepository: Send + Sync {
    /// Create a PENDING request. `Conflict` if one is already pending for
    /// this user.
    async fn create(&self, user_id: &str) -> DomainResult<CollectorRequest>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CollectorRequest>>;

    async fn list_pending(&self) -> DomainResult<Vec<PendingRequest>>;

    /// PENDING → APPROVED; promotes the user to collector in the same
    /// transaction. `NotFound` on unknown id, `Conflict` if already resolved.
    async fn approve(&self, id: i32) -> DomainResult<CollectorRequest>;

    /// PENDING → REJECTED. Same error contract as `approve`.
    async fn reject(&self, id: i32) -> DomainResult<CollectorRequest>;
}
