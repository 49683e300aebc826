use async_trait::async_trait;

use super::{NewUser, User, UserRole};
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. `Conflict` if the username or email is taken.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Lookup by username or email (login accepts either).
    async fn find_by_identifier(&self, identifier: &str) -> DomainResult<Option<User>>;

    async fn record_login(&self, id: &str) -> DomainResult<()>;

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;

    /// Top users by points, admins excluded. Ties break by earliest
    /// registration, then id, so the ordering is deterministic.
    async fn leaderboard(&self, limit: u64) -> DomainResult<Vec<User>>;
}
