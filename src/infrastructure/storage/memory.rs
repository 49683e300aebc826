//! In-memory repository provider for development and testing
//!
//! One coarse async mutex guards the whole state, so every operation is
//! trivially atomic — the same visibility guarantees the SeaORM provider
//! gets from database transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::collector::{
    CollectorRequest, CollectorRequestRepository, PendingRequest, RequestStatus,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reward::{
    RedemptionReceipt, RewardCatalogEntry, RewardRedemption, RewardRepository,
};
use crate::domain::submission::{Committed, NewSubmission, SubmissionRepository, WasteSubmission};
use crate::domain::user::{level_for_points, NewUser, User, UserRepository, UserRole};
use crate::domain::waste::Category;
use crate::shared::{DomainError, DomainResult, PaginatedResult};

#[derive(Default)]
struct State {
    users: HashMap<String, User>,
    submissions: Vec<WasteSubmission>,
    requests: Vec<CollectorRequest>,
    rewards: Vec<RewardCatalogEntry>,
    redemptions: Vec<RewardRedemption>,
    submission_counter: i32,
    request_counter: i32,
    reward_counter: i32,
    redemption_counter: i32,
}

pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new: NewUser) -> DomainResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|u| u.username == new.username || u.email == new.email)
        {
            return Err(DomainError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            qr_token: new.qr_token,
            total_points: 0,
            total_submissions: 0,
            correct_submissions: 0,
            dry_count: 0,
            wet_count: 0,
            hazardous_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.state.lock().await.users.get(id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> DomainResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("user", "id", id))?;
        user.last_login_at = Some(Utc::now());
        Ok(())
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("user", "id", id))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().await.users.len() as u64)
    }

    async fn leaderboard(&self, limit: u64) -> DomainResult<Vec<User>> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|u| u.role != UserRole::Admin)
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        users.truncate(limit as usize);
        Ok(users)
    }
}

#[async_trait]
impl SubmissionRepository for MemoryStore {
    async fn append(&self, new: NewSubmission) -> DomainResult<Committed> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&new.user_id) {
            return Err(DomainError::not_found("user", "id", &new.user_id));
        }

        state.submission_counter += 1;
        let id = state.submission_counter;
        let is_correct = new.predicted_category == new.declared_category;

        let submission = WasteSubmission {
            id,
            user_id: new.user_id.clone(),
            collector_id: new.collector_id,
            waste_label: new.waste_label,
            predicted_category: new.predicted_category,
            declared_category: new.declared_category,
            confidence: new.confidence,
            points_earned: new.points_earned,
            source: new.source,
            qr_token: new.qr_token,
            image_ref: new.image_ref,
            submitted_at: Utc::now(),
        };
        state.submissions.push(submission);

        let user = state
            .users
            .get_mut(&new.user_id)
            .ok_or_else(|| DomainError::not_found("user", "id", new.user_id.clone()))?;
        user.total_points += new.points_earned;
        user.total_submissions += 1;
        if is_correct {
            user.correct_submissions += 1;
        }
        match new.predicted_category {
            Category::Dry => user.dry_count += 1,
            Category::Wet => user.wet_count += 1,
            Category::Hazardous => user.hazardous_count += 1,
        }
        user.updated_at = Utc::now();
        let new_total = user.total_points;

        Ok(Committed {
            submission_id: id,
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

        let state = self.state.lock().await;
        let mut items: Vec<WasteSubmission> = state
            .submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));

        let total = items.len() as u64;
        // Widen before multiplying; `page` is attacker-controlled input.
        let start = (page as u64 - 1) * limit as u64;
        let items = items
            .into_iter()
            .skip(start as usize)
            .take(limit as usize)
            .collect();

        Ok(PaginatedResult::new(items, total, page, limit))
    }
}

#[async_trait]
impl CollectorRequestRepository for MemoryStore {
    async fn create(&self, user_id: &str) -> DomainResult<CollectorRequest> {
        let mut state = self.state.lock().await;

        if state
            .requests
            .iter()
            .any(|r| r.user_id == user_id && r.status == RequestStatus::Pending)
        {
            return Err(DomainError::Conflict(
                "a collector request is already pending for this user".to_string(),
            ));
        }

        state.request_counter += 1;
        let request = CollectorRequest {
            id: state.request_counter,
            user_id: user_id.to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };
        state.requests.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CollectorRequest>> {
        Ok(self
            .state
            .lock()
            .await
            .requests
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_pending(&self) -> DomainResult<Vec<PendingRequest>> {
        let state = self.state.lock().await;
        let mut pending = Vec::new();
        for request in state
            .requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
        {
            let user = state
                .users
                .get(&request.user_id)
                .ok_or_else(|| DomainError::not_found("user", "id", request.user_id.clone()))?;
            pending.push(PendingRequest {
                request: request.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
            });
        }
        pending.sort_by(|a, b| a.request.created_at.cmp(&b.request.created_at));
        Ok(pending)
    }

    async fn approve(&self, id: i32) -> DomainResult<CollectorRequest> {
        let mut state = self.state.lock().await;
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("collector request", "id", id.to_string()))?;

        if request.status.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "request {} already resolved as {}",
                id,
                request.status.as_str()
            )));
        }

        request.status = RequestStatus::Approved;
        request.resolved_at = Some(Utc::now());
        let resolved = request.clone();

        let user = state
            .users
            .get_mut(&resolved.user_id)
            .ok_or_else(|| DomainError::not_found("user", "id", resolved.user_id.clone()))?;
        user.role = UserRole::Collector;
        user.updated_at = Utc::now();

        Ok(resolved)
    }

    async fn reject(&self, id: i32) -> DomainResult<CollectorRequest> {
        let mut state = self.state.lock().await;
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("collector request", "id", id.to_string()))?;

        if request.status.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "request {} already resolved as {}",
                id,
                request.status.as_str()
            )));
        }

        request.status = RequestStatus::Rejected;
        request.resolved_at = Some(Utc::now());
        Ok(request.clone())
    }
}

#[async_trait]
impl RewardRepository for MemoryStore {
    async fn list(&self) -> DomainResult<Vec<RewardCatalogEntry>> {
        let state = self.state.lock().await;
        let mut rewards = state.rewards.clone();
        rewards.sort_by_key(|r| r.cost_points);
        Ok(rewards)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RewardCatalogEntry>> {
        Ok(self
            .state
            .lock()
            .await
            .rewards
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn redeem(&self, user_id: &str, reward_id: i32) -> DomainResult<RedemptionReceipt> {
        let mut state = self.state.lock().await;

        let reward = state
            .rewards
            .iter()
            .find(|r| r.id == reward_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("reward", "id", reward_id.to_string()))?;

        if !reward.is_available {
            return Err(DomainError::Validation(format!(
                "reward '{}' is not available",
                reward.title
            )));
        }

        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| DomainError::not_found("user", "id", user_id))?;

        if user.total_points < reward.cost_points {
            return Err(DomainError::Validation(format!(
                "insufficient points: have {}, need {}",
                user.total_points, reward.cost_points
            )));
        }

        user.total_points -= reward.cost_points;
        user.updated_at = Utc::now();
        let remaining = user.total_points;

        state.redemption_counter += 1;
        let redemption = RewardRedemption {
            id: state.redemption_counter,
            user_id: user_id.to_string(),
            reward_id,
            points_spent: reward.cost_points,
            redeemed_at: Utc::now(),
        };
        state.redemptions.push(redemption.clone());

        Ok(RedemptionReceipt {
            redemption_id: redemption.id,
            reward_id,
            points_spent: reward.cost_points,
            remaining_points: remaining,
        })
    }

    async fn redemptions_for_user(&self, user_id: &str) -> DomainResult<Vec<RewardRedemption>> {
        Ok(self
            .state
            .lock()
            .await
            .redemptions
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, mut entry: RewardCatalogEntry) -> DomainResult<RewardCatalogEntry> {
        let mut state = self.state.lock().await;
        state.reward_counter += 1;
        entry.id = state.reward_counter;
        state.rewards.push(entry.clone());
        Ok(entry)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().await.rewards.len() as u64)
    }
}

impl RepositoryProvider for MemoryStore {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn submissions(&self) -> &dyn SubmissionRepository {
        self
    }

    fn collector_requests(&self) -> &dyn CollectorRequestRepository {
        self
    }

    fn rewards(&self) -> &dyn RewardRepository {
        self
    }
}
