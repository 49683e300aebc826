//! Submission ledger service
//!
//! Orchestrates the scoring and atomic append of waste submissions, and the
//! read side (stats, history, leaderboard). All writes for one user go
//! through the per-user lock so totals never interleave.

use std::sync::Arc;

use metrics::counter;
use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::scoring::ScoringEngine;
use crate::domain::submission::{Committed, NewSubmission, WasteSubmission};
use crate::domain::user::User;
use crate::domain::waste::{Category, Classification};
use crate::shared::{DomainError, DomainResult, PaginatedResult};

use super::locks::UserLocks;

const MAX_LEADERBOARD_LIMIT: u64 = 100;

/// Everything needed to commit one submission.
#[derive(Debug, Clone)]
pub struct SubmitCommand {
    pub user_id: String,
    pub declared_category: Category,
    pub classification: Classification,
    /// Token scanned from the household QR code
    pub qr_token: String,
    pub collector_id: Option<String>,
    pub image_ref: Option<String>,
}

pub struct LedgerService {
    repos: Arc<dyn RepositoryProvider>,
    scoring: ScoringEngine,
    locks: Arc<UserLocks>,
}

impl LedgerService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        scoring: ScoringEngine,
        locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            repos,
            scoring,
            locks,
        }
    }

    /// Score and append one submission atomically.
    ///
    /// The QR token must be present and must match the submitting user's own
    /// token; a mismatch means the scan belongs to someone else's household.
    pub async fn submit(&self, cmd: SubmitCommand) -> DomainResult<Committed> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let user = self
            .repos
            .users()
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", "id", cmd.user_id.clone()))?;

        if cmd.qr_token.trim().is_empty() {
            return Err(DomainError::Validation("qr token is required".to_string()));
        }
        if cmd.qr_token != user.qr_token {
            return Err(DomainError::Forbidden(
                "qr token does not belong to this user".to_string(),
            ));
        }

        let points = self
            .scoring
            .score_classification(&cmd.classification, cmd.declared_category)?;

        let committed = self
            .repos
            .submissions()
            .append(NewSubmission {
                user_id: cmd.user_id.clone(),
                collector_id: cmd.collector_id,
                waste_label: cmd.classification.label,
                predicted_category: cmd.classification.category,
                declared_category: cmd.declared_category,
                confidence: cmd.classification.confidence,
                points_earned: points,
                source: cmd.classification.source,
                qr_token: cmd.qr_token,
                image_ref: cmd.image_ref,
            })
            .await?;

        counter!("ecosort_submissions_total").increment(1);
        info!(
            user_id = %cmd.user_id,
            submission_id = committed.submission_id,
            points = committed.points_earned,
            total = committed.new_total_points,
            "submission committed"
        );
        Ok(committed)
    }

    /// Current stats snapshot for one user. Level and accuracy are derived
    /// from the stored totals, so the snapshot is internally consistent.
    pub async fn stats(&self, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", "id", user_id))
    }

    pub async fn history(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<WasteSubmission>> {
        if self.repos.users().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("user", "id", user_id));
        }
        self.repos
            .submissions()
            .history_for_user(user_id, page, limit)
            .await
    }

    /// Top users by points, admins excluded.
    pub async fn leaderboard(&self, limit: u64) -> DomainResult<Vec<User>> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT);
        self.repos.users().leaderboard(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, UserRepository, UserRole};
    use crate::domain::waste::ClassificationSource;
    use crate::infrastructure::MemoryStore;

    fn service(repos: Arc<MemoryStore>) -> LedgerService {
        LedgerService::new(repos, ScoringEngine::default(), Arc::new(UserLocks::new()))
    }

    async fn seed_user(repos: &MemoryStore, username: &str, qr: &str) -> User {
        repos
            .users()
            .create(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "hash".to_string(),
                role: UserRole::User,
                qr_token: qr.to_string(),
            })
            .await
            .unwrap()
    }

    fn classification(category: Category, confidence: f64) -> Classification {
        Classification {
            label: "plastic_bottle".to_string(),
            detected_object: "bottle".to_string(),
            category,
            confidence,
            source: ClassificationSource::Remote,
        }
    }

    fn command(user: &User, declared: Category, confidence: f64) -> SubmitCommand {
        SubmitCommand {
            user_id: user.id.clone(),
            declared_category: declared,
            classification: classification(Category::Dry, confidence),
            qr_token: user.qr_token.clone(),
            collector_id: None,
            image_ref: None,
        }
    }

    #[tokio::test]
    async fn three_correct_submissions_accumulate_points() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        // 10 + floor(0.8 * 5) = 14 each
        for expected_total in [14, 28, 42] {
            let committed = service.submit(command(&user, Category::Dry, 0.8)).await.unwrap();
            assert_eq!(committed.points_earned, 14);
            assert_eq!(committed.new_total_points, expected_total);
        }

        let stats = service.stats(&user.id).await.unwrap();
        assert_eq!(stats.total_points, 42);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_submissions, 3);
        assert_eq!(stats.correct_submissions, 3);
        assert_eq!(stats.dry_count, 3);
    }

    #[tokio::test]
    async fn incorrect_declarations_can_drive_total_negative() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        for _ in 0..3 {
            service.submit(command(&user, Category::Wet, 0.9)).await.unwrap();
        }

        let stats = service.stats(&user.id).await.unwrap();
        assert_eq!(stats.total_points, -15);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.correct_submissions, 0);
    }

    #[tokio::test]
    async fn empty_qr_token_is_rejected() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        let mut cmd = command(&user, Category::Dry, 0.8);
        cmd.qr_token = "  ".to_string();
        assert!(matches!(
            service.submit(cmd).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn foreign_qr_token_is_forbidden() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        let mut cmd = command(&user, Category::Dry, 0.8);
        cmd.qr_token = "QR-SOMEONE-ELSE".to_string();
        assert!(matches!(
            service.submit(cmd).await,
            Err(DomainError::Forbidden(_))
        ));

        // Nothing was recorded.
        let stats = service.stats(&user.id).await.unwrap();
        assert_eq!(stats.total_submissions, 0);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(repos);

        let cmd = SubmitCommand {
            user_id: "missing".to_string(),
            declared_category: Category::Dry,
            classification: classification(Category::Dry, 0.5),
            qr_token: "QR".to_string(),
            collector_id: None,
            image_ref: None,
        };
        assert!(matches!(
            service.submit(cmd).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn history_returns_newest_first() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        service.submit(command(&user, Category::Dry, 0.1)).await.unwrap();
        service.submit(command(&user, Category::Dry, 0.9)).await.unwrap();

        let page = service.history(&user.id, 1, 10).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].id > page.items[1].id);
        assert!((page.items[0].confidence - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn huge_page_number_yields_empty_page_without_panic() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        service.submit(command(&user, Category::Dry, 0.8)).await.unwrap();

        let page = service.history(&user.id, u32::MAX, 100).await.unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.page, u32::MAX);
    }

    #[tokio::test]
    async fn total_equals_sum_of_history_deltas() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));
        let user = seed_user(&repos, "asha", "QR-1").await;

        service.submit(command(&user, Category::Dry, 0.8)).await.unwrap();
        service.submit(command(&user, Category::Wet, 0.7)).await.unwrap();
        service.submit(command(&user, Category::Dry, 1.0)).await.unwrap();

        let page = service.history(&user.id, 1, 100).await.unwrap();
        let sum: i32 = page.items.iter().map(|s| s.points_earned).sum();
        let stats = service.stats(&user.id).await.unwrap();
        assert_eq!(stats.total_points, sum);
    }

    #[tokio::test]
    async fn concurrent_submissions_for_one_user_never_lose_points() {
        let repos = Arc::new(MemoryStore::new());
        let service = Arc::new(service(Arc::clone(&repos)));
        let user = seed_user(&repos, "asha", "QR-1").await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let service = Arc::clone(&service);
            let cmd = command(&user, Category::Dry, 0.8);
            handles.push(tokio::spawn(async move { service.submit(cmd).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stats = service.stats(&user.id).await.unwrap();
        assert_eq!(stats.total_points, 20 * 14);
        assert_eq!(stats.total_submissions, 20);
    }

    #[tokio::test]
    async fn leaderboard_excludes_admins_and_orders_by_points() {
        let repos = Arc::new(MemoryStore::new());
        let service = service(Arc::clone(&repos));

        let low = seed_user(&repos, "low", "QR-L").await;
        let high = seed_user(&repos, "high", "QR-H").await;
        repos
            .users()
            .create(NewUser {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Admin,
                qr_token: "QR-A".to_string(),
            })
            .await
            .unwrap();

        service.submit(command(&low, Category::Dry, 0.0)).await.unwrap();
        for _ in 0..3 {
            service.submit(command(&high, Category::Dry, 1.0)).await.unwrap();
        }

        let board = service.leaderboard(10).await.unwrap();
        let names: Vec<&str> = board.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);
    }
}
