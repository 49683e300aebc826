//! Identity service: registration, login, profile
//!
//! Passwords are bcrypt-hashed before they reach the repository, and login
//! failures are deliberately indistinguishable (unknown user vs wrong
//! password both return the same message).

use std::sync::Arc;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

use crate::auth::{create_token, hash_password, verify_password, JwtConfig};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{NewUser, User, UserRole};
use crate::shared::{DomainError, DomainResult};

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt: JwtConfig,
}

/// Outcome of a successful register or login.
#[derive(Debug)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt: JwtConfig) -> Self {
        Self { repos, jwt }
    }

    /// Register a new household user and issue a token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthenticatedSession> {
        let password_hash = hash_password(password)
            .map_err(|e| DomainError::ExternalService(format!("password hashing failed: {e}")))?;

        let user = self
            .repos
            .users()
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: UserRole::User,
                qr_token: generate_qr_token(),
            })
            .await?;

        let token = create_token(&user, &self.jwt)
            .map_err(|e| DomainError::ExternalService(format!("token creation failed: {e}")))?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(AuthenticatedSession { user, token })
    }

    /// Log in with username or email.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthenticatedSession> {
        let invalid = || DomainError::Unauthorized("invalid credentials".to_string());

        let user = self
            .repos
            .users()
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(invalid)?;

        if !user.is_active {
            return Err(invalid());
        }

        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| DomainError::ExternalService(format!("password check failed: {e}")))?;
        if !ok {
            return Err(invalid());
        }

        self.repos.users().record_login(&user.id).await?;

        let token = create_token(&user, &self.jwt)
            .map_err(|e| DomainError::ExternalService(format!("token creation failed: {e}")))?;

        info!(user_id = %user.id, "user logged in");
        Ok(AuthenticatedSession { user, token })
    }

    pub async fn profile(&self, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", "id", user_id))
    }
}

/// Household QR token: `USER_<millis>_<9 random alphanumerics>`.
pub fn generate_qr_token() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("USER_{}_{}", Utc::now().timestamp_millis(), suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "ecosort-service".into(),
        }
    }

    #[tokio::test]
    async fn register_issues_token_and_qr() {
        let service = IdentityService::new(Arc::new(MemoryStore::new()), jwt());
        let session = service
            .register("asha", "asha@example.com", "hunter42")
            .await
            .unwrap();

        assert_eq!(session.user.role, UserRole::User);
        assert!(session.user.qr_token.starts_with("USER_"));
        assert!(!session.token.is_empty());
        // The stored hash must never be the raw password.
        assert_ne!(session.user.password_hash, "hunter42");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let service = IdentityService::new(Arc::new(MemoryStore::new()), jwt());
        service
            .register("asha", "asha@example.com", "pw1")
            .await
            .unwrap();
        let err = service
            .register("asha", "other@example.com", "pw2")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_accepts_username_or_email() {
        let service = IdentityService::new(Arc::new(MemoryStore::new()), jwt());
        service
            .register("asha", "asha@example.com", "hunter42")
            .await
            .unwrap();

        assert!(service.login("asha", "hunter42").await.is_ok());
        assert!(service.login("asha@example.com", "hunter42").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() {
        let service = IdentityService::new(Arc::new(MemoryStore::new()), jwt());
        service
            .register("asha", "asha@example.com", "hunter42")
            .await
            .unwrap();

        let wrong_pw = service.login("asha", "nope").await.unwrap_err();
        let no_user = service.login("ghost", "nope").await.unwrap_err();
        assert_eq!(wrong_pw.to_string(), no_user.to_string());
    }

    #[test]
    fn qr_tokens_are_distinct() {
        let a = generate_qr_token();
        let b = generate_qr_token();
        assert_ne!(a, b);
        assert!(a.starts_with("USER_"));
    }
}
