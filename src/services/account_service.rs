//! Account service: registration, login, profile and listener links.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Account, AccountChanges, AccountProfile, NewAccount, Podcast, Role};
use crate::repositories::AccountRepository;
use crate::services::PodcastService;
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    podcasts: PodcastService,
    jwt: Arc<JwtConfig>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>, podcasts: PodcastService, jwt: JwtConfig) -> Self {
        Self {
            repo,
            podcasts,
            jwt: Arc::new(jwt),
        }
    }

    /// Registers an account with an argon2-hashed password.
    ///
    /// # Errors
    /// `EmailTaken` when the email is already registered.
    pub async fn create_account(&self, email: String, password: &str, role: Role) -> AppResult<Account> {
        if self.repo.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Registration rejected, email already in use");
            return Err(AppError::EmailTaken);
        }

        let account = self
            .repo
            .insert(NewAccount {
                email,
                password: hash_password(password)?,
                role,
            })
            .await?;

        tracing::info!(account_id = account.id, role = %account.role, "Account created");
        Ok(account)
    }

    /// Checks credentials and returns a signed access token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let account = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        if !verify_password(password, &account.password)? {
            tracing::warn!(account_id = account.id, "Login failed, wrong password");
            return Err(AppError::WrongPassword);
        }

        let token = generate_access_token(
            account.id,
            account.role,
            &self.jwt.secret,
            self.jwt.access_token_expiration,
        )?;

        tracing::info!(account_id = account.id, "Account logged in");
        Ok(token)
    }

    pub async fn get_account(&self, id: i32) -> AppResult<Account> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::AccountNotFound)
    }

    pub async fn get_profile(&self, id: i32) -> AppResult<AccountProfile> {
        let account = self.get_account(id).await?;
        self.profile_of(account).await
    }

    async fn profile_of(&self, account: Account) -> AppResult<AccountProfile> {
        let subscriptions = self.repo.subscription_ids(account.id).await?;
        let played_episodes = self.repo.played_episode_ids(account.id).await?;

        Ok(AccountProfile {
            id: account.id,
            email: account.email,
            role: account.role,
            subscriptions,
            played_episodes,
        })
    }

    /// Patch email and/or password. `changes.password` is plain text here and gets hashed.
    pub async fn edit_profile(&self, id: i32, changes: AccountChanges) -> AppResult<AccountProfile> {
        let account = self.get_account(id).await?;
        if changes.is_empty() {
            return self.profile_of(account).await;
        }

        let changes = AccountChanges {
            email: changes.email,
            password: changes.password.as_deref().map(hash_password).transpose()?,
        };

        let account = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        tracing::info!(
            account_id = id,
            email_changed = changes.email.is_some(),
            password_changed = changes.password.is_some(),
            "Profile updated"
        );
        self.profile_of(account).await
    }

    /// Subscribe or unsubscribe; returns whether the account is now subscribed.
    pub async fn toggle_subscribe(&self, account_id: i32, podcast_id: i32) -> AppResult<bool> {
        self.get_account(account_id).await?;
        self.podcasts.get_podcast(podcast_id).await?;

        let subscribed = self.repo.toggle_subscription(account_id, podcast_id).await?;
        tracing::info!(account_id, podcast_id, subscribed, "Subscription toggled");
        Ok(subscribed)
    }

    pub async fn subscriptions(&self, account_id: i32) -> AppResult<Vec<Podcast>> {
        self.get_account(account_id).await?;

        let mut podcasts = Vec::new();
        for podcast_id in self.repo.subscription_ids(account_id).await? {
            match self.podcasts.get_podcast(podcast_id).await {
                Ok(podcast) => podcasts.push(podcast),
                // deleted since the ids were read
                Err(AppError::PodcastNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(podcasts)
    }

    /// Record an episode as played. Marking twice is harmless.
    pub async fn mark_episode_played(&self, account_id: i32, episode_id: i32) -> AppResult<()> {
        self.get_account(account_id).await?;
        self.podcasts.find_episode(episode_id).await?;

        self.repo.mark_played(account_id, episode_id).await?;
        tracing::info!(account_id, episode_id, "Episode marked as played");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Repositories;
    use crate::services::Services;
    use crate::utils::jwt::validate_access_token;

    const SECRET: &str = "account-service-test-secret-0123456789";

    fn services() -> Services {
        Services::new(
            Repositories::in_memory(),
            JwtConfig {
                secret: SECRET.to_string(),
                access_token_expiration: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_create_account_hashes_password() {
        let services = services();
        let account = services
            .accounts
            .create_account("host@example.com".to_string(), "secret-pw", Role::Host)
            .await
            .unwrap();
        assert_ne!(account.password, "secret-pw");
        assert!(account.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let services = services();
        services
            .accounts
            .create_account("a@example.com".to_string(), "pw-123456", Role::Host)
            .await
            .unwrap();
        let err = services
            .accounts
            .create_account("a@example.com".to_string(), "pw-123456", Role::Listener)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "There is a user with that email already");
    }

    #[tokio::test]
    async fn test_login() {
        let services = services();
        let account = services
            .accounts
            .create_account("l@example.com".to_string(), "pw-123456", Role::Listener)
            .await
            .unwrap();

        let token = services.accounts.login("l@example.com", "pw-123456").await.unwrap();
        let claims = validate_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.account_id().unwrap(), account.id);
        assert_eq!(claims.role, Role::Listener);

        let err = services.accounts.login("l@example.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Wrong password");

        let err = services.accounts.login("x@example.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_edit_profile_rehashes_password() {
        let services = services();
        let account = services
            .accounts
            .create_account("e@example.com".to_string(), "old-password", Role::Host)
            .await
            .unwrap();

        let profile = services
            .accounts
            .edit_profile(
                account.id,
                AccountChanges {
                    email: Some("new@example.com".to_string()),
                    password: Some("new-password".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.email, "new@example.com");

        assert!(services.accounts.login("new@example.com", "new-password").await.is_ok());
        assert!(matches!(
            services.accounts.login("new@example.com", "old-password").await,
            Err(AppError::WrongPassword)
        ));
    }

    #[tokio::test]
    async fn test_subscriptions_and_played_episodes() {
        let services = services();
        let host = services
            .accounts
            .create_account("h@example.com".to_string(), "pw-123456", Role::Host)
            .await
            .unwrap();
        let listener = services
            .accounts
            .create_account("l@example.com".to_string(), "pw-123456", Role::Listener)
            .await
            .unwrap();
        let podcast_id = services
            .podcasts
            .create_podcast("T".to_string(), "C".to_string(), Some(host.id))
            .await
            .unwrap();
        let episode_id = services
            .podcasts
            .create_episode(podcast_id, "E".to_string(), "C".to_string(), None)
            .await
            .unwrap();

        assert!(services.accounts.toggle_subscribe(listener.id, podcast_id).await.unwrap());
        let subscribed = services.accounts.subscriptions(listener.id).await.unwrap();
        assert_eq!(subscribed.len(), 1);
        assert_eq!(subscribed[0].id, podcast_id);

        services
            .accounts
            .mark_episode_played(listener.id, episode_id)
            .await
            .unwrap();
        let profile = services.accounts.get_profile(listener.id).await.unwrap();
        assert_eq!(profile.subscriptions, vec![podcast_id]);
        assert_eq!(profile.played_episodes, vec![episode_id]);

        assert!(!services.accounts.toggle_subscribe(listener.id, podcast_id).await.unwrap());
        assert!(services.accounts.subscriptions(listener.id).await.unwrap().is_empty());

        let err = services
            .accounts
            .toggle_subscribe(listener.id, 404)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Podcast with id 404 not found");

        let err = services
            .accounts
            .mark_episode_played(listener.id, 404)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Episode with id 404 not found");
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let services = services();
        assert!(matches!(
            services.accounts.get_profile(1).await,
            Err(AppError::AccountNotFound)
        ));
    }
}
