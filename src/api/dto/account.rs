//! Account-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Account, AccountChanges, AccountProfile, Role};

/// Registration request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAccountRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "host@example.com", format = "email")]
    pub email: String,
    /// Plain text, stored hashed
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(example = "password123", format = "password", min_length = 6, max_length = 64)]
    pub password: String,
    pub role: Role,
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "host@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

/// Partial profile update
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct EditProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "new@example.com", format = "email")]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(format = "password", min_length = 6, max_length = 64)]
    pub password: Option<String>,
}

impl EditProfileRequest {
    pub fn into_changes(self) -> AccountChanges {
        AccountChanges {
            email: self.email,
            password: self.password,
        }
    }
}

/// Public account information
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "host@example.com")]
    pub email: String,
    pub role: Role,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
        }
    }
}

/// The caller's own account with subscription and playback links
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub email: String,
    pub role: Role,
    /// Subscribed podcast ids
    pub subscriptions: Vec<i32>,
    /// Played episode ids
    pub played_episodes: Vec<i32>,
}

impl From<AccountProfile> for ProfileResponse {
    fn from(profile: AccountProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            role: profile.role,
            subscriptions: profile.subscriptions,
            played_episodes: profile.played_episodes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountPayload {
    pub account: AccountResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilePayload {
    pub profile: ProfileResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPayload {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionPayload {
    /// Membership after the toggle
    pub subscribed: bool,
}
