use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use thiserror::Error;
use validator::ValidationErrors;

use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;

/// Message surfaced to callers for every fault that is not caused by their input.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error occurred.";

/// Application-wide error type.
///
/// The first group of variants are caller-correctable outcomes whose `Display`
/// text is the exact message returned to API clients. The trailing group wraps
/// infrastructure faults; their detail is logged but never shown to clients
/// (see [`AppError::public_message`]).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Podcast with id {id} not found")]
    PodcastNotFound { id: i32 },

    #[error("Episode with id {episode_id} not found in podcast with id {podcast_id}")]
    EpisodeNotFound { episode_id: i32, podcast_id: i32 },

    /// Episode looked up by its global id rather than under a podcast.
    #[error("Episode with id {episode_id} not found")]
    UnknownEpisode { episode_id: i32 },

    #[error("Rating must be between 1 and 5.")]
    InvalidRating,

    /// The acting account does not own the targeted podcast or episode.
    #[error("Not authorized")]
    NotAuthorized,

    #[error("User not found")]
    AccountNotFound,

    #[error("There is a user with that email already")]
    EmailTaken,

    #[error("Wrong password")]
    WrongPassword,

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated, but the caller's role may not use the operation
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether this error stems from infrastructure rather than caller input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Database { .. }
                | AppError::Configuration { .. }
                | AppError::ConnectionPool { .. }
                | AppError::Internal { .. }
        )
    }

    /// Message safe to hand to API clients.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<diesel_async::pooled_connection::PoolError> for AppError {
    fn from(error: diesel_async::pooled_connection::PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.key().unwrap_or("configuration").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AppError::Internal {
            source: anyhow::anyhow!("Password hashing failed: {}", error),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Reports the alphabetically first failing field so the message is stable.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.into_iter().next() {
            Some((field, field_errors)) => {
                let reason = field_errors
                    .first()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("failed rule '{}'", e.code),
                    })
                    .unwrap_or_else(|| "invalid value".to_string());
                AppError::Validation {
                    field: field.to_string(),
                    reason,
                }
            }
            None => AppError::BadRequest {
                message: errors.to_string(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
