use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Unique constraint guarding `accounts.email`.
const ACCOUNT_EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Check constraint guarding `podcasts.rating`.
const PODCAST_RATING_CONSTRAINT: &str = "podcasts_rating_check";

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations that correspond to a caller-correctable domain error
/// are mapped onto that error; everything else becomes an opaque
/// `AppError::Database`.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.message(), info.constraint_name(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint_name: Option<&str>,
        operation: &str,
    ) -> AppError {
        match (kind, constraint_name) {
            (DatabaseErrorKind::UniqueViolation, Some(ACCOUNT_EMAIL_CONSTRAINT)) => {
                AppError::EmailTaken
            }
            (DatabaseErrorKind::CheckViolation, Some(PODCAST_RATING_CONSTRAINT)) => {
                AppError::InvalidRating
            }
            (kind, _) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
            },
        }
    }
}
