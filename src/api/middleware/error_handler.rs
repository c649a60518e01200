//! Error handling for HTTP responses.
//!
//! Every `AppError` leaves the API as an [`ErrorEnvelope`]. Infrastructure
//! faults are logged with their source chain and reported to the client
//! with the generic internal message only.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorEnvelope;
use crate::error::AppError;

impl AppError {
    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::PodcastNotFound { .. }
            | AppError::EpisodeNotFound { .. }
            | AppError::UnknownEpisode { .. }
            | AppError::AccountNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidRating
            | AppError::Validation { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotAuthorized | AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Unauthorized { .. } | AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_internal() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorEnvelope::new(self.public_message()))).into_response()
    }
}

/// Wraps bare error responses produced outside the handlers (unknown routes,
/// wrong methods, timeouts) in the error envelope.
pub async fn envelope_fallback_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let message = match status {
        StatusCode::NOT_FOUND => "Not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed".to_string(),
        StatusCode::REQUEST_TIMEOUT => "Request timed out".to_string(),
        status if status.is_server_error() => crate::error::INTERNAL_ERROR_MESSAGE.to_string(),
        status => status
            .canonical_reason()
            .unwrap_or("Bad request")
            .to_string(),
    };

    (status, Json(ErrorEnvelope::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_table() {
        assert_eq!(
            AppError::PodcastNotFound { id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UnknownEpisode { episode_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::InvalidRating.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotAuthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::WrongPassword.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::ConnectionPool {
                source: anyhow::anyhow!("timed out")
            }
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_caller_error_body() {
        let response = AppError::EpisodeNotFound {
            episode_id: 2,
            podcast_id: 1,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "ok": false,
                "error": "Episode with id 2 not found in podcast with id 1"
            })
        );
    }

    #[tokio::test]
    async fn test_internal_error_body_is_sanitized() {
        let response = AppError::Database {
            operation: "insert podcast".to_string(),
            source: anyhow::anyhow!("password authentication failed for user \"podcast\""),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Internal server error occurred.");
    }
}
