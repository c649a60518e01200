//! Response envelope shared by every endpoint.
//!
//! Success bodies are `{"ok": true, "error": null, ...payload}` and failures
//! are `{"ok": false, "error": "<message>"}`.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Successful response carrying an operation specific payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    #[schema(example = true)]
    pub ok: bool,
    /// Always `null` on success
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            ok: true,
            error: None,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failure body.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"ok": false, "error": "Podcast with id 1 not found"}))]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub ok: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}

/// Payload for operations that only report success.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct Ack {}

/// Payload carrying the id of a freshly created record.
#[derive(Debug, Serialize, ToSchema)]
pub struct Created {
    #[schema(example = 1)]
    pub id: i32,
}
