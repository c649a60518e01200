//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! error handling, and authentication.

mod auth;
mod error_handler;
mod logging;
mod request_id;
mod timeout;

pub use auth::{AuthUser, auth_middleware, require_role};
pub use error_handler::envelope_fallback_errors;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use timeout::timeout_middleware;
