//! JWT authentication middleware.
//!
//! Provides middleware for validating JWT tokens and the explicit role check
//! handlers call before running role-restricted operations.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Actor, Role};
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Extension type for the authenticated account.
///
/// Added to request extensions after successful authentication and
/// extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub account_id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.account_id, self.role)
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            account_id: claims.account_id()?,
            role: claims.role,
        })
    }
}

/// Fails with `Forbidden` unless the caller holds `role`.
pub fn require_role(user: &AuthUser, role: Role) -> AppResult<()> {
    if user.role == role {
        Ok(())
    } else {
        tracing::debug!(
            account_id = user.account_id,
            role = %user.role,
            required = %role,
            "Role check failed"
        );
        Err(AppError::Forbidden {
            message: format!("{} role required", role),
        })
    }
}

fn bearer_token(request: &Request) -> AppResult<&str> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })
}

/// JWT authentication middleware
///
/// Expects `Authorization: Bearer <token>` and answers 401 when the header is
/// missing or malformed, or when the token is invalid or expired.
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::generate_access_token;
    use axum::body::Body;

    const SECRET: &str = "test_secret_key_at_least_32_characters_long";

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims::new(123, Role::Host, 1);
        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.account_id, 123);
        assert_eq!(auth_user.role, Role::Host);
        assert_eq!(auth_user.actor(), Actor::new(123, Role::Host));
    }

    #[test]
    fn test_auth_user_rejects_garbage_subject() {
        let mut claims = Claims::new(1, Role::Listener, 1);
        claims.sub = "invalid".to_string();
        assert!(matches!(
            AuthUser::try_from(claims),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_require_role() {
        let host = AuthUser {
            account_id: 1,
            role: Role::Host,
        };
        assert!(require_role(&host, Role::Host).is_ok());

        let err = require_role(&host, Role::Listener).unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        assert_eq!(err.to_string(), "Forbidden: Listener role required");
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = generate_access_token(5, Role::Listener, SECRET, 1).unwrap();
        let request = Request::builder()
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request).unwrap(), token);

        let request = Request::builder()
            .header(header::AUTHORIZATION, format!("Token {}", token))
            .body(Body::empty())
            .unwrap();
        assert!(bearer_token(&request).is_err());

        let request = Request::builder().body(Body::empty()).unwrap();
        assert!(bearer_token(&request).is_err());
    }
}
