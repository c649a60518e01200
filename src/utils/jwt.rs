use jiff::Timestamp;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::Role;

const SECONDS_PER_HOUR: i64 = 3600;

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    pub role: Role,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(account_id: i32, role: Role, expiration_hours: i64) -> Self {
        let iat = Timestamp::now().as_second();
        Self {
            sub: account_id.to_string(),
            role,
            iat,
            exp: iat.saturating_add(expiration_hours.saturating_mul(SECONDS_PER_HOUR)),
        }
    }

    /// Account id parsed back out of `sub`.
    pub fn account_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })
    }
}

/// Signs an HS256 access token for an account
///
/// # Example
/// ```ignore
/// let token = generate_access_token(1, Role::Host, &settings.jwt.secret, 24)?;
/// ```
pub fn generate_access_token(
    account_id: i32,
    role: Role,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    encode_claims(&Claims::new(account_id, role, expiration_hours), secret)
}

fn encode_claims(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Validates and decodes an access token
///
/// Every failure maps to `AppError::Unauthorized`.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })
}
