//! JWT bearer authentication middleware
//!
//! Tokens are issued by the identity service and signed with the shared
//! HS256 secret. The user id comes from the `user_id` claim, or from a
//! numeric `sub` when `user_id` is absent.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UserId;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: usize,
}

impl Claims {
    fn resolve_user(&self) -> Option<UserId> {
        self.user_id
            .or_else(|| self.sub.as_deref().and_then(|s| s.parse().ok()))
            .filter(|id| *id > 0)
            .map(UserId)
    }
}

/// Verifies HS256 tokens against the shared secret
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode and validate a token, returning the authenticated user
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })?;

        data.claims.resolve_user().ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Validates the bearer token and injects the `UserId` into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;
    let user_id = state.jwt.verify(token)?;

    request.extensions_mut().insert(user_id);

    Ok(next.run(request).await)
}

/// Sign a token the way the identity service does
#[cfg(test)]
pub fn issue_token(secret: &str, claims: &Claims) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Claims for `user_id` expiring an hour from now
#[cfg(test)]
pub fn claims_for(user_id: i64) -> Claims {
    Claims {
        user_id: Some(user_id),
        sub: None,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    }
}
