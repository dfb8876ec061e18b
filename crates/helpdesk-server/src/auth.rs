//! Bearer tokens.
//!
//! A token names who is acting (`sub`) and as what (`role`). Reports take
//! their owner from here, never from the request body.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use domain::Owner;
use domain::user::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    Technician,
    Administrator,
    Worker,
}

impl From<Role> for TokenRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Technician => TokenRole::Technician,
            Role::Administrator => TokenRole::Administrator,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: TokenRole,
    pub exp: usize,
}

impl Claims {
    pub fn owner(&self) -> Owner {
        match self.role {
            TokenRole::Technician | TokenRole::Administrator => Owner::User(self.sub),
            TokenRole::Worker => Owner::Worker(self.sub),
        }
    }
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, sub: i32, role: TokenRole) -> Result<String, ApiError> {
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as usize;
        let claims = Claims { sub, role, exp };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

/// Extractor for handlers that require a signed-in caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn owner(&self) -> Owner {
        self.0.owner()
    }

    pub fn require_staff(&self) -> Result<(), ApiError> {
        match self.0.role {
            TokenRole::Worker => Err(ApiError::Forbidden(
                "Only technicians and administrators may do this".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        state.tokens.verify(token).map(AuthUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new("test-secret", 1);
        let token = tokens.issue(7, TokenRole::Worker).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.owner(), Owner::Worker(7));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenService::new("a", 1)
            .issue(1, TokenRole::Technician)
            .unwrap();

        assert!(matches!(
            TokenService::new("b", 1).verify(&token),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_staff_roles_map_to_user_owner() {
        for role in [TokenRole::Technician, TokenRole::Administrator] {
            let claims = Claims { sub: 3, role, exp: 0 };
            assert_eq!(claims.owner(), Owner::User(3));
        }
    }
}
