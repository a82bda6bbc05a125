//! services/api/src/adapters/session.rs
//!
//! Stateless session tokens: an HS256 JWT carrying the principal, signed with
//! the configured `SESSION_SECRET`. Nothing is stored server-side, so signing
//! out only clears the client's cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use story_hub_core::domain::{Principal, SessionToken};
use story_hub_core::ports::{PortError, PortResult, SessionService};
use tracing::{debug, error};
use uuid::Uuid;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject: the user id.
    sub: Uuid,
    email: String,
    /// Issued at (unix timestamp).
    iat: i64,
    /// Expiry (unix timestamp).
    exp: i64,
}

pub struct JwtSessionAdapter {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtSessionAdapter {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl SessionService for JwtSessionAdapter {
    fn issue(&self, principal: &Principal) -> PortResult<SessionToken> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;
        let claims = SessionClaims {
            sub: principal.user_id,
            email: principal.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign session token: {:?}", e);
            PortError::Unexpected("Failed to sign session token".to_string())
        })?;

        Ok(SessionToken { value, expires_at })
    }

    fn identify(&self, token: &str) -> Option<Principal> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(Principal {
                user_id: data.claims.sub,
                email: data.claims.email,
            }),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}
