//! HS256 session tokens.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use flatseller_database::Role;

use crate::{AuthError, Identity};

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: String,
    pub email: String,
    pub user_type: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            uid: identity.user_id.clone(),
            email: identity.email.clone(),
            user_type: identity.role.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Token(err.to_string()))
    }

    /// Check signature and expiry, then trust the role claim.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let role = data
            .claims
            .user_type
            .parse::<Role>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Identity {
            user_id: data.claims.uid,
            email: data.claims.email,
            role,
        })
    }
}
