use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing material, built once from `Config` at startup.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret.as_bytes(), Duration::hours(config.jwt_expires_in_hours))
    }

    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(b"unit-test-secret-with-enough-length!!", Duration::hours(1))
    }

    #[test]
    fn test_issued_token_verifies_to_same_user() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtKeys::new(b"a-completely-different-signing-secret", Duration::hours(1));
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Beyond the default 60s leeway.
        let expired = JwtKeys::new(b"unit-test-secret-with-enough-length!!", Duration::hours(-2));
        let token = expired.issue(Uuid::new_v4()).unwrap();
        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(keys().verify("invalid.jwt.token").is_err());
    }
}
