//! JWT creation and validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use drivebox_core::AppError;
use drivebox_core::config::auth::AuthConfig;
use drivebox_entity::user::UserRole;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the username, which is also the `owner` stamp on entities.
    pub sub: String,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// A freshly issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The encoded JWT.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_minutes: config.token_ttl_minutes as i64,
        }
    }

    /// Issue a signed access token for the given user.
    pub fn issue(&self, username: &str, role: UserRole) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(AccessToken {
            access_token: token,
            token_type: "bearer".to_string(),
            expires_at,
        })
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 60,
        })
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec();
        let token = codec.issue("alice", UserRole::User).unwrap();
        let claims = codec.verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = codec();
        let token = codec.issue("alice", UserRole::Admin).unwrap();
        let mut tampered = token.access_token;
        tampered.push('x');
        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().issue("alice", UserRole::User).unwrap();
        let other = TokenCodec::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            token_ttl_minutes: 60,
        });
        let err = other.verify(&token.access_token).unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Authentication);
    }
}
