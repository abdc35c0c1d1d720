//! HS256 token verification and signing against the process-wide secret.
//!
//! The secret is read once from `Config` and injected here; nothing else in
//! the codebase touches it. `verify` returns the raw claims — deciding what a
//! missing subject means (401) is the resolver middleware's call, not ours.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token claims.
///
/// `sub` stays optional in the wire format: a token that decodes without a
/// subject is a defined (rejected) state, not a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub username: String,
    pub exp: u64,
}

impl Claims {
    /// Parse `sub` into the user id. `None` for absent or non-UUID subjects.
    pub fn subject(&self) -> Option<Uuid> {
        self.sub.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }
}

/// Symmetric (HS256) verifier + issuer.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds,
        }
    }

    /// Verify signature + expiry and decode the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Sign a token for a logged-in user (login handler side).
    pub fn sign(&self, user_id: Uuid, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: Some(user_id.to_string()),
            username: username.to_string(),
            exp: Utc::now().timestamp() as u64 + self.ttl_seconds,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", 3600)
    }

    #[test]
    fn sign_then_verify_round_trips_subject() {
        let auth = service();
        let user_id = Uuid::new_v4();

        let token = auth.sign(user_id, "root").unwrap();
        let claims = auth.verify(&token).unwrap();

        assert_eq!(claims.subject(), Some(user_id));
        assert_eq!(claims.username, "root");
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = service().sign(Uuid::new_v4(), "root").unwrap();
        let other = AuthService::new("other-secret", 3600);

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_fails_verification() {
        assert!(service().verify("not.a.token").is_err());
        assert!(service().verify("").is_err());
    }

    #[test]
    fn expired_token_fails_verification() {
        let auth = service();
        let claims = Claims {
            sub: Some(Uuid::new_v4().to_string()),
            username: "root".to_string(),
            // Past the default leeway window
            exp: Utc::now().timestamp() as u64 - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(auth.verify(&token).is_err());
    }

    #[test]
    fn token_without_subject_decodes_with_none() {
        let auth = service();
        let claims = Claims {
            sub: None,
            username: "root".to_string(),
            exp: Utc::now().timestamp() as u64 + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let decoded = auth.verify(&token).unwrap();
        assert_eq!(decoded.subject(), None);
    }

    #[test]
    fn non_uuid_subject_is_treated_as_missing() {
        let claims = Claims {
            sub: Some("not-a-uuid".to_string()),
            username: "root".to_string(),
            exp: 0,
        };
        assert_eq!(claims.subject(), None);
    }
}
