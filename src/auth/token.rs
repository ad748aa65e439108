use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the authenticated user's email.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies HS256 bearer tokens.
///
/// Holds the prepared signing keys and the time-to-live; built once from
/// `Config` at startup and shared through `web::Data`. Tokens are stateless:
/// validity is decided entirely by signature and expiry at verification
/// time, and there is no revocation.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Signs a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let expiration = (Utc::now() + self.ttl).timestamp() as usize;
        let claims = Claims {
            sub: subject.to_owned(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }

    /// Decodes and validates a token, returning its subject.
    ///
    /// Expired, tampered, malformed, and subject-less tokens all fail with
    /// the same error; neither callers nor clients can tell the cases apart.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn failure_message(result: Result<String, AppError>) -> String {
        match result {
            Err(AppError::Unauthorized(msg)) => msg,
            Ok(sub) => panic!("expected verification to fail, got subject {:?}", sub),
            Err(other) => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = TokenSigner::new(SECRET, 30);
        let token = signer.issue("alice@example.com").unwrap();
        let subject = signer.verify(&token).unwrap();
        assert_eq!(subject, "alice@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = TokenSigner::new(SECRET, 30);

        // Two hours in the past, well beyond the default decode leeway.
        let claims = Claims {
            sub: "alice@example.com".to_owned(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        failure_message(signer.verify(&expired));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let signer = TokenSigner::new(SECRET, 30);
        let other = TokenSigner::new("a-completely-different-secret", 30);

        let token = other.issue("alice@example.com").unwrap();
        failure_message(signer.verify(&token));
    }

    #[test]
    fn test_token_without_subject_is_rejected() {
        #[derive(Serialize)]
        struct ExpOnly {
            exp: usize,
        }

        let signer = TokenSigner::new(SECRET, 30);
        let claims = ExpOnly {
            exp: (Utc::now() + Duration::minutes(30)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        failure_message(signer.verify(&token));
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let signer = TokenSigner::new(SECRET, 30);

        let claims = Claims {
            sub: "alice@example.com".to_owned(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let tampered = TokenSigner::new("other", 30)
            .issue("alice@example.com")
            .unwrap();

        let expired_msg = failure_message(signer.verify(&expired));
        let tampered_msg = failure_message(signer.verify(&tampered));
        let garbage_msg = failure_message(signer.verify("not.a.token"));

        assert_eq!(expired_msg, tampered_msg);
        assert_eq!(tampered_msg, garbage_msg);
    }
}
