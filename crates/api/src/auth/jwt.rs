// JWT token service for authentication
// Decision: Use HS256 algorithm (symmetric key shared by issuer and verifier)
// Decision: Tokens are stateless; validity is signature + expiry only, no revocation
// Decision: No leeway on expiry so the configured lifetime is exact

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use quill_core::AuthorId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::JwtConfig;

/// Signature algorithm for every token
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (author ID)
    #[serde(rename = "id_autor")]
    pub sub: AuthorId,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
    /// Declared lifetime in seconds
    pub expires_in: i64,
}

/// Why a presented token was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed or its signature does not match")]
    Invalid,

    #[error("{0}")]
    Verification(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Invalid,
            _ => TokenError::Verification(err.to_string()),
        }
    }
}

/// JWT service for token issuance and verification
#[derive(Clone)]
pub struct TokenService {
    lifetime: std::time::Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            lifetime: config.access_token_lifetime,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime in seconds
    pub fn lifetime_secs(&self) -> i64 {
        i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX)
    }

    /// Issue a token for an author, valid from now
    pub fn issue(&self, subject: AuthorId) -> Result<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if signed at `now`
    pub fn issue_at(&self, subject: AuthorId, now: DateTime<Utc>) -> Result<IssuedToken> {
        let lifetime =
            Duration::from_std(self.lifetime).context("Token lifetime is out of range")?;
        let exp = now
            .checked_add_signed(lifetime)
            .context("Token expiry is out of range")?;

        let claims = TokenClaims {
            sub: subject,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .context("Failed to encode access token")?;

        Ok(IssuedToken {
            token,
            claims,
            expires_in: self.lifetime_secs(),
        })
    }

    /// Check signature and expiry and return the claims
    pub fn verify(&self, token: &str) -> std::result::Result<TokenClaims, TokenError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_lifetime: std::time::Duration::from_secs(1800),
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service("test-secret-key-for-testing");
        let issued = service.issue(AuthorId::new(7)).unwrap();

        assert!(!issued.token.is_empty());
        assert_eq!(issued.expires_in, 1800);
        assert_eq!(issued.claims.exp - issued.claims.iat, 1800);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, AuthorId::new(7));
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_token_is_url_safe() {
        let issued = service("k").issue(AuthorId::new(1)).unwrap();
        assert!(issued
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
        assert_eq!(issued.token.matches('.').count(), 2);
    }

    #[test]
    fn test_expired_token() {
        let service = service("test-secret-key-for-testing");
        let issued = service
            .issue_at(AuthorId::new(1), Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(service.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_from_other_key_is_invalid() {
        let issued = service("key-one").issue(AuthorId::new(1)).unwrap();
        assert_eq!(
            service("key-two").verify(&issued.token),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_expired_token_from_other_key_is_invalid() {
        let issued = service("key-one")
            .issue_at(AuthorId::new(1), Utc::now() - Duration::hours(2))
            .unwrap();
        assert_eq!(
            service("key-two").verify(&issued.token),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_garbage_is_invalid() {
        let service = service("k");
        for garbage in ["garbage", "", "a.b", "a.b.c", "....", "Bearer x.y.z"] {
            assert_eq!(
                service.verify(garbage),
                Err(TokenError::Invalid),
                "{garbage:?} should be rejected as invalid"
            );
        }
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let service = service("k");
        let issued = service.issue(AuthorId::new(1)).unwrap();
        let other = service.issue(AuthorId::new(2)).unwrap();

        let parts: Vec<&str> = issued.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(service.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_unsigned_algorithm_is_invalid() {
        // Header {"alg":"none","typ":"JWT"}, payload {"id_autor":1,"exp":9999999999,"iat":0}
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJpZF9hdXRvciI6MSwiZXhwIjo5OTk5OTk5OTk5LCJpYXQiOjB9.";
        assert_eq!(service("k").verify(token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_claims_expires_at() {
        let now = Utc::now();
        let issued = service("k").issue_at(AuthorId::new(3), now).unwrap();
        let expires_at = issued.claims.expires_at().unwrap();
        assert_eq!(expires_at.timestamp(), now.timestamp() + 1800);
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        // Beyond chrono's duration range, then beyond its date range
        for secs in [1_000_000_000_000_000, 9_000_000_000_000] {
            let service = TokenService::new(&JwtConfig {
                secret: "k".to_string(),
                access_token_lifetime: std::time::Duration::from_secs(secs),
            });
            assert!(service.issue(AuthorId::new(1)).is_err());
            assert!(service.lifetime_secs() > 0);
        }
    }
}
