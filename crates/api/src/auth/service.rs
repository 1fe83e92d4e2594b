// Authentication service
// Decision: Depends only on CredentialStore + TokenService, both injected at construction
// Decision: Credential mismatch and unknown identifier are indistinguishable to the caller

use quill_core::{Author, CredentialStore};
use std::sync::Arc;

use super::credentials::LoginCredentials;
use super::error::AuthError;
use super::jwt::{IssuedToken, TokenService};
use crate::storage::password::verify_secret;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub author: Author,
    pub token: IssuedToken,
}

/// Issues tokens for matching credentials and resolves tokens back to authors
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Match credentials against the store.
    ///
    /// Returns `Ok(None)` when no author has that identifier or the secret
    /// does not match.
    pub async fn match_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<Author>, AuthError> {
        let author = self
            .store
            .find_author_by_login(identifier)
            .await
            .map_err(AuthError::internal)?;

        let Some(author) = author else {
            return Ok(None);
        };

        // Values that are not complete Argon2 hashes are compared as plaintext
        let matches = verify_secret(secret, &author.secret);

        Ok(matches.then_some(author))
    }

    /// Validate credentials and issue a token
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, AuthError> {
        let author = self
            .match_credentials(&credentials.identifier, &credentials.secret)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.tokens.issue(author.id).map_err(AuthError::internal)?;

        tracing::info!(
            author_id = %author.id,
            expires_at = ?token.claims.expires_at(),
            "Token issued"
        );
        Ok(LoginOutcome { author, token })
    }

    /// Verify a token and resolve its subject
    pub async fn authenticate(&self, token: &str) -> Result<Author, AuthError> {
        let claims = self.tokens.verify(token)?;

        self.store
            .get_author(claims.sub)
            .await
            .map_err(|e| AuthError::VerificationError(e.to_string()))?
            .ok_or(AuthError::UnknownSubject)
    }
}
