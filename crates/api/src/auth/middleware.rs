// Authentication extractor
// Decision: The dedicated token header wins over `Authorization: Bearer`
// Decision: The resolved author reaches handlers as an explicit `AuthUser` parameter

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, HeaderName},
};
use quill_core::{Author, AuthorId, CredentialStore};
use std::sync::Arc;

use super::{config::AuthConfig, error::AuthError, jwt::TokenService, service::AuthService};

/// Authenticated author extracted from the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<Author> for AuthUser {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            is_admin: author.is_admin,
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
    pub service: Arc<AuthService>,
    pub token_header: HeaderName,
}

impl AuthState {
    pub fn new(config: AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        let tokens = TokenService::new(&config.jwt);
        let service = Arc::new(AuthService::new(store, tokens));

        let token_header = HeaderName::from_bytes(config.token_header.as_bytes())
            .unwrap_or_else(|_| {
                tracing::warn!(
                    header = %config.token_header,
                    "Invalid AUTH_TOKEN_HEADER, using x-access-token"
                );
                HeaderName::from_static(super::config::DEFAULT_TOKEN_HEADER)
            });

        Self {
            config: Arc::new(config),
            service,
            token_header,
        }
    }
}

/// What a request presents as its access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentedToken<'a> {
    Missing,
    /// A token header is present but its bytes are not visible ASCII
    Unreadable,
    Token(&'a str),
}

/// Locate the presented token.
///
/// The dedicated header is checked first; an empty value there falls through
/// to `Authorization: Bearer`. An unreadable value in either header is never
/// treated as absent.
pub fn extract_token<'a>(
    headers: &'a HeaderMap,
    token_header: &HeaderName,
) -> PresentedToken<'a> {
    if let Some(value) = headers.get(token_header) {
        let Ok(value) = value.to_str() else {
            return PresentedToken::Unreadable;
        };
        let value = value.trim();
        if !value.is_empty() {
            return PresentedToken::Token(value);
        }
    }

    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return PresentedToken::Missing;
    };
    let Ok(value) = value.to_str() else {
        return PresentedToken::Unreadable;
    };
    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            match token.trim() {
                "" => PresentedToken::Missing,
                token => PresentedToken::Token(token),
            }
        }
        _ => PresentedToken::Missing,
    }
}

/// Extractor for the authenticated author.
/// Required: rejects with 401 when no valid token is presented.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate_request(&parts.headers, &auth_state).await
    }
}

async fn authenticate_request(
    headers: &HeaderMap,
    auth_state: &AuthState,
) -> Result<AuthUser, AuthError> {
    let result = match extract_token(headers, &auth_state.token_header) {
        PresentedToken::Token(token) => auth_state.service.authenticate(token).await,
        PresentedToken::Unreadable => Err(AuthError::InvalidToken),
        PresentedToken::Missing => Err(AuthError::MissingToken),
    };

    result.map(AuthUser::from).map_err(|e| {
        tracing::debug!(kind = e.kind(), "Token verification failed: {}", e);
        e
    })
}
