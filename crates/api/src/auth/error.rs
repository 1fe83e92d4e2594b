// Authentication errors
// Decision: One taxonomy for both the login route and the verification extractor
// Decision: Token-path failures are always 401; attacker input never yields a 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::jwt::TokenError;
use crate::api::common::ErrorResponse;

/// Authentication error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token in the dedicated header nor in `Authorization: Bearer`
    #[error("Token não foi incluído!")]
    MissingToken,

    /// Malformed token or bad signature
    #[error("Token é inválido")]
    InvalidToken,

    /// Token past its expiry
    #[error("Token expirado")]
    ExpiredToken,

    /// Valid token whose author no longer exists
    #[error("Autor do token não encontrado")]
    UnknownSubject,

    /// Any other verification failure, with its cause
    #[error("Falha ao verificar o token: {0}")]
    VerificationError(String),

    /// Login without identifier or secret
    #[error("Credenciais não informadas")]
    MissingCredentials,

    /// Identifier and secret do not match any author
    #[error("Login inválido")]
    InvalidCredentials,

    /// Login-side failure (store or signing); the cause is logged, not returned
    #[error("Erro interno do servidor")]
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable error kind (the `erro` field)
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MissingToken",
            AuthError::InvalidToken => "InvalidToken",
            AuthError::ExpiredToken => "ExpiredToken",
            AuthError::UnknownSubject => "UnknownSubject",
            AuthError::VerificationError(_) => "VerificationError",
            AuthError::MissingCredentials => "MissingCredentials",
            AuthError::InvalidCredentials => "InvalidCredentials",
            AuthError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        AuthError::Internal(cause.to_string())
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse::new(self.kind(), self.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Verification(cause) => AuthError::VerificationError(cause),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(cause) = &self {
            tracing::error!(error = %cause, "Authentication failed internally");
        }
        (self.status(), Json(self.to_body())).into_response()
    }
}
