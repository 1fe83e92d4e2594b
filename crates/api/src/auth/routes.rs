// Authentication HTTP routes
// Decision: A single login route accepting JSON or HTTP Basic credentials
// Decision: Only a Basic-path credential mismatch carries the WWW-Authenticate challenge

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use quill_core::AuthorProfile;
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    credentials::{CredentialSource, LoginCredentials, LoginRequest},
    error::AuthError,
    middleware::AuthState,
};
use crate::api::common::{ErrorResponse, MessageResponse};

/// Token response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token
    #[serde(rename = "Token")]
    pub token: String,
    /// The authenticated author
    pub usuario: AuthorProfile,
    /// Token lifetime in seconds
    #[schema(example = 1800)]
    pub expires_in: i64,
}

/// Login failure, optionally carrying a Basic challenge
#[derive(Debug)]
pub struct LoginRejection {
    pub error: AuthError,
    pub challenge: Option<HeaderValue>,
}

impl From<AuthError> for LoginRejection {
    fn from(error: AuthError) -> Self {
        Self {
            error,
            challenge: None,
        }
    }
}

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        let mut response = self.error.into_response();
        if let Some(challenge) = self.challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }
        response
    }
}

/// `Basic realm="<realm>"`, falling back to the default realm if the
/// configured one is not a valid header value
pub fn basic_challenge(realm: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic realm=\"Login obrigatorio\""))
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/login", get(login_hint).post(login))
        .with_state(state)
}

/// POST /login - Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, description = "JSON credentials; HTTP Basic is accepted as well"),
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Credentials missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LoginResponse>, LoginRejection> {
    let credentials = LoginCredentials::from_request(&headers, &body)?;

    match state.service.login(&credentials).await {
        Ok(outcome) => Ok(Json(LoginResponse {
            token: outcome.token.token,
            usuario: outcome.author.profile(),
            expires_in: outcome.token.expires_in,
        })),
        Err(error) => {
            tracing::debug!(
                kind = error.kind(),
                identifier = %credentials.identifier,
                "Login rejected"
            );
            let challenge = (error == AuthError::InvalidCredentials
                && credentials.source == CredentialSource::Basic)
                .then(|| basic_challenge(&state.config.basic_realm));
            Err(LoginRejection { error, challenge })
        }
    }
}

/// GET /login - Usage hint
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "How to log in", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn login_hint(State(state): State<AuthState>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Envie POST /login com JSON {{\"email\", \"senha\"}} ou HTTP Basic; \
         use o token no cabeçalho {} ou em Authorization: Bearer",
        state.token_header
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_challenge() {
        assert_eq!(
            basic_challenge("Login obrigatorio"),
            "Basic realm=\"Login obrigatorio\""
        );
        assert_eq!(basic_challenge("quill"), "Basic realm=\"quill\"");
        // Control characters cannot appear in a header value
        assert_eq!(
            basic_challenge("bad\nrealm"),
            "Basic realm=\"Login obrigatorio\""
        );
    }

    #[test]
    fn test_login_response_shape() {
        let response = LoginResponse {
            token: "t".to_string(),
            usuario: AuthorProfile {
                id: quill_core::AuthorId::new(1),
                name: "Ana".to_string(),
                email: "a@x.com".to_string(),
                is_admin: false,
            },
            expires_in: 1800,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Token"], "t");
        assert_eq!(json["usuario"]["id_autor"], 1);
        assert_eq!(json["expires_in"], 1800);
        assert!(json["usuario"].get("senha").is_none());
    }
}
