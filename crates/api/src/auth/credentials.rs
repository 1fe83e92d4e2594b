// Login credential extraction
// Decision: JSON body wins when the content type says JSON; otherwise HTTP Basic
// Decision: A body without a JSON content type is still tried as JSON when no Basic header is sent
// Decision: `email` is the identifier; `nome` is accepted when `email` is absent

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use utoipa::ToSchema;

use super::error::AuthError;

/// Login request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login identifier (email)
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    /// Alternative identifier (display name), used when `email` is absent
    pub nome: Option<String>,
    /// Secret
    #[schema(example = "123456")]
    pub senha: Option<String>,
}

/// Where the credentials came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Json,
    Basic,
}

/// Identifier and secret presented at login
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub identifier: String,
    pub secret: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            let mime = v.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn basic_payload(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, payload) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("basic")
        .then_some(payload.trim())
}

impl LoginCredentials {
    /// Parse a JSON login body
    pub fn from_json(body: &[u8]) -> Result<Self, AuthError> {
        let request: LoginRequest =
            serde_json::from_slice(body).map_err(|_| AuthError::MissingCredentials)?;

        let identifier = non_empty(request.email)
            .or_else(|| non_empty(request.nome))
            .ok_or(AuthError::MissingCredentials)?;
        let secret = non_empty(request.senha).ok_or(AuthError::MissingCredentials)?;

        Ok(Self {
            identifier,
            secret,
            source: CredentialSource::Json,
        })
    }

    /// Parse the payload of an `Authorization: Basic` header
    pub fn from_basic(payload: &str) -> Result<Self, AuthError> {
        let decoded = STANDARD
            .decode(payload)
            .map_err(|_| AuthError::MissingCredentials)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MissingCredentials)?;

        let (identifier, secret) = decoded
            .split_once(':')
            .ok_or(AuthError::MissingCredentials)?;
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            source: CredentialSource::Basic,
        })
    }

    /// Detect the presentation mode and extract the credentials
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> Result<Self, AuthError> {
        if is_json_content(headers) {
            return Self::from_json(body);
        }
        if let Some(payload) = basic_payload(headers) {
            return Self::from_basic(payload);
        }
        if !body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_json(body);
        }
        Err(AuthError::MissingCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    fn basic_headers(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode(format!("{user}:{pass}"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {encoded}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_json_credentials() {
        let creds = LoginCredentials::from_request(
            &json_headers(),
            br#"{"email":"a@x.com","senha":"123456"}"#,
        )
        .unwrap();
        assert_eq!(creds.identifier, "a@x.com");
        assert_eq!(creds.secret, "123456");
        assert_eq!(creds.source, CredentialSource::Json);
    }

    #[test]
    fn test_json_name_fallback() {
        let creds =
            LoginCredentials::from_json(br#"{"nome":"Ana","senha":"123456"}"#).unwrap();
        assert_eq!(creds.identifier, "Ana");

        let creds = LoginCredentials::from_json(
            br#"{"email":"","nome":"Ana","senha":"123456"}"#,
        )
        .unwrap();
        assert_eq!(creds.identifier, "Ana");
    }

    #[test]
    fn test_json_missing_fields() {
        let bodies: [&[u8]; 5] = [
            br#"{"senha":"123456"}"#,
            br#"{"email":"a@x.com"}"#,
            br#"{"email":"a@x.com","senha":""}"#,
            b"not json",
            b"",
        ];
        for body in bodies {
            assert_eq!(
                LoginCredentials::from_request(&json_headers(), body),
                Err(AuthError::MissingCredentials)
            );
        }
    }

    #[test]
    fn test_basic_credentials() {
        let creds =
            LoginCredentials::from_request(&basic_headers("a@x.com", "12:34"), b"").unwrap();
        assert_eq!(creds.identifier, "a@x.com");
        // Only the first colon separates identifier from secret
        assert_eq!(creds.secret, "12:34");
        assert_eq!(creds.source, CredentialSource::Basic);
    }

    #[test]
    fn test_basic_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic !!!not-base64"),
        );
        assert_eq!(
            LoginCredentials::from_request(&headers, b""),
            Err(AuthError::MissingCredentials)
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", STANDARD.encode("no-colon"))).unwrap(),
        );
        assert_eq!(
            LoginCredentials::from_request(&headers, b""),
            Err(AuthError::MissingCredentials)
        );

        assert_eq!(
            LoginCredentials::from_request(&basic_headers("", "pw"), b""),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_json_content_type_wins_over_basic() {
        let mut headers = basic_headers("basic@x.com", "basic-pw");
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let creds = LoginCredentials::from_request(
            &headers,
            br#"{"email":"json@x.com","senha":"json-pw"}"#,
        )
        .unwrap();
        assert_eq!(creds.identifier, "json@x.com");
        assert_eq!(creds.source, CredentialSource::Json);
    }

    #[test]
    fn test_untyped_body_is_tried_as_json() {
        let creds = LoginCredentials::from_request(
            &HeaderMap::new(),
            br#"{"email":"a@x.com","senha":"123456"}"#,
        )
        .unwrap();
        assert_eq!(creds.source, CredentialSource::Json);
    }

    #[test]
    fn test_nothing_presented() {
        assert_eq!(
            LoginCredentials::from_request(&HeaderMap::new(), b"  "),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = LoginCredentials::from_basic(&STANDARD.encode("ana:hunter2")).unwrap();
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
