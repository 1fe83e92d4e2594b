// Router assembly and server configuration
// Decision: Router construction lives in the library so integration tests drive the real app
// Decision: /health and the OpenAPI document are never prefixed or authenticated

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;

use crate::api;
use crate::auth::{self, AuthConfig, AuthState};
use crate::openapi::ApiDoc;
use crate::services::{AuthorService, PostService};
use crate::storage::StorageBackend;

/// Default listen address
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:5000";

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
    /// Prefix for every API route (e.g. "/api"); empty for none
    pub api_prefix: String,
    /// Origins allowed by CORS; empty disables the CORS layer
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_HTTP_ADDR.to_string(),
            api_prefix: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("HTTP_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());

        let api_prefix = lookup("API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_default();

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins: Vec<HeaderValue> = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            addr,
            api_prefix,
            cors_origins,
        }
    }
}

/// "api/", "/api" and "/api/" all become "/api"; "/" and "" mean no prefix
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete application router
pub fn build_app(storage: StorageBackend, auth_config: AuthConfig, api_prefix: &str) -> Router {
    let hash_secrets = auth_config.hash_secrets;
    let auth_state = AuthState::new(auth_config, Arc::new(storage.clone()));

    let authors_state = api::authors::AppState::new(
        AuthorService::new(storage.clone(), hash_secrets),
        auth_state.clone(),
    );
    let posts_state =
        api::posts::AppState::new(PostService::new(storage.clone()), auth_state.clone());
    let health_state = HealthState {
        storage: storage.kind(),
    };

    let api_routes = Router::new()
        .merge(auth::routes(auth_state))
        .merge(api::authors::routes(authors_state))
        .merge(api::posts::routes(posts_state));

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .route("/api-doc/openapi.json", get(openapi_json))
        .merge(build_router_with_prefix(api_routes, api_prefix))
}

/// Build router with optional API prefix
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

/// CORS layer for the configured origins, if any
pub fn cors_layer(origins: &[HeaderValue], token_header: &str) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let mut allowed_headers = vec![
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ORIGIN,
    ];
    if let Ok(name) = HeaderName::from_bytes(token_header.as_bytes()) {
        allowed_headers.push(name);
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(allowed_headers)
            .expose_headers([header::WWW_AUTHENTICATE]),
    )
}
