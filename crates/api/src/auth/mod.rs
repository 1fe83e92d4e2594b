// Authentication module
//
// - config: AUTH_* environment configuration
// - jwt: HS256 token issuance and verification
// - credentials: login credential extraction (JSON or HTTP Basic)
// - service: credential matching and token resolution over a CredentialStore
// - middleware: the AuthUser extractor gating protected routes
// - routes: POST/GET /login

pub mod config;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod routes;
pub mod service;

pub use config::{AdminConfig, AuthConfig, JwtConfig};
pub use credentials::{CredentialSource, LoginCredentials, LoginRequest};
pub use error::AuthError;
pub use jwt::{IssuedToken, TokenClaims, TokenError, TokenService};
pub use middleware::{extract_token, AuthState, AuthUser, PresentedToken};
pub use routes::{routes, LoginResponse};
pub use service::{AuthService, LoginOutcome};
