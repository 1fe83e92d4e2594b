// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config; SECRET_KEY accepted as a fallback signing key
// Decision: Token lifetime defaults to 30 minutes
// Decision: Secrets are redacted from Debug output so config can be logged safely

use std::time::Duration;

/// Default dedicated token header
pub const DEFAULT_TOKEN_HEADER: &str = "x-access-token";

/// Default realm sent in Basic-auth challenges
pub const DEFAULT_BASIC_REALM: &str = "Login obrigatorio";

/// Default token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Longest accepted token lifetime (one year)
pub const MAX_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Admin author to seed into an empty store
#[derive(Clone)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HS256)
    pub secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .finish()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Dedicated header checked before `Authorization: Bearer`
    pub token_header: String,
    /// Realm for `WWW-Authenticate: Basic` challenges
    pub basic_realm: String,
    /// Store Argon2 hashes instead of plaintext secrets on create/update
    pub hash_secrets: bool,
    /// Admin author to seed (optional)
    pub admin: Option<AdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            basic_realm: DEFAULT_BASIC_REALM.to_string(),
            hash_secrets: false,
            admin: None,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

/// Random per-process signing key (tokens stop verifying after a restart)
fn generate_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = non_empty("AUTH_JWT_SECRET")
            .or_else(|| non_empty("SECRET_KEY"))
            .unwrap_or_else(|| {
                tracing::warn!(
                    "AUTH_JWT_SECRET not set, using a random signing key for this process"
                );
                generate_secret()
            });

        let access_token_lifetime = non_empty("AUTH_JWT_ACCESS_TOKEN_LIFETIME")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .map(|lifetime| {
                if lifetime > MAX_ACCESS_TOKEN_LIFETIME {
                    tracing::warn!(
                        requested_secs = lifetime.as_secs(),
                        "AUTH_JWT_ACCESS_TOKEN_LIFETIME too long, capping at one year"
                    );
                    MAX_ACCESS_TOKEN_LIFETIME
                } else {
                    lifetime
                }
            })
            .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME);

        let token_header = non_empty("AUTH_TOKEN_HEADER")
            .map(|h| h.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

        let basic_realm =
            non_empty("AUTH_BASIC_REALM").unwrap_or_else(|| DEFAULT_BASIC_REALM.to_string());

        let hash_secrets = lookup("AUTH_HASH_SECRETS")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        let admin = match (
            non_empty("AUTH_ADMIN_EMAIL"),
            non_empty("AUTH_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminConfig {
                name: non_empty("AUTH_ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Self {
            jwt: JwtConfig {
                secret,
                access_token_lifetime,
            },
            token_header,
            basic_realm,
            hash_secrets,
            admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AuthConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(1800));
        assert_eq!(config.token_header, "x-access-token");
        assert_eq!(config.basic_realm, DEFAULT_BASIC_REALM);
        assert!(!config.hash_secrets);
        assert!(config.admin.is_none());
        // Random 32-byte key, hex encoded
        assert_eq!(config.jwt.secret.len(), 64);
    }

    #[test]
    fn test_random_secret_differs_per_load() {
        let a = AuthConfig::from_lookup(lookup_from(&[]));
        let b = AuthConfig::from_lookup(lookup_from(&[]));
        assert_ne!(a.jwt.secret, b.jwt.secret);
    }

    #[test]
    fn test_secret_key_fallback() {
        let config = AuthConfig::from_lookup(lookup_from(&[("SECRET_KEY", "legacy-key")]));
        assert_eq!(config.jwt.secret, "legacy-key");

        let config = AuthConfig::from_lookup(lookup_from(&[
            ("SECRET_KEY", "legacy-key"),
            ("AUTH_JWT_SECRET", "primary-key"),
        ]));
        assert_eq!(config.jwt.secret, "primary-key");
    }

    #[test]
    fn test_lifetime_parsing() {
        let config =
            AuthConfig::from_lookup(lookup_from(&[("AUTH_JWT_ACCESS_TOKEN_LIFETIME", "60")]));
        assert_eq!(config.jwt.access_token_lifetime, Duration::from_secs(60));

        for bad in ["0", "-5", "soon"] {
            let config =
                AuthConfig::from_lookup(lookup_from(&[("AUTH_JWT_ACCESS_TOKEN_LIFETIME", bad)]));
            assert_eq!(
                config.jwt.access_token_lifetime,
                DEFAULT_ACCESS_TOKEN_LIFETIME,
                "{bad} should fall back to the default"
            );
        }
    }

    #[test]
    fn test_lifetime_is_capped() {
        let config = AuthConfig::from_lookup(lookup_from(&[(
            "AUTH_JWT_ACCESS_TOKEN_LIFETIME",
            "1000000000000000",
        )]));
        assert_eq!(config.jwt.access_token_lifetime, MAX_ACCESS_TOKEN_LIFETIME);
    }

    #[test]
    fn test_flags_and_header() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("AUTH_HASH_SECRETS", "TRUE"),
            ("AUTH_TOKEN_HEADER", "X-Api-Token"),
            ("AUTH_BASIC_REALM", "quill"),
        ]));
        assert!(config.hash_secrets);
        assert_eq!(config.token_header, "x-api-token");
        assert_eq!(config.basic_realm, "quill");

        let config = AuthConfig::from_lookup(lookup_from(&[("AUTH_HASH_SECRETS", "no")]));
        assert!(!config.hash_secrets);
    }

    #[test]
    fn test_admin_requires_email_and_password() {
        let config = AuthConfig::from_lookup(lookup_from(&[("AUTH_ADMIN_EMAIL", "a@x.com")]));
        assert!(config.admin.is_none());

        let config = AuthConfig::from_lookup(lookup_from(&[
            ("AUTH_ADMIN_EMAIL", "a@x.com"),
            ("AUTH_ADMIN_PASSWORD", "123456"),
        ]));
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "a@x.com");
        assert_eq!(admin.password, "123456");
        assert_eq!(admin.name, "Admin");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("AUTH_JWT_SECRET", "super-secret-signing-key"),
            ("AUTH_ADMIN_EMAIL", "a@x.com"),
            ("AUTH_ADMIN_PASSWORD", "admin-password"),
        ]));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-signing-key"));
        assert!(!debug.contains("admin-password"));
        assert!(debug.contains("<redacted>"));
    }
}
