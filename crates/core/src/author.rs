// Author domain types
//
// An author is the authenticable principal of the service: it owns posts and
// logs in with its name or email plus a secret.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Stable identifier of an author (`id_autor` on the wire).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for AuthorId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<AuthorId> for i64 {
    fn from(value: AuthorId) -> Self {
        value.0
    }
}

/// Author record as held by the credential store.
///
/// The secret is opaque to everything except credential matching. It is never
/// serialized and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    pub secret: String,
    pub is_admin: bool,
}

impl Author {
    /// Shaped, secret-free representation used in response bodies.
    pub fn profile(&self) -> AuthorProfile {
        AuthorProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }

    /// Whether `identifier` names this author (case-sensitive name or email).
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.name == identifier || self.email == identifier
    }
}

impl std::fmt::Debug for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Author")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Public view of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthorProfile {
    /// Unique identifier of the author.
    #[serde(rename = "id_autor")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub id: AuthorId,
    /// Display name. Also accepted as a login identifier.
    #[serde(rename = "nome")]
    #[cfg_attr(feature = "openapi", schema(example = "Cleverson Passos"))]
    pub name: String,
    /// Unique email address.
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: String,
    /// Whether the author has administrative rights.
    #[serde(rename = "admin")]
    pub is_admin: bool,
}

impl From<&Author> for AuthorProfile {
    fn from(author: &Author) -> Self {
        author.profile()
    }
}
