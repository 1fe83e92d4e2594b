// Store traits consumed by the authentication layer
//
// Decision: The auth layer only needs two reads, so the contract stays that small.
// Implementations live next to their storage (PostgreSQL, in-memory).

use async_trait::async_trait;

use crate::author::{Author, AuthorId};
use crate::error::Result;

// ============================================================================
// CredentialStore - identity lookups for login and token verification
// ============================================================================

/// Read access to identity records.
///
/// Used at login to match presented credentials and on every protected request
/// to resolve a token subject back to an author.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an author by id
    async fn get_author(&self, id: AuthorId) -> Result<Option<Author>>;

    /// Find the author whose name or email equals `identifier`.
    ///
    /// Matching is case-sensitive. When several records match, the one with
    /// the lowest id is returned.
    async fn find_author_by_login(&self, identifier: &str) -> Result<Option<Author>>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    async fn get_author(&self, id: AuthorId) -> Result<Option<Author>> {
        (**self).get_author(id).await
    }

    async fn find_author_by_login(&self, identifier: &str) -> Result<Option<Author>> {
        (**self).find_author_by_login(identifier).await
    }
}
