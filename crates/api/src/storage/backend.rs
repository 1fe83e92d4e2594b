// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use async_trait::async_trait;
use quill_core::{Author, AuthorId, CredentialStore, Result};
use std::sync::Arc;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and make sure
    /// the schema exists
    pub async fn postgres(database_url: &str) -> anyhow::Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.ensure_schema().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Short backend name for logs and the health endpoint
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        match self {
            Self::Postgres(db) => db.create_author(input).await,
            Self::InMemory(db) => db.create_author(input).await,
        }
    }

    pub async fn get_author(&self, id: i64) -> Result<Option<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.get_author(id).await,
            Self::InMemory(db) => db.get_author(id).await,
        }
    }

    pub async fn get_author_by_email(&self, email: &str) -> Result<Option<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.get_author_by_email(email).await,
            Self::InMemory(db) => db.get_author_by_email(email).await,
        }
    }

    pub async fn find_author_by_login(&self, identifier: &str) -> Result<Option<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.find_author_by_login(identifier).await,
            Self::InMemory(db) => db.find_author_by_login(identifier).await,
        }
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.list_authors().await,
            Self::InMemory(db) => db.list_authors().await,
        }
    }

    pub async fn update_author(&self, id: i64, input: UpdateAuthor) -> Result<Option<AuthorRow>> {
        match self {
            Self::Postgres(db) => db.update_author(id, input).await,
            Self::InMemory(db) => db.update_author(id, input).await,
        }
    }

    pub async fn delete_author(&self, id: i64) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_author(id).await,
            Self::InMemory(db) => db.delete_author(id).await,
        }
    }

    // ============================================
    // Posts
    // ============================================

    pub async fn create_post(&self, input: CreatePostRow) -> Result<PostRow> {
        match self {
            Self::Postgres(db) => db.create_post(input).await,
            Self::InMemory(db) => db.create_post(input).await,
        }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostRow>> {
        match self {
            Self::Postgres(db) => db.list_posts().await,
            Self::InMemory(db) => db.list_posts().await,
        }
    }

    pub async fn count_posts_by_author(&self, author_id: i64) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_posts_by_author(author_id).await,
            Self::InMemory(db) => db.count_posts_by_author(author_id).await,
        }
    }
}

#[async_trait]
impl CredentialStore for StorageBackend {
    async fn get_author(&self, id: AuthorId) -> Result<Option<Author>> {
        Ok(StorageBackend::get_author(self, id.get())
            .await?
            .map(Author::from))
    }

    async fn find_author_by_login(&self, identifier: &str) -> Result<Option<Author>> {
        Ok(StorageBackend::find_author_by_login(self, identifier)
            .await?
            .map(Author::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_backend_is_dev_mode() {
        let backend = StorageBackend::in_memory();
        assert!(backend.is_dev_mode());
        assert_eq!(backend.kind(), "memory");
    }

    #[tokio::test]
    async fn test_credential_store_resolves_authors() {
        let backend = StorageBackend::in_memory();
        let row = backend
            .create_author(CreateAuthorRow {
                nome: "Ana".to_string(),
                email: "a@x.com".to_string(),
                senha: "123456".to_string(),
                admin: true,
            })
            .await
            .unwrap();

        let store: &dyn CredentialStore = &backend;
        let author = store
            .get_author(AuthorId::new(row.id_autor))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(author.name, "Ana");
        assert!(author.is_admin);

        let by_login = store.find_author_by_login("a@x.com").await.unwrap();
        assert_eq!(by_login.map(|a| a.id), Some(author.id));
    }
}
