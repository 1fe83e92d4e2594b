// Author service
// Decision: Secrets are hashed here (when enabled) so every write path behaves the same
// Decision: Only AuthorProfile leaves this service; secrets never reach the API layer

use quill_core::{Author, AuthorProfile, Result, StoreError};

use crate::storage::{password::hash_secret, CreateAuthorRow, StorageBackend, UpdateAuthor};

#[derive(Clone)]
pub struct AuthorService {
    storage: StorageBackend,
    hash_secrets: bool,
}

impl AuthorService {
    pub fn new(storage: StorageBackend, hash_secrets: bool) -> Self {
        Self {
            storage,
            hash_secrets,
        }
    }

    fn protect(&self, secret: String) -> Result<String> {
        if self.hash_secrets {
            Ok(hash_secret(&secret)?)
        } else {
            Ok(secret)
        }
    }

    pub async fn list(&self) -> Result<Vec<AuthorProfile>> {
        let rows = self.storage.list_authors().await?;
        Ok(rows
            .into_iter()
            .map(|row| Author::from(row).profile())
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<AuthorProfile>> {
        let row = self.storage.get_author(id).await?;
        Ok(row.map(|row| Author::from(row).profile()))
    }

    pub async fn create(&self, mut input: CreateAuthorRow) -> Result<AuthorProfile> {
        input.senha = self.protect(input.senha)?;
        let row = self.storage.create_author(input).await?;
        tracing::info!(author_id = row.id_autor, "Author created");
        Ok(Author::from(row).profile())
    }

    /// Apply a partial update. `Ok(None)` when the author does not exist.
    pub async fn update(&self, id: i64, mut input: UpdateAuthor) -> Result<Option<AuthorProfile>> {
        if input.is_empty() {
            return self.get(id).await;
        }
        input.senha = input.senha.map(|s| self.protect(s)).transpose()?;
        let row = self.storage.update_author(id, input).await?;
        Ok(row.map(|row| Author::from(row).profile()))
    }

    /// `Ok(false)` when the author does not exist
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let posts = self.storage.count_posts_by_author(id).await?;
        if posts > 0 {
            return Err(StoreError::conflict(format!(
                "author {} still owns {} post(s)",
                id, posts
            )));
        }

        let deleted = self.storage.delete_author(id).await?;
        if deleted {
            tracing::info!(author_id = id, "Author deleted");
        }
        Ok(deleted)
    }
}
