// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Ids come from monotonic counters and are never reused, so a token
//           issued for a deleted author can never resolve to a newer one
//
// This implementation mirrors the PostgreSQL repository API backed by ordered
// maps, allowing the server to run without a database for development and tests.

use chrono::Utc;
use parking_lot::RwLock;
use quill_core::{Result, StoreError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
pub struct InMemoryDatabase {
    authors: RwLock<BTreeMap<i64, AuthorRow>>,
    posts: RwLock<BTreeMap<i64, PostRow>>,
    next_author_id: AtomicI64,
    next_post_id: AtomicI64,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self {
            authors: RwLock::new(BTreeMap::new()),
            posts: RwLock::new(BTreeMap::new()),
            next_author_id: AtomicI64::new(1),
            next_post_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        let mut authors = self.authors.write();
        if authors.values().any(|a| a.email == input.email) {
            return Err(StoreError::conflict(format!(
                "email already registered: {}",
                input.email
            )));
        }

        let id = self.next_author_id.fetch_add(1, Ordering::SeqCst);
        let row = AuthorRow {
            id_autor: id,
            nome: input.nome,
            email: input.email,
            senha: input.senha,
            admin: input.admin,
        };
        authors.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_author(&self, id: i64) -> Result<Option<AuthorRow>> {
        Ok(self.authors.read().get(&id).cloned())
    }

    pub async fn get_author_by_email(&self, email: &str) -> Result<Option<AuthorRow>> {
        Ok(self
            .authors
            .read()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    /// First author (lowest id) whose name or email equals `identifier`
    pub async fn find_author_by_login(&self, identifier: &str) -> Result<Option<AuthorRow>> {
        Ok(self
            .authors
            .read()
            .values()
            .find(|a| a.nome == identifier || a.email == identifier)
            .cloned())
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        Ok(self.authors.read().values().cloned().collect())
    }

    pub async fn update_author(&self, id: i64, input: UpdateAuthor) -> Result<Option<AuthorRow>> {
        let mut authors = self.authors.write();
        if !authors.contains_key(&id) {
            return Ok(None);
        }

        if let Some(email) = &input.email {
            if authors
                .values()
                .any(|a| a.id_autor != id && &a.email == email)
            {
                return Err(StoreError::conflict(format!(
                    "email already registered: {}",
                    email
                )));
            }
        }

        let Some(author) = authors.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nome) = input.nome {
            author.nome = nome;
        }
        if let Some(email) = input.email {
            author.email = email;
        }
        if let Some(senha) = input.senha {
            author.senha = senha;
        }
        if let Some(admin) = input.admin {
            author.admin = admin;
        }
        Ok(Some(author.clone()))
    }

    /// Delete an author. Refused while the author still owns posts.
    pub async fn delete_author(&self, id: i64) -> Result<bool> {
        let posts = self.posts.read();
        let mut authors = self.authors.write();
        if !authors.contains_key(&id) {
            return Ok(false);
        }
        if posts.values().any(|p| p.id_autor == id) {
            return Err(StoreError::conflict(format!(
                "author {} still owns posts",
                id
            )));
        }
        authors.remove(&id);
        Ok(true)
    }

    // ============================================
    // Posts
    // ============================================

    pub async fn create_post(&self, input: CreatePostRow) -> Result<PostRow> {
        // Lock order (posts, then authors) matches delete_author
        let mut posts = self.posts.write();
        if !self.authors.read().contains_key(&input.id_autor) {
            return Err(StoreError::conflict(format!(
                "author {} does not exist",
                input.id_autor
            )));
        }

        let id = self.next_post_id.fetch_add(1, Ordering::SeqCst);
        let row = PostRow {
            id_postagem: id,
            titulo: input.titulo,
            conteudo: input.conteudo,
            data_criacao: Utc::now(),
            id_autor: input.id_autor,
        };
        posts.insert(id, row.clone());
        Ok(row)
    }

    pub async fn list_posts(&self) -> Result<Vec<PostRow>> {
        Ok(self.posts.read().values().cloned().collect())
    }

    pub async fn count_posts_by_author(&self, author_id: i64) -> Result<i64> {
        Ok(self
            .posts
            .read()
            .values()
            .filter(|p| p.id_autor == author_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(nome: &str, email: &str) -> CreateAuthorRow {
        CreateAuthorRow {
            nome: nome.to_string(),
            email: email.to_string(),
            senha: "123456".to_string(),
            admin: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_author() {
        let db = InMemoryDatabase::new();
        let row = db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        assert_eq!(row.id_autor, 1);

        let fetched = db.get_author(row.id_autor).await.unwrap().unwrap();
        assert_eq!(fetched.email, "ana@x.com");
        assert!(db.get_author(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = InMemoryDatabase::new();
        db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        let err = db
            .create_author(author("Outra Ana", "ana@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_find_by_login_matches_name_or_email_first_found() {
        let db = InMemoryDatabase::new();
        let first = db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        db.create_author(author("Ana", "ana2@x.com")).await.unwrap();

        let by_name = db.find_author_by_login("Ana").await.unwrap().unwrap();
        assert_eq!(by_name.id_autor, first.id_autor);

        let by_email = db.find_author_by_login("ana2@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.nome, "Ana");

        assert!(db.find_author_by_login("ANA@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let db = InMemoryDatabase::new();
        let row = db.create_author(author("Ana", "ana@x.com")).await.unwrap();

        let updated = db
            .update_author(
                row.id_autor,
                UpdateAuthor {
                    nome: Some("Ana Maria".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.nome, "Ana Maria");
        assert_eq!(updated.email, "ana@x.com");
        assert_eq!(updated.senha, "123456");
        assert!(db
            .update_author(42, UpdateAuthor::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_conflict() {
        let db = InMemoryDatabase::new();
        db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        let bia = db.create_author(author("Bia", "bia@x.com")).await.unwrap();

        let err = db
            .update_author(
                bia.id_autor,
                UpdateAuthor {
                    email: Some("ana@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_unknown_author_with_taken_email_is_none() {
        let db = InMemoryDatabase::new();
        db.create_author(author("Ana", "ana@x.com")).await.unwrap();

        let updated = db
            .update_author(
                999,
                UpdateAuthor {
                    email: Some("ana@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_refused_while_author_owns_posts() {
        let db = InMemoryDatabase::new();
        let row = db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        db.create_post(CreatePostRow {
            titulo: "Primeira".to_string(),
            conteudo: None,
            id_autor: row.id_autor,
        })
        .await
        .unwrap();

        assert_eq!(db.count_posts_by_author(row.id_autor).await.unwrap(), 1);
        assert!(db.delete_author(row.id_autor).await.unwrap_err().is_conflict());
        assert!(!db.delete_author(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let db = InMemoryDatabase::new();
        let first = db.create_author(author("Ana", "ana@x.com")).await.unwrap();
        assert!(db.delete_author(first.id_autor).await.unwrap());

        let second = db.create_author(author("Bia", "bia@x.com")).await.unwrap();
        assert_ne!(first.id_autor, second.id_autor);
    }
}
