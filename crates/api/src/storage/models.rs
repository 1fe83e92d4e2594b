// Database row types and write inputs
//
// Column names follow the relational schema (`autor`, `postagem`).

use chrono::{DateTime, Utc};
use quill_core::{Author, AuthorId, Post, PostId};
use sqlx::FromRow;

// ============================================
// Authors
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id_autor: i64,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub admin: bool,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId::new(row.id_autor),
            name: row.nome,
            email: row.email,
            secret: row.senha,
            is_admin: row.admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuthorRow {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub admin: bool,
}

/// Partial author update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAuthor {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub admin: Option<bool>,
}

impl UpdateAuthor {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.email.is_none() && self.senha.is_none() && self.admin.is_none()
    }
}

// ============================================
// Posts
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id_postagem: i64,
    pub titulo: String,
    pub conteudo: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub id_autor: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id_postagem),
            title: row.titulo,
            content: row.conteudo,
            created_at: row.data_criacao,
            author_id: AuthorId::new(row.id_autor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostRow {
    pub titulo: String,
    pub conteudo: Option<String>,
    pub id_autor: i64,
}
