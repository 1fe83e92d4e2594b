// Repository layer for PostgreSQL
// Decision: Runtime-checked queries (query_as) so builds never need a live database
// Decision: Schema is created idempotently at startup instead of a migration tool

use anyhow::Context;
use quill_core::{Result, StoreError};
use sqlx::PgPool;

use super::models::*;

/// Tables for authors and their posts.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS autor (
    id_autor BIGSERIAL PRIMARY KEY,
    nome VARCHAR(100) NOT NULL,
    email VARCHAR(120) NOT NULL UNIQUE,
    senha VARCHAR(255) NOT NULL,
    admin BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE TABLE IF NOT EXISTS postagem (
    id_postagem BIGSERIAL PRIMARY KEY,
    titulo VARCHAR(200) NOT NULL,
    conteudo TEXT,
    data_criacao TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    id_autor BIGINT NOT NULL REFERENCES autor (id_autor)
);

CREATE INDEX IF NOT EXISTS idx_postagem_id_autor ON postagem (id_autor);
"#;

/// Translate constraint violations into domain conflicts
fn map_write_error(err: sqlx::Error, what: &str) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
            return StoreError::conflict(format!("{}: {}", what, db_err.message()));
        }
    }
    StoreError::Backend(anyhow::Error::new(err).context(what.to_string()))
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to create schema")?;
        Ok(())
    }

    // ============================================
    // Authors
    // ============================================

    pub async fn create_author(&self, input: CreateAuthorRow) -> Result<AuthorRow> {
        sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO autor (nome, email, senha, admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id_autor, nome, email, senha, admin
            "#,
        )
        .bind(&input.nome)
        .bind(&input.email)
        .bind(&input.senha)
        .bind(input.admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create author"))
    }

    pub async fn get_author(&self, id: i64) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id_autor, nome, email, senha, admin
            FROM autor
            WHERE id_autor = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get author")?;

        Ok(row)
    }

    pub async fn get_author_by_email(&self, email: &str) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id_autor, nome, email, senha, admin
            FROM autor
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get author by email")?;

        Ok(row)
    }

    /// First author (lowest id) whose name or email equals `identifier`
    pub async fn find_author_by_login(&self, identifier: &str) -> Result<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id_autor, nome, email, senha, admin
            FROM autor
            WHERE nome = $1 OR email = $1
            ORDER BY id_autor
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find author by login")?;

        Ok(row)
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id_autor, nome, email, senha, admin
            FROM autor
            ORDER BY id_autor
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list authors")?;

        Ok(rows)
    }

    pub async fn update_author(&self, id: i64, input: UpdateAuthor) -> Result<Option<AuthorRow>> {
        sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE autor
            SET nome = COALESCE($2, nome),
                email = COALESCE($3, email),
                senha = COALESCE($4, senha),
                admin = COALESCE($5, admin)
            WHERE id_autor = $1
            RETURNING id_autor, nome, email, senha, admin
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.email)
        .bind(&input.senha)
        .bind(input.admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update author"))
    }

    /// Delete an author. Refused (foreign key) while the author still owns posts.
    pub async fn delete_author(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM autor WHERE id_autor = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to delete author"))?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Posts
    // ============================================

    pub async fn create_post(&self, input: CreatePostRow) -> Result<PostRow> {
        sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO postagem (titulo, conteudo, id_autor)
            VALUES ($1, $2, $3)
            RETURNING id_postagem, titulo, conteudo, data_criacao, id_autor
            "#,
        )
        .bind(&input.titulo)
        .bind(&input.conteudo)
        .bind(input.id_autor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create post"))
    }

    pub async fn list_posts(&self) -> Result<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id_postagem, titulo, conteudo, data_criacao, id_autor
            FROM postagem
            ORDER BY id_postagem
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        Ok(rows)
    }

    pub async fn count_posts_by_author(&self, author_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM postagem WHERE id_autor = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count posts")?;

        Ok(count)
    }
}
