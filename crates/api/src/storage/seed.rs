// Initial data for a fresh store
// Decision: Seeding is driven by AUTH_ADMIN_* and is idempotent (keyed on the admin email)

use anyhow::{Context, Result};

use super::backend::StorageBackend;
use super::models::{CreateAuthorRow, CreatePostRow};
use super::password::hash_secret;
use crate::auth::AdminConfig;

/// What `seed_admin` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Admin author and welcome post were created
    Created { author_id: i64 },
    /// An author with the admin email already existed; nothing changed
    AlreadyPresent { author_id: i64 },
}

/// Create the admin author and a welcome post unless the admin already exists
pub async fn seed_admin(
    storage: &StorageBackend,
    admin: &AdminConfig,
    hash_secrets: bool,
) -> Result<SeedOutcome> {
    if let Some(existing) = storage
        .get_author_by_email(&admin.email)
        .await
        .context("Failed to look up admin author")?
    {
        tracing::info!(author_id = existing.id_autor, "Admin author already exists");
        return Ok(SeedOutcome::AlreadyPresent {
            author_id: existing.id_autor,
        });
    }

    let senha = if hash_secrets {
        hash_secret(&admin.password)?
    } else {
        admin.password.clone()
    };

    let author = storage
        .create_author(CreateAuthorRow {
            nome: admin.name.clone(),
            email: admin.email.clone(),
            senha,
            admin: true,
        })
        .await
        .context("Failed to create admin author")?;
    tracing::info!(author_id = author.id_autor, email = %author.email, "Admin author created");

    storage
        .create_post(CreatePostRow {
            titulo: "Bem-vindo à API!".to_string(),
            conteudo: Some(
                "Esta é uma postagem de exemplo criada automaticamente.".to_string(),
            ),
            id_autor: author.id_autor,
        })
        .await
        .context("Failed to create welcome post")?;
    tracing::info!("Welcome post created");

    Ok(SeedOutcome::Created {
        author_id: author.id_autor,
    })
}
