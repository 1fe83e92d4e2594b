// Post service

use quill_core::{Post, Result};

use crate::storage::StorageBackend;

#[derive(Clone)]
pub struct PostService {
    storage: StorageBackend,
}

impl PostService {
    pub fn new(storage: StorageBackend) -> Self {
        Self { storage }
    }

    /// All posts, ordered by id
    pub async fn list(&self) -> Result<Vec<Post>> {
        let rows = self.storage.list_posts().await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CreateAuthorRow, CreatePostRow};

    #[tokio::test]
    async fn test_list_posts_in_id_order() {
        let storage = StorageBackend::in_memory();
        let author = storage
            .create_author(CreateAuthorRow {
                nome: "Ana".to_string(),
                email: "a@x.com".to_string(),
                senha: "123456".to_string(),
                admin: false,
            })
            .await
            .unwrap();
        for titulo in ["first", "second"] {
            storage
                .create_post(CreatePostRow {
                    titulo: titulo.to_string(),
                    conteudo: None,
                    id_autor: author.id_autor,
                })
                .await
                .unwrap();
        }

        let posts = PostService::new(storage).list().await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert!(posts[0].id < posts[1].id);
        assert_eq!(posts[0].author_id.get(), author.id_autor);
    }
}
