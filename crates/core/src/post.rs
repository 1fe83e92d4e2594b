// Post domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::author::AuthorId;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Stable identifier of a post (`id_postagem` on the wire).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A post written by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Post {
    /// Unique identifier of the post.
    #[serde(rename = "id_postagem")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub id: PostId,
    /// Post title.
    #[serde(rename = "titulo")]
    #[cfg_attr(feature = "openapi", schema(example = "Bem-vindo à API!"))]
    pub title: String,
    /// Optional body text.
    #[serde(rename = "conteudo")]
    pub content: Option<String>,
    /// Creation timestamp.
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    /// Owning author.
    #[serde(rename = "id_autor")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub author_id: AuthorId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_wire_names() {
        let post = Post {
            id: PostId::new(3),
            title: "Olá".to_string(),
            content: None,
            created_at: Utc::now(),
            author_id: AuthorId::new(1),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id_postagem"], 3);
        assert_eq!(json["titulo"], "Olá");
        assert!(json["conteudo"].is_null());
        assert_eq!(json["id_autor"], 1);
        assert!(json["data_criacao"].is_string());
    }
}
