// Quill Core
//
// DB-agnostic domain types shared by the API server and its storage backends.
//
// Key design decisions:
// - Domain entities (Author, Post) are plain data; storage rows are converted into them
// - The authentication layer depends only on the CredentialStore trait
// - Secrets never leave the Author type in serialized form

// Domain entity types
pub mod author;
pub mod post;

pub mod error;
pub mod traits;

// Telemetry (tracing subscriber setup)
pub mod telemetry;

// Re-exports for convenience
pub use author::{Author, AuthorId, AuthorProfile};
pub use error::{Result, StoreError};
pub use post::{Post, PostId};
pub use traits::CredentialStore;
