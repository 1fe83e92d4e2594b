// Storage layer for the Quill API
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL repositories (sqlx)
// - InMemoryDatabase: same API over ordered maps
// - StorageBackend: enum dispatch over both; implements CredentialStore

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;
pub mod seed;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
pub use seed::{seed_admin, SeedOutcome};
