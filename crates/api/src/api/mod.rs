// HTTP API routes
//
// Each submodule handles a specific resource type with its own AppState.

pub mod authors;
pub mod common;
pub mod posts;
pub mod validation;

// Re-export common types
pub use common::{ApiError, ErrorResponse, MessageResponse};
