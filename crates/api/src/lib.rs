// Quill API Library
// Decision: Shared library for the server binary and the router-level tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Router assembly and server configuration
pub mod app;

// Authentication module
pub mod auth;

// Services layer
pub mod services;
pub use services::{AuthorService, PostService};

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
