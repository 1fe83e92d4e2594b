// Services layer for business logic
// Services own secret handling and shaping, calling storage directly

pub mod author;
pub mod post;

pub use author::AuthorService;
pub use post::PostService;
