// OpenAPI specification generation
//
// Served as JSON by the API server at /api-doc/openapi.json.

use crate::api;
use crate::auth;
use quill_core::{AuthorProfile, Post};
use utoipa::OpenApi;

/// OpenAPI documentation for the Quill API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::login,
        auth::routes::login_hint,
        api::posts::list_posts,
        api::authors::list_authors,
        api::authors::get_author,
        api::authors::create_author,
        api::authors::update_author,
        api::authors::delete_author,
    ),
    components(
        schemas(
            AuthorProfile,
            Post,
            auth::LoginRequest,
            auth::LoginResponse,
            api::authors::CreateAuthorRequest,
            api::authors::UpdateAuthorRequest,
            api::authors::AuthorListResponse,
            api::authors::AuthorResponse,
            api::authors::AuthorChangedResponse,
            api::posts::PostListResponse,
            api::ErrorResponse,
            api::MessageResponse,
        )
    ),
    tags(
        (name = "auth", description = "Login and token issuance"),
        (name = "autores", description = "Author management"),
        (name = "postagens", description = "Posts")
    ),
    info(
        title = "Quill API",
        description = "Authors and posts, guarded by bearer tokens",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;
