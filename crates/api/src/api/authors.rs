// Authors API routes
// Decision: Every route requires an authenticated author; no admin-only gate
// Decision: Request bodies are all-optional DTOs validated into storage inputs

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, FromRef, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use quill_core::AuthorProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse, MessageResponse};
use super::validation::{
    check_field, require_field, MAX_EMAIL_CHARS, MAX_NAME_CHARS, MAX_SECRET_CHARS,
};
use crate::auth::{AuthState, AuthUser};
use crate::services::AuthorService;
use crate::storage::{CreateAuthorRow, UpdateAuthor};

const NOT_FOUND: &str = "Autor não encontrado!";
const EMAIL_TAKEN: &str = "Este email já está cadastrado";
const OWNS_POSTS: &str = "Este autor possui postagens e não pode ser excluído";

/// App state for author routes
#[derive(Clone)]
pub struct AppState {
    pub service: AuthorService,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(service: AuthorService, auth: AuthState) -> Self {
        Self { service, auth }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Request to create an author
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAuthorRequest {
    #[schema(example = "Ana")]
    pub nome: Option<String>,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[schema(example = "123456")]
    pub senha: Option<String>,
    /// Defaults to false
    pub admin: Option<bool>,
}

impl CreateAuthorRequest {
    pub fn validate(self) -> Result<CreateAuthorRow, ApiError> {
        Ok(CreateAuthorRow {
            nome: require_field("nome", self.nome, MAX_NAME_CHARS)?,
            email: require_field("email", self.email, MAX_EMAIL_CHARS)?,
            senha: require_field("senha", self.senha, MAX_SECRET_CHARS)?,
            admin: self.admin.unwrap_or(false),
        })
    }
}

/// Request to update an author. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAuthorRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub admin: Option<bool>,
}

impl UpdateAuthorRequest {
    pub fn validate(self) -> Result<UpdateAuthor, ApiError> {
        Ok(UpdateAuthor {
            nome: self
                .nome
                .map(|v| check_field("nome", v, MAX_NAME_CHARS))
                .transpose()?,
            email: self
                .email
                .map(|v| check_field("email", v, MAX_EMAIL_CHARS))
                .transpose()?,
            senha: self
                .senha
                .map(|v| check_field("senha", v, MAX_SECRET_CHARS))
                .transpose()?,
            admin: self.admin,
        })
    }
}

/// Response for the author list
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub autores: Vec<AuthorProfile>,
}

/// Response for a single author
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub autor: AuthorProfile,
}

/// Response for create and update
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorChangedResponse {
    #[serde(rename = "Mensagem")]
    pub mensagem: String,
    pub autor: AuthorProfile,
}

/// Create author routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/autores", get(list_authors).post(create_author))
        .route(
            "/autores/:id",
            get(get_author).put(update_author).delete(delete_author),
        )
        .with_state(state)
}

fn author_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::validation("Identificador de autor inválido"))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::validation(format!("Corpo da requisição inválido: {}", e.body_text())))
}

/// Map a storage conflict to a domain message
fn conflict_as(message: &'static str) -> impl Fn(quill_core::StoreError) -> ApiError {
    move |e| {
        if e.is_conflict() {
            ApiError::Conflict(message.to_string())
        } else {
            e.into()
        }
    }
}

/// GET /autores - List all authors
#[utoipa::path(
    get,
    path = "/autores",
    responses(
        (status = 200, description = "List of authors", body = AuthorListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "autores"
)]
pub async fn list_authors(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<AuthorListResponse>, ApiError> {
    let autores = state.service.list().await?;
    Ok(Json(AuthorListResponse { autores }))
}

/// GET /autores/{id} - Get one author
#[utoipa::path(
    get,
    path = "/autores/{id}",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author found", body = AuthorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "autores"
)]
pub async fn get_author(
    State(state): State<AppState>,
    _auth: AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let id = author_id(path)?;
    let autor = state
        .service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(AuthorResponse { autor }))
}

/// POST /autores - Create an author
#[utoipa::path(
    post,
    path = "/autores",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorChangedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "autores"
)]
pub async fn create_author(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorChangedResponse>), ApiError> {
    let input = json_body(body)?.validate()?;
    let autor = state
        .service
        .create(input)
        .await
        .map_err(conflict_as(EMAIL_TAKEN))?;
    tracing::debug!(by = %auth.id, author_id = %autor.id, "Author created via API");

    Ok((
        StatusCode::CREATED,
        Json(AuthorChangedResponse {
            mensagem: "Usuário criado com sucesso".to_string(),
            autor,
        }),
    ))
}

/// PUT /autores/{id} - Update an author
#[utoipa::path(
    put,
    path = "/autores/{id}",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorChangedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "autores"
)]
pub async fn update_author(
    State(state): State<AppState>,
    _auth: AuthUser,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateAuthorRequest>, JsonRejection>,
) -> Result<Json<AuthorChangedResponse>, ApiError> {
    let id = author_id(path)?;
    let input = json_body(body)?.validate()?;
    let autor = state
        .service
        .update(id, input)
        .await
        .map_err(conflict_as(EMAIL_TAKEN))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(AuthorChangedResponse {
        mensagem: "Usuário alterado com sucesso!".to_string(),
        autor,
    }))
}

/// DELETE /autores/{id} - Delete an author
#[utoipa::path(
    delete,
    path = "/autores/{id}",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 409, description = "Author still owns posts", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "autores"
)]
pub async fn delete_author(
    State(state): State<AppState>,
    _auth: AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = author_id(path)?;
    let deleted = state
        .service
        .delete(id)
        .await
        .map_err(conflict_as(OWNS_POSTS))?;

    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new("Autor excluído com sucesso!")))
}
