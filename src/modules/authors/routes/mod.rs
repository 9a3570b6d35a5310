use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use courselib_db::{AuthorsQuery, NewAuthor, SharedRepository};
use courselib_http::{AppError, PathParams, ValidatedJson};
use uuid::Uuid;

use super::models::{AuthorDto, AuthorForCreation};
use crate::modules::{created, ensure_author_exists, repository_error};

/// Methods served on the author collection, advertised by OPTIONS.
pub const ALLOWED_METHODS: &str = "GET,OPTIONS,POST";

pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route(
            "/",
            get(get_authors)
                .post(create_author)
                .options(get_authors_options),
        )
        .route("/{author_id}", get(get_author).delete(delete_author))
        .with_state(repository)
}

pub(crate) fn author_location(author_id: Uuid) -> String {
    format!("/api/authors/{author_id}")
}

/// Axum answers HEAD through the GET handler.
async fn get_authors(
    State(repository): State<SharedRepository>,
    Query(query): Query<AuthorsQuery>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let authors = repository
        .get_authors(&query)
        .await
        .map_err(repository_error)?;
    Ok(Json(AuthorDto::from_authors(&authors)))
}

async fn get_author(
    State(repository): State<SharedRepository>,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<Json<AuthorDto>, AppError> {
    let author = repository
        .get_author(author_id)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| AppError::not_found(format!("author '{author_id}' was not found")))?;
    Ok(Json(AuthorDto::from(&author)))
}

async fn create_author(
    State(repository): State<SharedRepository>,
    ValidatedJson(author): ValidatedJson<AuthorForCreation>,
) -> Result<Response, AppError> {
    let author = repository
        .add_author(NewAuthor::from(author))
        .await
        .map_err(repository_error)?;
    tracing::info!(author_id = %author.id, "author created");

    Ok(created(
        author_location(author.id),
        AuthorDto::from(&author),
    ))
}

async fn get_authors_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

/// Deleting an author removes the courses it owns.
async fn delete_author(
    State(repository): State<SharedRepository>,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    repository
        .delete_author(author_id)
        .await
        .map_err(repository_error)?;
    tracing::info!(%author_id, "author deleted");
    Ok(StatusCode::NO_CONTENT)
}
