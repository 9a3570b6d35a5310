pub mod author_collections;
pub mod authors;
pub mod courses;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_db::{CourseLibraryRepository, RepositoryError, SharedRepository};
use courselib_http::AppError;
use courselib_kernel::ModuleRegistry;
use serde::Serialize;
use uuid::Uuid;

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, repository: SharedRepository) {
    registry.register(authors::create_module(repository.clone()));
    registry.register(courses::create_module(repository.clone()));
    registry.register(author_collections::create_module(repository));
}

/// Store failures are server errors.
pub(crate) fn repository_error(error: RepositoryError) -> AppError {
    AppError::Internal(error.into())
}

pub(crate) async fn ensure_author_exists(
    repository: &dyn CourseLibraryRepository,
    author_id: Uuid,
) -> Result<(), AppError> {
    if repository
        .author_exists(author_id)
        .await
        .map_err(repository_error)?
    {
        Ok(())
    } else {
        Err(AppError::not_found(format!("author '{author_id}' was not found")))
    }
}

/// `201 Created` with a `Location` header and the created representation.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}
