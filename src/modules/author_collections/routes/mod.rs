//! Batch addressing of authors through a comma separated id list.
//!
//! Reads are all-or-nothing: if any requested id does not resolve the whole
//! request is a 404. Writes go to the store as one batch.

use axum::{
    extract::State,
    response::Response,
    routing::get,
    Json, Router,
};
use courselib_db::{NewAuthor, SharedRepository};
use courselib_http::{AppError, PathParams, ValidatedJson};

use crate::modules::authors::models::{AuthorDto, AuthorForCreation};
use crate::modules::{created, repository_error};
use crate::utils::id_list::{join_ids, parse_id_list};

pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route(
            "/",
            get(missing_id_list).post(create_author_collection),
        )
        .route("/{ids}", get(get_author_collection))
        .with_state(repository)
}

pub(crate) fn collection_location(ids: &str) -> String {
    format!("/api/authorcollections/({ids})")
}

async fn missing_id_list() -> AppError {
    AppError::bad_request("an id list is required, e.g. (id1,id2)")
}

async fn get_author_collection(
    State(repository): State<SharedRepository>,
    PathParams(segment): PathParams<String>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let ids = parse_id_list(&segment).map_err(|err| AppError::bad_request(err.to_string()))?;

    let authors = repository
        .get_authors_by_ids(&ids)
        .await
        .map_err(repository_error)?;

    if authors.len() != ids.len() {
        tracing::debug!(
            requested = ids.len(),
            found = authors.len(),
            "author collection incomplete"
        );
        return Err(AppError::not_found(
            "one or more authors in the collection were not found",
        ));
    }

    Ok(Json(AuthorDto::from_authors(&authors)))
}

async fn create_author_collection(
    State(repository): State<SharedRepository>,
    ValidatedJson(authors): ValidatedJson<Vec<AuthorForCreation>>,
) -> Result<Response, AppError> {
    if authors.is_empty() {
        return Err(AppError::bad_request("an author collection needs at least one author"));
    }

    let authors = repository
        .add_authors(authors.into_iter().map(NewAuthor::from).collect())
        .await
        .map_err(repository_error)?;

    let ids = join_ids(authors.iter().map(|author| author.id));
    tracing::info!(count = authors.len(), "author collection created");

    Ok(created(
        collection_location(&ids),
        AuthorDto::from_authors(&authors),
    ))
}
