//! Course handlers, nested under an author.
//!
//! Author existence is always checked before the course is looked up. PUT
//! and PATCH both create the course when the addressed id is unknown.
//! PUT bodies are validated at binding time only; PATCH results are
//! validated explicitly after the document has been applied.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use courselib_db::{Course, SharedRepository};
use courselib_http::{AppError, JsonBody, PathParams, ValidatedJson};
use courselib_kernel::Validate;
use serde::Deserialize;
use uuid::Uuid;

use super::models::{CourseDto, CourseForCreation, CourseForUpdate};
use super::patch::PatchDocument;
use crate::modules::{created, ensure_author_exists, repository_error};

#[derive(Debug, Deserialize)]
struct CoursePath {
    author_id: Uuid,
    course_id: Uuid,
}

pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route(
            "/",
            get(get_courses_for_author).post(create_course_for_author),
        )
        .route(
            "/{course_id}",
            get(get_course_for_author)
                .put(update_course_for_author)
                .patch(partially_update_course_for_author)
                .delete(delete_course_for_author),
        )
        .with_state(repository)
}

pub(crate) fn course_location(author_id: Uuid, course_id: Uuid) -> String {
    format!("/api/authors/{author_id}/courses/{course_id}")
}

fn course_created(course: &Course) -> Response {
    created(
        course_location(course.author_id, course.id),
        CourseDto::from(course),
    )
}

async fn get_courses_for_author(
    State(repository): State<SharedRepository>,
    PathParams(author_id): PathParams<Uuid>,
) -> Result<Json<Vec<CourseDto>>, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let courses = repository
        .get_courses(author_id)
        .await
        .map_err(repository_error)?;
    Ok(Json(courses.iter().map(CourseDto::from).collect()))
}

async fn get_course_for_author(
    State(repository): State<SharedRepository>,
    PathParams(CoursePath {
        author_id,
        course_id,
    }): PathParams<CoursePath>,
) -> Result<Json<CourseDto>, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let course = repository
        .get_course(author_id, course_id)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| course_not_found(course_id))?;
    Ok(Json(CourseDto::from(&course)))
}

async fn create_course_for_author(
    State(repository): State<SharedRepository>,
    PathParams(author_id): PathParams<Uuid>,
    ValidatedJson(course): ValidatedJson<CourseForCreation>,
) -> Result<Response, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let course = repository
        .add_course(author_id, course.into_new_course())
        .await
        .map_err(repository_error)?;
    tracing::info!(%author_id, course_id = %course.id, "course created");
    Ok(course_created(&course))
}

async fn update_course_for_author(
    State(repository): State<SharedRepository>,
    PathParams(CoursePath {
        author_id,
        course_id,
    }): PathParams<CoursePath>,
    ValidatedJson(course): ValidatedJson<CourseForUpdate>,
) -> Result<Response, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let existing = repository
        .get_course(author_id, course_id)
        .await
        .map_err(repository_error)?;

    match existing {
        None => {
            let created = repository
                .add_course(author_id, course.into_new_course(course_id))
                .await
                .map_err(repository_error)?;
            tracing::info!(%author_id, %course_id, "course created by PUT");
            Ok(course_created(&created))
        }
        Some(mut existing) => {
            course.apply_to(&mut existing);
            repository
                .update_course(&existing)
                .await
                .map_err(repository_error)?;
            tracing::info!(%author_id, %course_id, "course replaced");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

async fn partially_update_course_for_author(
    State(repository): State<SharedRepository>,
    PathParams(CoursePath {
        author_id,
        course_id,
    }): PathParams<CoursePath>,
    JsonBody(patch): JsonBody<PatchDocument>,
) -> Result<Response, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let existing = repository
        .get_course(author_id, course_id)
        .await
        .map_err(repository_error)?;

    match existing {
        None => {
            let patched = patch.apply_to(&CourseForUpdate::default())?;
            patched.validate()?;

            let created = repository
                .add_course(author_id, patched.into_new_course(course_id))
                .await
                .map_err(repository_error)?;
            tracing::info!(%author_id, %course_id, "course created by PATCH");
            Ok(course_created(&created))
        }
        Some(mut existing) => {
            let patched = patch.apply_to(&CourseForUpdate::from(&existing))?;
            patched.validate()?;

            patched.apply_to(&mut existing);
            repository
                .update_course(&existing)
                .await
                .map_err(repository_error)?;
            tracing::info!(%author_id, %course_id, "course patched");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

async fn delete_course_for_author(
    State(repository): State<SharedRepository>,
    PathParams(CoursePath {
        author_id,
        course_id,
    }): PathParams<CoursePath>,
) -> Result<StatusCode, AppError> {
    ensure_author_exists(repository.as_ref(), author_id).await?;

    let course = repository
        .get_course(author_id, course_id)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| course_not_found(course_id))?;

    repository
        .delete_course(course.id)
        .await
        .map_err(repository_error)?;
    tracing::info!(%author_id, %course_id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn course_not_found(course_id: Uuid) -> AppError {
    AppError::not_found(format!("course '{course_id}' was not found"))
}
