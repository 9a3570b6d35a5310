use thiserror::Error;
use uuid::Uuid;

/// Failures raised by repository commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("author '{0}' does not exist")]
    AuthorNotFound(Uuid),

    #[error("course '{0}' does not exist")]
    CourseNotFound(Uuid),

    #[error("course id '{0}' is already in use")]
    DuplicateCourse(Uuid),
}
