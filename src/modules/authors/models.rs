use courselib_db::{Author, NewAuthor};
use courselib_kernel::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::modules::courses::models::CourseForCreation;
use crate::utils::dates::age_at;

/// Author as returned to clients; name and age are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

impl AuthorDto {
    /// Map an entity, deriving the age as of `now`.
    pub fn from_author(author: &Author, now: OffsetDateTime) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_at(author.date_of_birth, now),
            main_category: author.main_category.clone(),
        }
    }

    /// Map several entities against a single clock reading.
    pub fn from_authors<'a>(authors: impl IntoIterator<Item = &'a Author>) -> Vec<Self> {
        let now = OffsetDateTime::now_utc();
        authors
            .into_iter()
            .map(|author| Self::from_author(author, now))
            .collect()
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, OffsetDateTime::now_utc())
    }
}

/// Request model for creating an author, optionally with courses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_birth: OffsetDateTime,
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<CourseForCreation>,
}

impl Validate for AuthorForCreation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(nested) = self.courses.validate() {
            errors.nest("courses", nested);
        }
        errors.into_result()
    }
}

impl From<AuthorForCreation> for NewAuthor {
    fn from(author: AuthorForCreation) -> Self {
        NewAuthor {
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            main_category: author.main_category,
            courses: author
                .courses
                .into_iter()
                .map(CourseForCreation::into_new_course)
                .collect(),
        }
    }
}
