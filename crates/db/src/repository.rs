use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{Author, Course, NewAuthor, NewCourse};
use crate::error::RepositoryError;

/// Repository handle shared by every request handler.
pub type SharedRepository = Arc<dyn CourseLibraryRepository>;

/// Filters accepted by the author listing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsQuery {
    /// Exact match on the main category, surrounding whitespace ignored.
    pub main_category: Option<String>,
    /// Substring match on main category, first name or last name.
    pub search_query: Option<String>,
}

impl AuthorsQuery {
    pub(crate) fn matches(&self, author: &Author) -> bool {
        let category = self
            .main_category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(category) = category {
            if author.main_category != category {
                return false;
            }
        }

        let search = self
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match search {
            Some(search) => {
                author.main_category.contains(search)
                    || author.first_name.contains(search)
                    || author.last_name.contains(search)
            }
            None => true,
        }
    }
}

/// Query and command contract of the author/course store.
///
/// Commands persist immediately. Batch commands are all-or-nothing.
#[async_trait]
pub trait CourseLibraryRepository: Send + Sync {
    /// Authors matching `query`, ordered by first name then last name.
    async fn get_authors(&self, query: &AuthorsQuery) -> Result<Vec<Author>, RepositoryError>;

    /// Authors whose id is in `ids`. Unknown ids are skipped, so callers
    /// compare lengths to detect them.
    async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepositoryError>;

    async fn get_author(&self, author_id: Uuid) -> Result<Option<Author>, RepositoryError>;

    async fn author_exists(&self, author_id: Uuid) -> Result<bool, RepositoryError>;

    /// Insert an author together with its nested courses.
    async fn add_author(&self, author: NewAuthor) -> Result<Author, RepositoryError>;

    /// Insert several authors in one commit. Returned authors keep input order.
    async fn add_authors(&self, authors: Vec<NewAuthor>) -> Result<Vec<Author>, RepositoryError>;

    /// Delete an author and every course it owns.
    async fn delete_author(&self, author_id: Uuid) -> Result<(), RepositoryError>;

    /// Courses of one author, ordered by title.
    async fn get_courses(&self, author_id: Uuid) -> Result<Vec<Course>, RepositoryError>;

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, RepositoryError>;

    async fn add_course(&self, author_id: Uuid, course: NewCourse)
        -> Result<Course, RepositoryError>;

    /// Overwrite title and description of an existing course.
    async fn update_course(&self, course: &Course) -> Result<(), RepositoryError>;

    async fn delete_course(&self, course_id: Uuid) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn author(first: &str, last: &str, category: &str) -> Author {
        Author {
            id: Uuid::now_v7(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: datetime!(1980-01-01 0:00 UTC),
            main_category: category.to_string(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(AuthorsQuery::default().matches(&author("Nancy", "Rye", "Rum")));
    }

    #[test]
    fn main_category_is_trimmed_exact_match() {
        let query = AuthorsQuery {
            main_category: Some("  Rum ".to_string()),
            search_query: None,
        };
        assert!(query.matches(&author("Nancy", "Rye", "Rum")));
        assert!(!query.matches(&author("Nancy", "Rye", "Rum and Ships")));
    }

    #[test]
    fn search_query_looks_at_names_and_category() {
        let query = AuthorsQuery {
            main_category: None,
            search_query: Some("Sea".to_string()),
        };
        assert!(query.matches(&author("Seabury", "Reyes", "Maps")));
        assert!(query.matches(&author("Eli", "Bones", "Singing Sea Shanties")));
        assert!(!query.matches(&author("Arnold", "Ugly", "Rum")));
    }
}
