use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entities::{Author, Course, NewAuthor, NewCourse};
use crate::error::RepositoryError;
use crate::repository::{AuthorsQuery, CourseLibraryRepository};

#[derive(Debug, Default)]
struct Store {
    authors: BTreeMap<Uuid, Author>,
    courses: BTreeMap<Uuid, Course>,
}

impl Store {
    /// Build the rows for `author` without touching the store.
    fn stage_author(&self, author: NewAuthor) -> Result<(Author, Vec<Course>), RepositoryError> {
        let author_id = Uuid::now_v7();
        let mut courses = Vec::with_capacity(author.courses.len());
        for course in author.courses {
            let course = course.into_course(author_id);
            if self.courses.contains_key(&course.id)
                || courses.iter().any(|staged: &Course| staged.id == course.id)
            {
                return Err(RepositoryError::DuplicateCourse(course.id));
            }
            courses.push(course);
        }

        let author = Author {
            id: author_id,
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            main_category: author.main_category,
        };
        Ok((author, courses))
    }

    fn commit_author(&mut self, author: Author, courses: Vec<Course>) {
        for course in courses {
            self.courses.insert(course.id, course);
        }
        self.authors.insert(author.id, author);
    }
}

/// Process-local store guarded by a single async read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(left: &Author, right: &Author) -> std::cmp::Ordering {
    left.first_name
        .cmp(&right.first_name)
        .then_with(|| left.last_name.cmp(&right.last_name))
}

#[async_trait]
impl CourseLibraryRepository for InMemoryRepository {
    async fn get_authors(&self, query: &AuthorsQuery) -> Result<Vec<Author>, RepositoryError> {
        let store = self.store.read().await;
        let mut authors: Vec<Author> = store
            .authors
            .values()
            .filter(|author| query.matches(author))
            .cloned()
            .collect();
        authors.sort_by(by_name);
        Ok(authors)
    }

    async fn get_authors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepositoryError> {
        let store = self.store.read().await;
        let mut authors: Vec<Author> = store
            .authors
            .values()
            .filter(|author| ids.contains(&author.id))
            .cloned()
            .collect();
        authors.sort_by(by_name);
        Ok(authors)
    }

    async fn get_author(&self, author_id: Uuid) -> Result<Option<Author>, RepositoryError> {
        Ok(self.store.read().await.authors.get(&author_id).cloned())
    }

    async fn author_exists(&self, author_id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.read().await.authors.contains_key(&author_id))
    }

    async fn add_author(&self, author: NewAuthor) -> Result<Author, RepositoryError> {
        let mut store = self.store.write().await;
        let (author, courses) = store.stage_author(author)?;
        tracing::debug!(author_id = %author.id, courses = courses.len(), "inserting author");
        store.commit_author(author.clone(), courses);
        Ok(author)
    }

    async fn add_authors(&self, authors: Vec<NewAuthor>) -> Result<Vec<Author>, RepositoryError> {
        let mut store = self.store.write().await;

        let mut staged: Vec<(Author, Vec<Course>)> = Vec::with_capacity(authors.len());
        for author in authors {
            let (author, courses) = store.stage_author(author)?;
            for course in &courses {
                if staged
                    .iter()
                    .any(|(_, other)| other.iter().any(|c| c.id == course.id))
                {
                    return Err(RepositoryError::DuplicateCourse(course.id));
                }
            }
            staged.push((author, courses));
        }

        tracing::debug!(authors = staged.len(), "inserting author batch");
        let mut inserted = Vec::with_capacity(staged.len());
        for (author, courses) in staged {
            inserted.push(author.clone());
            store.commit_author(author, courses);
        }
        Ok(inserted)
    }

    async fn delete_author(&self, author_id: Uuid) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        if store.authors.remove(&author_id).is_none() {
            return Err(RepositoryError::AuthorNotFound(author_id));
        }
        let before = store.courses.len();
        store.courses.retain(|_, course| course.author_id != author_id);
        tracing::debug!(
            %author_id,
            courses_removed = before - store.courses.len(),
            "deleted author"
        );
        Ok(())
    }

    async fn get_courses(&self, author_id: Uuid) -> Result<Vec<Course>, RepositoryError> {
        let store = self.store.read().await;
        let mut courses: Vec<Course> = store
            .courses
            .values()
            .filter(|course| course.author_id == author_id)
            .cloned()
            .collect();
        courses.sort_by(|left, right| left.title.cmp(&right.title));
        Ok(courses)
    }

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .courses
            .get(&course_id)
            .filter(|course| course.author_id == author_id)
            .cloned())
    }

    async fn add_course(
        &self,
        author_id: Uuid,
        course: NewCourse,
    ) -> Result<Course, RepositoryError> {
        let mut store = self.store.write().await;
        if !store.authors.contains_key(&author_id) {
            return Err(RepositoryError::AuthorNotFound(author_id));
        }
        let course = course.into_course(author_id);
        if store.courses.contains_key(&course.id) {
            return Err(RepositoryError::DuplicateCourse(course.id));
        }
        tracing::debug!(%author_id, course_id = %course.id, "inserting course");
        store.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update_course(&self, course: &Course) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        let stored = store
            .courses
            .get_mut(&course.id)
            .ok_or(RepositoryError::CourseNotFound(course.id))?;
        stored.title = course.title.clone();
        stored.description = course.description.clone();
        tracing::debug!(course_id = %course.id, "updated course");
        Ok(())
    }

    async fn delete_course(&self, course_id: Uuid) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        store
            .courses
            .remove(&course_id)
            .map(|_| ())
            .ok_or(RepositoryError::CourseNotFound(course_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn new_author(first: &str, last: &str, courses: Vec<NewCourse>) -> NewAuthor {
        NewAuthor {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: datetime!(1970-03-04 0:00 +01:00),
            main_category: "Rum".to_string(),
            courses,
        }
    }

    fn new_course(title: &str) -> NewCourse {
        NewCourse {
            id: None,
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn add_author_persists_nested_courses() {
        let repo = InMemoryRepository::new();
        let author = repo
            .add_author(new_author(
                "Nancy",
                "Rye",
                vec![new_course("Rum"), new_course("Avast")],
            ))
            .await
            .unwrap();

        let courses = repo.get_courses(author.id).await.unwrap();
        let titles: Vec<&str> = courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Avast", "Rum"]);
        assert!(courses.iter().all(|c| c.author_id == author.id));
    }

    #[tokio::test]
    async fn delete_author_cascades_to_courses() {
        let repo = InMemoryRepository::new();
        let author = repo
            .add_author(new_author("Eli", "Bones", vec![new_course("Shanties")]))
            .await
            .unwrap();
        let course_id = repo.get_courses(author.id).await.unwrap()[0].id;

        repo.delete_author(author.id).await.unwrap();

        assert!(!repo.author_exists(author.id).await.unwrap());
        assert_eq!(repo.get_course(author.id, course_id).await.unwrap(), None);
        assert_eq!(
            repo.delete_course(course_id).await,
            Err(RepositoryError::CourseNotFound(course_id))
        );
    }

    #[tokio::test]
    async fn add_authors_keeps_input_order() {
        let repo = InMemoryRepository::new();
        let inserted = repo
            .add_authors(vec![
                new_author("Zed", "Last", vec![]),
                new_author("Abe", "First", vec![]),
            ])
            .await
            .unwrap();

        assert_eq!(inserted[0].first_name, "Zed");
        assert_eq!(inserted[1].first_name, "Abe");

        let ids: Vec<Uuid> = inserted.iter().map(|a| a.id).collect();
        let fetched = repo.get_authors_by_ids(&ids).await.unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn add_authors_is_all_or_nothing() {
        let repo = InMemoryRepository::new();
        let shared = Uuid::now_v7();
        let clashing = NewCourse {
            id: Some(shared),
            title: "One".to_string(),
            description: None,
        };

        let result = repo
            .add_authors(vec![
                new_author("A", "A", vec![clashing.clone()]),
                new_author("B", "B", vec![clashing]),
            ])
            .await;

        assert_eq!(result, Err(RepositoryError::DuplicateCourse(shared)));
        assert!(repo
            .get_authors(&AuthorsQuery::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn get_authors_by_ids_skips_unknown_ids() {
        let repo = InMemoryRepository::new();
        let author = repo.add_author(new_author("A", "B", vec![])).await.unwrap();

        let fetched = repo
            .get_authors_by_ids(&[author.id, Uuid::now_v7()])
            .await
            .unwrap();
        assert_eq!(fetched, vec![author]);
    }

    #[tokio::test]
    async fn add_course_honours_client_supplied_id() {
        let repo = InMemoryRepository::new();
        let author = repo.add_author(new_author("A", "B", vec![])).await.unwrap();
        let course_id = Uuid::new_v4();

        let course = repo
            .add_course(
                author.id,
                NewCourse {
                    id: Some(course_id),
                    title: "Chosen".to_string(),
                    description: Some("Id from the path".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(course.id, course_id);
        assert_eq!(
            repo.get_course(author.id, course_id).await.unwrap(),
            Some(course)
        );
    }

    #[tokio::test]
    async fn course_is_only_visible_through_its_author() {
        let repo = InMemoryRepository::new();
        let owner = repo.add_author(new_author("A", "A", vec![])).await.unwrap();
        let other = repo.add_author(new_author("B", "B", vec![])).await.unwrap();
        let course = repo
            .add_course(owner.id, new_course("Mine"))
            .await
            .unwrap();

        assert_eq!(repo.get_course(other.id, course.id).await.unwrap(), None);

        let duplicate = repo
            .add_course(
                other.id,
                NewCourse {
                    id: Some(course.id),
                    title: "Theirs".to_string(),
                    description: None,
                },
            )
            .await;
        assert_eq!(duplicate, Err(RepositoryError::DuplicateCourse(course.id)));
    }

    #[tokio::test]
    async fn update_course_only_touches_title_and_description() {
        let repo = InMemoryRepository::new();
        let owner = repo.add_author(new_author("A", "A", vec![])).await.unwrap();
        let course = repo
            .add_course(owner.id, new_course("Before"))
            .await
            .unwrap();

        let mut changed = course.clone();
        changed.title = "After".to_string();
        changed.description = Some("Now described".to_string());
        changed.author_id = Uuid::now_v7();
        repo.update_course(&changed).await.unwrap();

        let stored = repo.get_course(owner.id, course.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "After");
        assert_eq!(stored.description.as_deref(), Some("Now described"));
        assert_eq!(stored.author_id, owner.id);
    }

    #[tokio::test]
    async fn add_course_requires_existing_author() {
        let repo = InMemoryRepository::new();
        let missing = Uuid::now_v7();
        assert_eq!(
            repo.add_course(missing, new_course("Orphan")).await,
            Err(RepositoryError::AuthorNotFound(missing))
        );
    }
}
