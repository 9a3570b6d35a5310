//! Demo data for local runs.

use time::macros::datetime;

use crate::entities::{NewAuthor, NewCourse};
use crate::error::RepositoryError;
use crate::repository::CourseLibraryRepository;

fn course(title: &str, description: &str) -> NewCourse {
    NewCourse {
        id: None,
        title: title.to_string(),
        description: Some(description.to_string()),
    }
}

/// Authors and courses inserted by [`seed_demo_data`].
pub fn demo_authors() -> Vec<NewAuthor> {
    vec![
        NewAuthor {
            first_name: "Berry".to_string(),
            last_name: "Griffin Beak Eldritch".to_string(),
            date_of_birth: datetime!(1650-07-23 0:00 UTC),
            main_category: "Ships".to_string(),
            courses: vec![
                course(
                    "Commandeering a Ship Without Getting Caught",
                    "Commandeering a ship in rough waters isn't easy. Commandeering it without getting caught is even harder.",
                ),
                course(
                    "Overthrowing Mutiny",
                    "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
                ),
            ],
        },
        NewAuthor {
            first_name: "Nancy".to_string(),
            last_name: "Swashbuckler Rye".to_string(),
            date_of_birth: datetime!(1668-05-21 0:00 UTC),
            main_category: "Rum".to_string(),
            courses: vec![course(
                "Avoiding Brawling While Drinking as Much Rum as You Desire",
                "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
            )],
        },
        NewAuthor {
            first_name: "Eli".to_string(),
            last_name: "Ivory Bones".to_string(),
            date_of_birth: datetime!(1701-12-16 0:00 UTC),
            main_category: "Singing".to_string(),
            courses: vec![course(
                "Singalong Pirate Hits",
                "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.",
            )],
        },
    ]
}

/// Insert the demo authors in one batch.
pub async fn seed_demo_data(repository: &dyn CourseLibraryRepository) -> Result<usize, RepositoryError> {
    let inserted = repository.add_authors(demo_authors()).await?;
    tracing::info!(authors = inserted.len(), "seeded demo data");
    Ok(inserted.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;
    use crate::repository::AuthorsQuery;

    #[tokio::test]
    async fn seeding_inserts_every_demo_author() {
        let repo = InMemoryRepository::new();
        let count = seed_demo_data(&repo).await.unwrap();

        let authors = repo.get_authors(&AuthorsQuery::default()).await.unwrap();
        assert_eq!(count, demo_authors().len());
        assert_eq!(authors.len(), count);
        assert_eq!(authors[0].first_name, "Berry");

        let courses = repo.get_courses(authors[0].id).await.unwrap();
        assert_eq!(courses.len(), 2);
    }

    #[test]
    fn demo_courses_have_distinct_title_and_description() {
        for author in demo_authors() {
            for course in author.courses {
                assert_ne!(Some(course.title), course.description);
            }
        }
    }
}
