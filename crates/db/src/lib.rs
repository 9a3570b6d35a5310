//! Persistence for authors and courses.
//!
//! Handlers talk to the store through [`CourseLibraryRepository`]. Reads
//! return owned snapshots; every write is a single command that either fully
//! applies or fails. [`InMemoryRepository`] is the bundled implementation.

pub mod entities;
pub mod error;
pub mod memory;
pub mod repository;
pub mod seed;

pub use entities::{Author, Course, NewAuthor, NewCourse};
pub use error::RepositoryError;
pub use memory::InMemoryRepository;
pub use repository::{AuthorsQuery, CourseLibraryRepository, SharedRepository};
