use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: OffsetDateTime,
    pub main_category: String,
}

/// Persisted course, owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Author to insert. The store assigns the id; nested courses are inserted
/// in the same command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: OffsetDateTime,
    pub main_category: String,
    pub courses: Vec<NewCourse>,
}

/// Course to insert. `id` is `None` for server-assigned ids and `Some` when
/// the client addressed a not-yet-existing course directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
}

impl NewCourse {
    pub(crate) fn into_course(self, author_id: Uuid) -> Course {
        Course {
            id: self.id.unwrap_or_else(Uuid::now_v7),
            title: self.title,
            description: self.description,
            author_id,
        }
    }
}
