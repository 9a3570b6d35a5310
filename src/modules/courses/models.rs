use courselib_db::{Course, NewCourse};
use courselib_kernel::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_course, CourseFields, ValidationContext};

/// Course as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

/// Request model for creating a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForCreation {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CourseForCreation {
    pub fn into_new_course(self) -> NewCourse {
        NewCourse {
            id: None,
            title: self.title.unwrap_or_default(),
            description: self.description,
        }
    }
}

impl Validate for CourseForCreation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_course(CourseFields {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            context: ValidationContext::Create,
        })
    }
}

/// The only course fields a client may replace or patch. Identity and
/// ownership are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CourseForUpdate {
    /// New course addressed by a client-chosen id.
    pub fn into_new_course(self, id: Uuid) -> NewCourse {
        NewCourse {
            id: Some(id),
            title: self.title.unwrap_or_default(),
            description: self.description,
        }
    }

    /// Replace title and description of `course`; id and owner stay.
    pub fn apply_to(self, course: &mut Course) {
        course.title = self.title.unwrap_or_default();
        course.description = self.description;
    }
}

impl From<&Course> for CourseForUpdate {
    fn from(course: &Course) -> Self {
        Self {
            title: Some(course.title.clone()),
            description: course.description.clone(),
        }
    }
}

impl Validate for CourseForUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_course(CourseFields {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            context: ValidationContext::Update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Course {
        Course {
            id: Uuid::now_v7(),
            title: "Old".to_string(),
            description: Some("Old description".to_string()),
            author_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn dto_serializes_in_camel_case() {
        let course = stored();
        let json = serde_json::to_value(CourseDto::from(&course)).unwrap();
        assert_eq!(json["authorId"], course.author_id.to_string());
        assert_eq!(json["title"], "Old");
    }

    #[test]
    fn update_keeps_identity_and_owner() {
        let mut course = stored();
        let (id, owner) = (course.id, course.author_id);

        CourseForUpdate {
            title: Some("New".to_string()),
            description: Some("New description".to_string()),
        }
        .apply_to(&mut course);

        assert_eq!(course.id, id);
        assert_eq!(course.author_id, owner);
        assert_eq!(course.title, "New");
    }

    #[test]
    fn update_representation_ignores_identity_fields() {
        let update: CourseForUpdate = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "authorId": "00000000-0000-0000-0000-000000000000",
            "title": "T",
            "description": "D"
        }))
        .unwrap();
        assert_eq!(update.title.as_deref(), Some("T"));
    }

    #[test]
    fn create_context_allows_missing_description() {
        let course = CourseForCreation {
            title: Some("Title".to_string()),
            description: None,
        };
        assert!(course.validate().is_ok());
        assert!(CourseForUpdate {
            title: Some("Title".to_string()),
            description: None,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn new_course_uses_client_id() {
        let id = Uuid::new_v4();
        let course = CourseForUpdate {
            title: Some("T".to_string()),
            description: Some("D".to_string()),
        }
        .into_new_course(id);
        assert_eq!(course.id, Some(id));
    }
}
