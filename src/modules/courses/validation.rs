//! Rules for the client-manipulable course fields.
//!
//! Per-field rules always run. Object-level rules run only once every
//! per-field rule passed, so they always see a complete pair of values.

use courselib_kernel::{FieldError, ValidationErrors};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1500;

pub const TITLE_REQUIRED: &str = "You should fill out a title.";
pub const TITLE_TOO_LONG: &str = "The title shouldn't have more than 100 characters.";
pub const DESCRIPTION_REQUIRED: &str = "You should fill out a description.";
pub const DESCRIPTION_TOO_LONG: &str =
    "The description shouldn't have more than 1500 characters.";
pub const TITLE_EQUALS_DESCRIPTION: &str = "Title must be different from description.";

/// Whether the representation creates a course or replaces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationContext {
    /// Description may be omitted.
    Create,
    /// Description is required.
    Update,
}

/// Borrowed view of the fields a rule inspects.
#[derive(Debug, Clone, Copy)]
pub struct CourseFields<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub context: ValidationContext,
}

type Rule = fn(&CourseFields<'_>) -> Option<FieldError>;

const FIELD_RULES: &[Rule] = &[
    title_required,
    title_max_length,
    description_required,
    description_max_length,
];

const OBJECT_RULES: &[Rule] = &[title_differs_from_description];

/// Evaluate every rule; failures come back in rule order.
pub fn validate_course(fields: CourseFields<'_>) -> Result<(), ValidationErrors> {
    let field_errors = run(FIELD_RULES, &fields);
    if !field_errors.is_empty() {
        return Err(field_errors);
    }
    run(OBJECT_RULES, &fields).into_result()
}

fn run(rules: &[Rule], fields: &CourseFields<'_>) -> ValidationErrors {
    rules.iter().filter_map(|rule| rule(fields)).collect()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

fn longer_than(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|value| value.chars().count() > max)
}

fn title_required(fields: &CourseFields<'_>) -> Option<FieldError> {
    is_blank(fields.title).then(|| FieldError::field("title", TITLE_REQUIRED))
}

fn title_max_length(fields: &CourseFields<'_>) -> Option<FieldError> {
    longer_than(fields.title, TITLE_MAX_CHARS).then(|| FieldError::field("title", TITLE_TOO_LONG))
}

fn description_required(fields: &CourseFields<'_>) -> Option<FieldError> {
    (fields.context == ValidationContext::Update && is_blank(fields.description))
        .then(|| FieldError::field("description", DESCRIPTION_REQUIRED))
}

fn description_max_length(fields: &CourseFields<'_>) -> Option<FieldError> {
    longer_than(fields.description, DESCRIPTION_MAX_CHARS)
        .then(|| FieldError::field("description", DESCRIPTION_TOO_LONG))
}

/// Exact, case-sensitive comparison of the raw values.
fn title_differs_from_description(fields: &CourseFields<'_>) -> Option<FieldError> {
    (fields.title == fields.description).then(|| FieldError::object(TITLE_EQUALS_DESCRIPTION))
}
