//! JSON Patch (RFC 6902) documents over [`CourseForUpdate`].
//!
//! Paths resolve through a fixed table of the two mutable fields. The
//! document is applied to a working copy, so a failing operation leaves the
//! input untouched. No semantic validation happens here.

use courselib_http::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::models::CourseForUpdate;

/// One patch operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Test { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
}

impl PatchOperation {
    pub fn name(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
            PatchOperation::Test { .. } => "test",
            PatchOperation::Move { .. } => "move",
            PatchOperation::Copy { .. } => "copy",
        }
    }
}

/// Ordered sequence of operations, as sent in a PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchErrorKind {
    #[error("the target location '{0}' was not found")]
    UnknownPath(String),
    #[error("the value '{0}' is invalid for the target location")]
    InvalidValue(String),
    #[error("the current value does not match the tested value")]
    TestFailed,
}

/// The operation that stopped the document from applying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation {index} ({op} '{path}') failed: {kind}")]
pub struct PatchError {
    pub index: usize,
    pub op: &'static str,
    pub path: String,
    pub kind: PatchErrorKind,
}

impl From<PatchError> for AppError {
    fn from(error: PatchError) -> Self {
        let message = error.to_string();
        let detail = json!({
            "field": error.path,
            "error": error.kind.to_string(),
            "operation": error.index,
            "op": error.op,
        });
        AppError::patch(vec![detail], message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CourseField {
    Title,
    Description,
}

impl CourseField {
    fn resolve(path: &str) -> Result<Self, PatchErrorKind> {
        let segment = path.strip_prefix('/').unwrap_or(path);
        if segment.eq_ignore_ascii_case("title") {
            Ok(CourseField::Title)
        } else if segment.eq_ignore_ascii_case("description") {
            Ok(CourseField::Description)
        } else {
            Err(PatchErrorKind::UnknownPath(path.to_string()))
        }
    }

    fn get<'a>(&self, target: &'a CourseForUpdate) -> Option<&'a String> {
        match self {
            CourseField::Title => target.title.as_ref(),
            CourseField::Description => target.description.as_ref(),
        }
    }

    fn set(&self, target: &mut CourseForUpdate, value: Option<String>) {
        match self {
            CourseField::Title => target.title = value,
            CourseField::Description => target.description = value,
        }
    }
}

fn string_value(value: &Value) -> Result<Option<String>, PatchErrorKind> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        other => Err(PatchErrorKind::InvalidValue(other.to_string())),
    }
}

impl PatchDocument {
    /// Apply every operation in order to a copy of `target`.
    pub fn apply_to(&self, target: &CourseForUpdate) -> Result<CourseForUpdate, PatchError> {
        let mut working = target.clone();
        for (index, operation) in self.0.iter().enumerate() {
            apply_operation(operation, &mut working).map_err(|(path, kind)| PatchError {
                index,
                op: operation.name(),
                path,
                kind,
            })?;
        }
        Ok(working)
    }
}

fn at(path: &str) -> impl FnOnce(PatchErrorKind) -> (String, PatchErrorKind) + '_ {
    move |kind| (path.to_string(), kind)
}

/// On failure returns the offending path and the reason.
fn apply_operation(
    operation: &PatchOperation,
    target: &mut CourseForUpdate,
) -> Result<(), (String, PatchErrorKind)> {
    match operation {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let field = CourseField::resolve(path).map_err(at(path))?;
            let value = string_value(value).map_err(at(path))?;
            field.set(target, value);
        }
        PatchOperation::Remove { path } => {
            let field = CourseField::resolve(path).map_err(at(path))?;
            field.set(target, None);
        }
        PatchOperation::Test { path, value } => {
            let field = CourseField::resolve(path).map_err(at(path))?;
            let expected = string_value(value).map_err(at(path))?;
            if field.get(target) != expected.as_ref() {
                return Err((path.clone(), PatchErrorKind::TestFailed));
            }
        }
        PatchOperation::Move { from, path } => {
            let source = CourseField::resolve(from).map_err(at(from))?;
            let destination = CourseField::resolve(path).map_err(at(path))?;
            let value = source.get(target).cloned();
            source.set(target, None);
            destination.set(target, value);
        }
        PatchOperation::Copy { from, path } => {
            let source = CourseField::resolve(from).map_err(at(from))?;
            let destination = CourseField::resolve(path).map_err(at(path))?;
            let value = source.get(target).cloned();
            destination.set(target, value);
        }
    }

    Ok(())
}
