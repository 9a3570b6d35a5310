//! Structured validation results shared by request binding and handlers.
//!
//! A failed validation is an ordered list of [`FieldError`]s. Each error is
//! attached either to a field path (`title`, `courses[0].title`) or to the
//! object as a whole (`field == None`), which is where cross-field rules
//! report.

use std::fmt;

use serde::Serialize;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted field path, or `None` for object-level failures.
    pub field: Option<String>,
    #[serde(rename = "error")]
    pub message: String,
}

impl FieldError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn object(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Ordered set of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Merge errors produced for a nested value, prefixing their paths.
    ///
    /// Object-level errors of the nested value are attached to `prefix`.
    pub fn nest(&mut self, prefix: &str, nested: ValidationErrors) {
        for error in nested.errors {
            let field = match error.field {
                Some(field) if field.starts_with('[') => format!("{prefix}{field}"),
                Some(field) if !prefix.is_empty() => format!("{prefix}.{field}"),
                Some(field) => field,
                None => prefix.to_string(),
            };
            self.errors.push(FieldError {
                field: (!field.is_empty()).then_some(field),
                message: error.message,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Errors as JSON detail objects (`{"field": .., "error": ..}`).
    pub fn to_details(&self) -> Vec<serde_json::Value> {
        self.errors
            .iter()
            .map(|error| serde_json::to_value(error).unwrap_or(serde_json::Value::Null))
            .collect()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|error| match &error.field {
                Some(field) => format!("{field}: {}", error.message),
                None => error.message.clone(),
            })
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Types whose values can be checked before they reach a handler.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (index, item) in self.iter().enumerate() {
            if let Err(nested) = item.validate() {
                errors.nest(&format!("[{index}]"), nested);
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Validate for Named {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut errors = ValidationErrors::new();
            if self.0.is_empty() {
                errors.push(FieldError::field("name", "required"));
                errors.push(FieldError::object("incomplete"));
            }
            errors.into_result()
        }
    }

    #[test]
    fn nest_prefixes_field_paths() {
        let mut inner = ValidationErrors::new();
        inner.push(FieldError::field("title", "required"));
        inner.push(FieldError::object("title equals description"));

        let mut outer = ValidationErrors::new();
        outer.nest("courses[1]", inner);

        let fields: Vec<Option<String>> = outer.iter().map(|e| e.field.clone()).collect();
        assert_eq!(
            fields,
            vec![
                Some("courses[1].title".to_string()),
                Some("courses[1]".to_string())
            ]
        );
    }

    #[test]
    fn vec_validation_reports_indexes() {
        let items = vec![Named("ok"), Named("")];
        let errors = items.validate().unwrap_err();

        let fields: Vec<Option<String>> = errors.iter().map(|e| e.field.clone()).collect();
        assert_eq!(
            fields,
            vec![Some("[1].name".to_string()), Some("[1]".to_string())]
        );
    }

    #[test]
    fn empty_set_is_success() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(Vec::<Named>::new().validate().is_ok());
    }

    #[test]
    fn details_use_field_and_error_keys() {
        let errors: ValidationErrors = vec![
            FieldError::field("title", "too long"),
            FieldError::object("must differ"),
        ]
        .into_iter()
        .collect();

        let details = errors.to_details();
        assert_eq!(
            details[0],
            serde_json::json!({"field": "title", "error": "too long"})
        );
        assert_eq!(
            details[1],
            serde_json::json!({"field": null, "error": "must differ"})
        );
        assert_eq!(errors.to_string(), "title: too long; must differ");
    }
}
