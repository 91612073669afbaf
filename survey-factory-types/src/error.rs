use crate::ResultPath;

/// Error returned when a document node cannot be read as a survey item.
#[derive(Debug, thiserror::Error)]
pub enum SurveyItemError {
    /// Neither `identifier` nor `schemaIdentifier` is present.
    #[error("Survey item has no identifier")]
    MissingIdentifier,

    #[error("Expected a survey item object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Field '{key}' must be a {expected}")]
    InvalidField {
        key: &'static str,
        expected: &'static str,
    },
}

/// Error returned when an expected answer cannot be coerced for a rule.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    /// The operator compares against a value but the rule has none.
    #[error("Operator '{operator}' requires an expected answer")]
    MissingValue { operator: &'static str },

    #[error("Expected answer {value} is not a valid {subtype} value")]
    Unsupported { subtype: String, value: String },
}

impl CoercionError {
    pub fn unsupported(subtype: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::Unsupported {
            subtype: subtype.into(),
            value: value.to_string(),
        }
    }
}

/// Error type for typed result access.
#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("Missing result for path: {0}")]
    MissingResult(ResultPath),

    #[error("Type mismatch at path '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: ResultPath,
        expected: &'static str,
        actual: &'static str,
    },
}
