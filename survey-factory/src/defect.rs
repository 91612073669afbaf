//! Build-time configuration defects.
//!
//! A defect never aborts construction. The affected field, format or rule is
//! left out and the defect is logged and kept so tests can assert on it.

use std::cell::RefCell;

use survey_factory_types::{CoercionError, UnknownOperator};

/// A problem in a survey document that was worked around while building.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildDefect {
    #[error("{subtype} requires a number range with a min or a max")]
    MissingNumberRange { subtype: &'static str },

    #[error("invalid validation regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("validation regex has no invalid message")]
    RegexWithoutMessage,

    #[error("rule dropped: {0}")]
    Coercion(String),

    #[error("rule dropped: {0}")]
    UnknownOperator(String),

    #[error("timing range choice {index} has neither a min nor a max")]
    TimingRangeMissingBounds { index: usize },

    #[error("mood choice {index} is not an object; the default choice is kept")]
    MoodChoiceMismatch { index: usize },

    #[error(
        "skip-if-failed navigation with several skip targets ({targets}); \
         failed-skip semantics apply"
    )]
    AmbiguousFailedSkip { targets: String },

    #[error("duplicate step identifier `{identifier}`; the later step is kept")]
    DuplicateStepIdentifier { identifier: String },

    #[error("choice {index} is neither an object nor a scalar")]
    InvalidChoice { index: usize },

    #[error("{kind} requires items")]
    MissingItems { kind: &'static str },

    #[error("{subtype} cannot be used as an answer format")]
    CompoundAnswerFormat { subtype: &'static str },

    #[error("item {index} is not a survey item: {message}")]
    InvalidItem { index: usize, message: String },

    #[error("rule on `{result}` dropped: no such form item in this step")]
    UnreachableRule { result: String },
}

impl From<CoercionError> for BuildDefect {
    fn from(err: CoercionError) -> Self {
        Self::Coercion(err.to_string())
    }
}

impl From<UnknownOperator> for BuildDefect {
    fn from(err: UnknownOperator) -> Self {
        Self::UnknownOperator(err.to_string())
    }
}

/// A defect and the identifier of the item it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedDefect {
    pub item: String,
    pub defect: BuildDefect,
}

/// Collects the defects found by one factory.
#[derive(Debug, Default)]
pub struct DefectLog {
    defects: RefCell<Vec<ReportedDefect>>,
}

impl DefectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a defect as a warning and keep it.
    pub fn report(&self, item: &str, defect: BuildDefect) {
        tracing::warn!(item = %item, defect = %defect, "survey document defect");
        self.defects.borrow_mut().push(ReportedDefect {
            item: item.to_string(),
            defect,
        });
    }

    pub fn len(&self) -> usize {
        self.defects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.borrow().is_empty()
    }

    /// Every defect reported so far, in order.
    pub fn defects(&self) -> Vec<ReportedDefect> {
        self.defects.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<ReportedDefect> {
        self.defects.take()
    }
}
