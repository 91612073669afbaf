use std::fmt;

use serde::{Deserialize, Serialize};

const SEPARATOR: char = '.';

/// The identifier of a step result, e.g. `"quiz.question1"`.
///
/// Results collected inside a subtask are keyed by the subtask identifier
/// followed by the nested step identifier, joined with a dot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPath(String);

impl ResultPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path of `step` as seen from the task that contains this one.
    pub fn child(&self, step: &str) -> Self {
        match (self.0.is_empty(), step.is_empty()) {
            (_, true) => self.clone(),
            (true, false) => Self::new(step),
            (false, false) => Self(format!("{}{SEPARATOR}{step}", self.0)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The path relative to the subtask `prefix`.
    ///
    /// Only whole identifiers match: `"quizzes.question1"` is not inside
    /// `"quiz"`. The subtask's own path strips to the empty path.
    pub fn strip_prefix(&self, prefix: &str) -> Option<Self> {
        let rest = self.0.strip_prefix(prefix)?;
        if rest.is_empty() {
            return Some(Self::default());
        }
        rest.strip_prefix(SEPARATOR).map(Self::new)
    }
}

impl fmt::Display for ResultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResultPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ResultPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl PartialEq<str> for ResultPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResultPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
