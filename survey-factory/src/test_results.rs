//! Build task results for exercising navigation without a UI.
//!
//! `TestResults` records answers the way a run would, step by step, so rules
//! and data-group folds can be checked against a compiled task.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_factory::{TestResults, next_step_identifier};
//!
//! let results = TestResults::new()
//!     .with_bool("quiz", "q1", true)
//!     .with_choices("cohort", "cohort", vec![json!("groupA")])
//!     .build();
//!
//! let next = next_step_identifier(&task, Some("quiz"), &results);
//! ```

use serde_json::Value;

use crate::{Answer, ResultPath, StepResult, TaskResult};

/// Answers keyed by step path and form item, in the order they were added.
///
/// Step paths use dots for subtasks: `"quiz.q1"` is step `q1` inside the
/// subtask `quiz`.
#[derive(Debug, Clone, Default)]
pub struct TestResults {
    identifier: String,
    results: Vec<StepResult>,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the task result.
    pub fn named(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    fn step_mut(&mut self, step: &str) -> &mut StepResult {
        let path = ResultPath::new(step);
        match self.results.iter().position(|r| r.identifier == path) {
            Some(index) => &mut self.results[index],
            None => {
                self.results.push(StepResult::new(path));
                let last = self.results.len() - 1;
                &mut self.results[last]
            }
        }
    }

    /// Record a visit to a step without any answer.
    pub fn with_step(mut self, step: &str) -> Self {
        self.step_mut(step);
        self
    }

    /// Add an answer for a form item of a step.
    pub fn with_answer(mut self, step: &str, item: &str, answer: impl Into<Answer>) -> Self {
        self.step_mut(step).insert(item, answer);
        self
    }

    pub fn with_bool(self, step: &str, item: &str, value: bool) -> Self {
        self.with_answer(step, item, Answer::Bool(value))
    }

    pub fn with_int(self, step: &str, item: &str, value: i64) -> Self {
        self.with_answer(step, item, Answer::Int(value))
    }

    pub fn with_float(self, step: &str, item: &str, value: f64) -> Self {
        self.with_answer(step, item, Answer::Float(value))
    }

    pub fn with_text(self, step: &str, item: &str, value: impl Into<String>) -> Self {
        self.with_answer(step, item, Answer::Text(value.into()))
    }

    /// Add the selected values of a choice question.
    pub fn with_choices(self, step: &str, item: &str, values: Vec<Value>) -> Self {
        self.with_answer(step, item, Answer::Choices(values))
    }

    pub fn build(self) -> TaskResult {
        TaskResult {
            identifier: self.identifier,
            results: self.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answers_group_by_step() {
        let results = TestResults::new()
            .named("quiz")
            .with_bool("intro", "ready", true)
            .with_int("details", "age", 40)
            .with_text("intro", "name", "Ada")
            .with_choices("details", "colors", vec![json!("red")])
            .build();

        assert_eq!(results.identifier, "quiz");
        assert_eq!(results.len(), 2);
        let intro = results.step_result("intro").unwrap();
        assert!(intro.get_bool("ready").unwrap());
        assert_eq!(intro.get_text("name").unwrap(), "Ada");
        assert_eq!(results.step_result("details").unwrap().get_int("age").unwrap(), 40);
    }

    #[test]
    fn visited_step_has_no_answers() {
        let results = TestResults::new().with_step("intro").build();
        assert!(results.step_result("intro").unwrap().is_empty());
    }

    #[test]
    fn subtask_paths_filter_by_prefix() {
        let results = TestResults::new()
            .with_bool("quiz.q1", "q1", true)
            .with_bool("other", "x", false)
            .build();
        let nested = results.filter_prefix("quiz");
        assert_eq!(nested.len(), 1);
        assert_eq!(nested.results[0].identifier, "q1");
    }
}
