use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::answer::{Answer, ChoiceValue};
use crate::error::ResultError;
use crate::result_path::ResultPath;

/// Answers captured for one step, keyed by form item identifier.
///
/// An item that was shown but skipped has no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub identifier: ResultPath,
    #[serde(default)]
    pub answers: HashMap<String, Answer>,
}

impl StepResult {
    pub fn new(identifier: impl Into<ResultPath>) -> Self {
        Self {
            identifier: identifier.into(),
            answers: HashMap::new(),
        }
    }

    pub fn with_answer(mut self, item: impl Into<String>, answer: impl Into<Answer>) -> Self {
        self.insert(item, answer);
        self
    }

    pub fn insert(&mut self, item: impl Into<String>, answer: impl Into<Answer>) {
        self.answers.insert(item.into(), answer.into());
    }

    /// The answer for a form item, or `None` when it was skipped.
    pub fn answer(&self, item: &str) -> Option<&Answer> {
        self.answers.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.answers.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    fn path(&self, item: &str) -> ResultPath {
        self.identifier.child(item)
    }

    fn typed<'a, T>(
        &'a self,
        item: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Answer) -> Option<T>,
    ) -> Result<T, ResultError> {
        let answer = self
            .answer(item)
            .ok_or_else(|| ResultError::MissingResult(self.path(item)))?;
        extract(answer).ok_or_else(|| ResultError::TypeMismatch {
            path: self.path(item),
            expected,
            actual: answer.type_name(),
        })
    }

    pub fn get_bool(&self, item: &str) -> Result<bool, ResultError> {
        self.typed(item, "Bool", Answer::as_bool)
    }

    pub fn get_int(&self, item: &str) -> Result<i64, ResultError> {
        self.typed(item, "Int", Answer::as_int)
    }

    /// Integers are widened.
    pub fn get_float(&self, item: &str) -> Result<f64, ResultError> {
        self.typed(item, "Float", Answer::as_float)
    }

    pub fn get_text(&self, item: &str) -> Result<&str, ResultError> {
        self.typed(item, "Text", Answer::as_str)
    }

    pub fn get_date(&self, item: &str) -> Result<NaiveDateTime, ResultError> {
        self.typed(item, "Date", Answer::as_date)
    }

    pub fn get_time(&self, item: &str) -> Result<NaiveTime, ResultError> {
        self.typed(item, "TimeOfDay", Answer::as_time)
    }

    pub fn get_choices(&self, item: &str) -> Result<&[ChoiceValue], ResultError> {
        self.typed(item, "Choices", Answer::as_choices)
    }
}

/// Every step result collected during one run of a task, in the order visited.
///
/// A step can appear more than once when the participant navigates back and
/// forward again; the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub identifier: String,
    #[serde(default)]
    pub results: Vec<StepResult>,
}

impl TaskResult {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// The latest result recorded for a step.
    pub fn step_result(&self, identifier: &str) -> Option<&StepResult> {
        self.results
            .iter()
            .rev()
            .find(|result| result.identifier == identifier)
    }

    /// One result per step, keeping the latest, in first-visit order.
    pub fn consolidated(&self) -> Vec<&StepResult> {
        let mut consolidated: Vec<&StepResult> = Vec::new();
        for result in &self.results {
            match consolidated
                .iter_mut()
                .find(|existing| existing.identifier == result.identifier)
            {
                Some(existing) => *existing = result,
                None => consolidated.push(result),
            }
        }
        consolidated
    }

    /// Results collected under a subtask, with the subtask prefix removed.
    ///
    /// The returned task result is named after the prefix.
    pub fn filter_prefix(&self, prefix: &str) -> TaskResult {
        let results = self
            .results
            .iter()
            .filter_map(|result| {
                let stripped = result.identifier.strip_prefix(prefix)?;
                (!stripped.is_empty()).then(|| StepResult {
                    identifier: stripped,
                    answers: result.answers.clone(),
                })
            })
            .collect();
        TaskResult {
            identifier: prefix.to_string(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_getters() {
        let result = StepResult::new("quiz")
            .with_answer("age", 21)
            .with_answer("resident", true)
            .with_answer("colors", vec![json!("red")]);

        assert_eq!(result.get_int("age").unwrap(), 21);
        assert_eq!(result.get_float("age").unwrap(), 21.0);
        assert!(result.get_bool("resident").unwrap());
        assert_eq!(result.get_choices("colors").unwrap(), [json!("red")]);
    }

    #[test]
    fn getter_errors_carry_the_path() {
        let result = StepResult::new("quiz").with_answer("age", 21);

        match result.get_bool("age") {
            Err(ResultError::TypeMismatch {
                path,
                expected,
                actual,
            }) => {
                assert_eq!(path, "quiz.age");
                assert_eq!(expected, "Bool");
                assert_eq!(actual, "Int");
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            result.get_text("name"),
            Err(ResultError::MissingResult(path)) if path == "quiz.name"
        ));
    }

    #[test]
    fn latest_result_wins() {
        let mut task = TaskResult::new("survey");
        task.push(StepResult::new("q1").with_answer("q1", 1));
        task.push(StepResult::new("q2").with_answer("q2", 2));
        task.push(StepResult::new("q1").with_answer("q1", 3));

        assert_eq!(task.step_result("q1").unwrap().get_int("q1").unwrap(), 3);
        let consolidated = task.consolidated();
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].identifier, "q1");
        assert_eq!(consolidated[0].get_int("q1").unwrap(), 3);
    }

    #[test]
    fn filter_prefix_strips_subtask() {
        let mut task = TaskResult::new("survey");
        task.push(StepResult::new("intro"));
        task.push(StepResult::new("quiz.question1").with_answer("question1", true));
        task.push(StepResult::new("quizzes.other"));

        let nested = task.filter_prefix("quiz");
        assert_eq!(nested.identifier, "quiz");
        assert_eq!(nested.len(), 1);
        assert_eq!(nested.results[0].identifier, "question1");
    }
}
