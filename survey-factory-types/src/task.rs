use serde::{Deserialize, Serialize};

use crate::step::Step;

/// An ordered sequence of steps.
///
/// Steps are visited in order unless a navigation rule or a direct
/// `next_step_identifier` redirects the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub identifier: String,
    pub steps: Vec<Step>,
}

impl Task {
    pub fn new(identifier: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            identifier: identifier.into(),
            steps,
        }
    }

    pub fn step(&self, identifier: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.identifier() == identifier)
    }

    pub fn index_of(&self, identifier: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.identifier() == identifier)
    }

    /// The step following the given one in declared order.
    pub fn step_after(&self, identifier: &str) -> Option<&Step> {
        self.steps.get(self.index_of(identifier)? + 1)
    }

    pub fn first_step(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_identifiers(&self) -> Vec<&str> {
        self.steps.iter().map(Step::identifier).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::InstructionStep;

    fn task() -> Task {
        Task::new(
            "survey",
            vec![
                Step::Instruction(InstructionStep::new("intro")),
                Step::Instruction(InstructionStep::new("question")),
                Step::Instruction(InstructionStep::new("done")),
            ],
        )
    }

    #[test]
    fn lookup_by_identifier() {
        let task = task();
        assert_eq!(task.index_of("question"), Some(1));
        assert_eq!(task.step_after("question").map(Step::identifier), Some("done"));
        assert!(task.step_after("done").is_none());
        assert!(task.step("missing").is_none());
        assert_eq!(task.step_identifiers(), ["intro", "question", "done"]);
    }
}
