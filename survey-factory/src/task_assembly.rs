//! Putting built steps together into a task.

use std::collections::HashSet;

use survey_factory_types::{Step, SurveyItem, Task};

use crate::defect::BuildDefect;
use crate::factory::{StepContext, StepFactory};
use crate::instruction::mark_completion;

/// A task over `steps`. Identifiers must be unique: on a duplicate the
/// earlier step is dropped and the defect reported.
pub fn assemble_task<F>(factory: &F, identifier: &str, steps: Vec<Step>) -> Task
where
    F: StepFactory + ?Sized,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut assembled: Vec<Step> = Vec::with_capacity(steps.len());
    for step in steps {
        if !seen.insert(step.identifier().to_string()) {
            factory.report_defect(
                identifier,
                BuildDefect::DuplicateStepIdentifier {
                    identifier: step.identifier().to_string(),
                },
            );
            assembled.retain(|existing| existing.identifier() != step.identifier());
        }
        assembled.push(step);
    }
    tracing::debug!(task = %identifier, steps = assembled.len(), "assembled task");
    Task::new(identifier, assembled)
}

/// Build every element and assemble them. A trailing instruction becomes
/// the completion step.
pub fn create_task_with_survey_elements<F>(factory: &F, identifier: &str, elements: &[SurveyItem]) -> Task
where
    F: StepFactory + ?Sized,
{
    let mut steps: Vec<Step> = elements
        .iter()
        .filter_map(|element| factory.create_step(element, StepContext::default()))
        .collect();
    if let Some(Step::Instruction(last)) = steps.last_mut() {
        mark_completion(last, &factory.config().copyright_title);
    }
    assemble_task(factory, identifier, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultStepFactory;
    use serde_json::{Value, json};
    use survey_factory_types::LearnMoreKind;

    fn items(values: Value) -> Vec<SurveyItem> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| SurveyItem::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn trailing_instruction_becomes_completion() {
        let factory = DefaultStepFactory::default();
        let task = factory.create_task_with_survey_elements(
            "survey",
            &items(json!([
                { "identifier": "q", "type": "boolean" },
                { "identifier": "thanks", "type": "instruction", "detailText": "(c) 2016 Example" },
            ])),
        );
        let last = task.step("thanks").unwrap().as_instruction().unwrap();
        assert!(last.is_completion_step);
        let action = last.learn_more_action.as_ref().unwrap();
        assert_eq!(action.button_text.as_deref(), Some("Copyright"));
        assert_eq!(
            action.kind,
            LearnMoreKind::PopUp {
                text: "(c) 2016 Example".into()
            }
        );
    }

    #[test]
    fn trailing_form_is_left_alone() {
        let factory = DefaultStepFactory::default();
        let task = factory.create_task_with_survey_elements(
            "survey",
            &items(json!([
                { "identifier": "intro", "type": "instruction" },
                { "identifier": "q", "type": "boolean" },
            ])),
        );
        assert!(!task.step("intro").unwrap().as_instruction().unwrap().is_completion_step);
    }

    #[test]
    fn duplicate_identifiers_keep_the_later_step() {
        let factory = DefaultStepFactory::default();
        let task = factory.create_task_with_survey_elements(
            "survey",
            &items(json!([
                { "identifier": "q", "type": "boolean", "title": "first" },
                { "identifier": "other", "type": "boolean" },
                { "identifier": "q", "type": "boolean", "title": "second" },
            ])),
        );
        assert_eq!(task.step_identifiers(), ["other", "q"]);
        assert_eq!(task.step("q").unwrap().title(), Some("second"));
        let defects = factory.take_defects();
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].item, "survey");
    }
}
