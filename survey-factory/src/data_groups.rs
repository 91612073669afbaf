//! Data groups: study cohorts chosen through choice steps.
//!
//! Each data-groups step owns the groups its choices name. Folding a run's
//! results replaces only those groups, so several steps can share one set.

use std::collections::BTreeSet;

use survey_factory_types::{
    Answer, ChoiceValue, DataGroupsStep, Step, StepResult, Task, TaskResult, value_as_groups,
};

/// Group membership read from and written to a data-groups step.
pub trait DataGroupSelection {
    /// Every group any choice of the step stands for.
    fn universe(&self) -> BTreeSet<String>;

    /// Groups of the choices selected in a result of this step.
    fn selected_groups(&self, result: &StepResult) -> BTreeSet<String>;

    /// `current` with this step's groups replaced by the selected ones.
    fn union_groups(&self, current: &BTreeSet<String>, result: &StepResult) -> BTreeSet<String> {
        let universe = self.universe();
        current
            .iter()
            .filter(|group| !universe.contains(*group))
            .cloned()
            .chain(self.selected_groups(result))
            .collect()
    }

    /// The result that would select the participant's current groups.
    ///
    /// `None` when a choice's value is not its own group list, since the
    /// value then cannot be recovered from the groups.
    fn step_result(&self, current: Option<&BTreeSet<String>>) -> Option<StepResult>;
}

impl DataGroupSelection for DataGroupsStep {
    fn universe(&self) -> BTreeSet<String> {
        self.choice_format()
            .map(|format| format.choices.iter().flat_map(|c| c.groups()).collect())
            .unwrap_or_default()
    }

    fn selected_groups(&self, result: &StepResult) -> BTreeSet<String> {
        let (Some(format), Some(form_item)) = (self.choice_format(), self.form.form_items.first())
        else {
            return BTreeSet::new();
        };
        let Some(answer) = result.answer(&form_item.identifier) else {
            return BTreeSet::new();
        };
        format
            .choices
            .iter()
            .filter(|choice| answer.contains_choice(&choice.value))
            .flat_map(|choice| choice.groups())
            .collect()
    }

    fn step_result(&self, current: Option<&BTreeSet<String>>) -> Option<StepResult> {
        let format = self.choice_format()?;
        let form_item = self.form.form_items.first()?;
        if format
            .choices
            .iter()
            .any(|choice| value_as_groups(&choice.value) != choice.groups())
        {
            return None;
        }

        let mut result = StepResult::new(self.form.identifier.as_str());
        let universe = self.universe();
        let owned: BTreeSet<&String> = match current {
            Some(current) => current.intersection(&universe).collect(),
            None => return Some(result),
        };
        if owned.is_empty() {
            return Some(result);
        }

        let values: Vec<ChoiceValue> = format
            .choices
            .iter()
            .filter(|choice| {
                let groups = choice.groups();
                !groups.is_empty() && groups.iter().all(|group| owned.contains(group))
            })
            .map(|choice| choice.value.clone())
            .collect();
        result.insert(form_item.identifier.as_str(), Answer::Choices(values));
        Some(result)
    }
}

/// Fold the data-group steps of a task over `current`, in declared order.
///
/// Only steps with a result take part; subtasks see their own results with
/// the subtask prefix removed. Returns the new set and whether it differs.
pub fn union_data_groups(
    task: &Task,
    current: &BTreeSet<String>,
    results: &TaskResult,
) -> (BTreeSet<String>, bool) {
    let groups = fold_task(task, current.clone(), results);
    let changed = &groups != current;
    tracing::debug!(
        task = %task.identifier,
        groups = ?groups,
        changed,
        "folded data groups"
    );
    (groups, changed)
}

fn fold_task(task: &Task, mut groups: BTreeSet<String>, results: &TaskResult) -> BTreeSet<String> {
    for step in &task.steps {
        match step {
            Step::DataGroups(step) => {
                if let Some(result) = results.step_result(&step.form.identifier) {
                    groups = step.union_groups(&groups, result);
                }
            }
            other => {
                if let Some(subtask) = other.subtask() {
                    let nested = results.filter_prefix(&subtask.identifier);
                    groups = fold_task(subtask, groups, &nested);
                }
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultStepFactory;
    use crate::test_results::TestResults;
    use serde_json::{Value, json};

    fn groups(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn data_groups_step(choices: Value) -> DataGroupsStep {
        let factory = DefaultStepFactory::from_document(&json!({
            "steps": [ { "identifier": "cohort", "type": "dataGroups", "items": choices } ],
        }))
        .unwrap();
        factory.steps()[0].as_data_groups().unwrap().clone()
    }

    #[test]
    fn universe_flattens_choice_groups() {
        let step = data_groups_step(json!([
            { "text": "A", "value": "groupA" },
            { "text": "CD", "value": ["groupC", "groupD"] },
            { "text": "None", "value": "" },
        ]));
        assert_eq!(step.universe(), groups(&["groupA", "groupC", "groupD"]));
    }

    #[test]
    fn union_replaces_owned_groups_only() {
        let step = data_groups_step(json!([
            { "text": "A", "value": "groupA" },
            { "text": "B", "value": "groupB" },
        ]));
        let result = StepResult::new("cohort").with_answer("cohort", vec![json!("groupB")]);
        assert_eq!(
            step.union_groups(&groups(&["groupA", "test_user"]), &result),
            groups(&["groupB", "test_user"])
        );
    }

    #[test]
    fn inverse_picks_choices_inside_current_groups() {
        let step = data_groups_step(json!([
            { "text": "A", "value": "groupA" },
            { "text": "CD", "value": ["groupC", "groupD"] },
            { "text": "None", "value": "" },
        ]));
        let result = step
            .step_result(Some(&groups(&["groupC", "groupD", "test_user"])))
            .unwrap();
        assert_eq!(
            result.get_choices("cohort").unwrap(),
            [json!(["groupC", "groupD"])]
        );

        let partial = step.step_result(Some(&groups(&["groupC", "groupA"]))).unwrap();
        assert_eq!(partial.get_choices("cohort").unwrap(), [json!("groupA")]);
    }

    #[test]
    fn inverse_without_overlap_is_empty() {
        let step = data_groups_step(json!([ { "text": "A", "value": "groupA" } ]));
        assert!(step.step_result(None).unwrap().is_empty());
        assert!(step.step_result(Some(&groups(&["other"]))).unwrap().is_empty());
    }

    #[test]
    fn inverse_needs_values_that_are_groups() {
        let step = data_groups_step(json!([
            { "text": "Yes", "value": true, "dataGroup": ["eligible"] },
        ]));
        assert!(step.step_result(Some(&groups(&["eligible"]))).is_none());
    }

    #[test]
    fn fold_skips_steps_without_results() {
        let task = DefaultStepFactory::from_document(&json!({
            "steps": [
                { "identifier": "first", "type": "dataGroups", "items": [ { "text": "A", "value": "groupA" }, { "text": "B", "value": "groupB" } ] },
                { "identifier": "second", "type": "dataGroups", "items": [ { "text": "C", "value": "groupC" } ] },
            ],
        }))
        .unwrap()
        .create_task("task");

        let results = TestResults::new()
            .with_choices("first", "first", vec![json!("groupB")])
            .build();
        let (union, changed) = union_data_groups(&task, &groups(&["groupA", "groupC"]), &results);
        assert_eq!(union, groups(&["groupB", "groupC"]));
        assert!(changed);

        let (same, changed) = union_data_groups(&task, &groups(&["groupB"]), &results);
        assert_eq!(same, groups(&["groupB"]));
        assert!(!changed);
    }
}
