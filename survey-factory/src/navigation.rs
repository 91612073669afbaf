//! Navigation: where a run goes after a step, given the answers so far.

use survey_factory_types::{
    DataGroupsStep, FormItem, NULL_STEP_IDENTIFIER, NavigationFormStep, NavigationRules,
    NavigationSubtaskStep, ResultPath, Step, SurveyRule, Task, TaskResult,
};

/// A step that can redirect the task based on collected results.
///
/// Implementors say which results belong to them and which form items those
/// results answer; the evaluation itself is shared.
pub trait SurveyNavigation {
    fn navigation(&self) -> &NavigationRules;

    /// Form items answered by the step result at `path`, or `None` when the
    /// result belongs to some other step.
    fn form_items_for(&self, path: &ResultPath) -> Option<&[FormItem]>;

    /// The skip destination the collected results call for, if any.
    fn next_step_identifier(&self, results: &TaskResult) -> Option<String> {
        evaluate(self.navigation(), |path| self.form_items_for(path), results)
    }
}

fn evaluate<'s>(
    navigation: &NavigationRules,
    form_items_for: impl Fn(&ResultPath) -> Option<&'s [FormItem]>,
    results: &TaskResult,
) -> Option<String> {
    if navigation.is_empty() {
        return None;
    }

    let mut found_result = false;
    let mut matched: Vec<&SurveyRule> = Vec::new();
    for result in results.consolidated() {
        let Some(form_items) = form_items_for(&result.identifier) else {
            continue;
        };
        found_result = true;
        for form_item in form_items {
            let answer = result.answer(&form_item.identifier);
            if let Some(rule) = navigation.first_passing(&form_item.identifier, answer) {
                tracing::trace!(
                    result = %result.identifier,
                    item = %form_item.identifier,
                    skip = %rule.skip_identifier,
                    "rule passed"
                );
                matched.push(rule);
            }
        }
    }

    if !found_result {
        return None;
    }

    if let Some(failed) = &navigation.failed_skip_identifier {
        return (matched.len() != navigation.len()).then(|| failed.clone());
    }

    let skip = &matched.first()?.skip_identifier;
    if matched.iter().any(|rule| &rule.skip_identifier != skip) {
        tracing::debug!(skip = %skip, "matched rules disagree on destination");
        return None;
    }
    let required = navigation
        .rules
        .iter()
        .filter(|rule| &rule.skip_identifier == skip)
        .count();
    (matched.len() == required).then(|| skip.clone())
}

/// Form items of the step at `path` inside `task`, descending into subtasks.
///
/// Step identifiers may themselves contain dots, so each step is tried as a
/// whole-identifier prefix of the path.
fn nested_form_items<'t>(task: &'t Task, path: &ResultPath) -> Option<&'t [FormItem]> {
    task.steps.iter().find_map(|step| {
        let rest = path.strip_prefix(step.identifier())?;
        if rest.is_empty() {
            Some(step.form_items())
        } else {
            nested_form_items(step.subtask()?, &rest)
        }
    })
}

impl SurveyNavigation for NavigationFormStep {
    fn navigation(&self) -> &NavigationRules {
        &self.navigation
    }

    fn form_items_for(&self, path: &ResultPath) -> Option<&[FormItem]> {
        (path.as_str() == self.form.identifier).then_some(self.form.form_items.as_slice())
    }
}

impl SurveyNavigation for DataGroupsStep {
    fn navigation(&self) -> &NavigationRules {
        &self.navigation
    }

    fn form_items_for(&self, path: &ResultPath) -> Option<&[FormItem]> {
        (path.as_str() == self.form.identifier).then_some(self.form.form_items.as_slice())
    }
}

impl SurveyNavigation for NavigationSubtaskStep {
    fn navigation(&self) -> &NavigationRules {
        &self.navigation
    }

    fn form_items_for(&self, path: &ResultPath) -> Option<&[FormItem]> {
        let nested = path.strip_prefix(&self.subtask.identifier)?;
        nested_form_items(&self.subtask.subtask, &nested)
    }
}

/// The skip destination of a navigation-capable step; `None` for every other
/// kind of step.
pub fn navigation_target(step: &Step, results: &TaskResult) -> Option<String> {
    match step {
        Step::NavigationForm(step) => step.next_step_identifier(results),
        Step::DataGroups(step) => step.next_step_identifier(results),
        Step::NavigationSubtask(step) => step.next_step_identifier(results),
        _ => None,
    }
}

/// The step that follows `current` in a run of `task`.
///
/// `None` as `current` starts the task. Navigation rules win over a direct
/// `nextStepIdentifier`, which wins over declared order. The null step, and
/// any destination the task does not contain, end the run.
pub fn next_step<'t>(task: &'t Task, current: Option<&str>, results: &TaskResult) -> Option<&'t Step> {
    let Some(current) = current else {
        return task.first_step();
    };
    let Some(step) = task.step(current) else {
        tracing::warn!(task = %task.identifier, step = %current, "current step is not part of the task");
        return None;
    };

    let target = navigation_target(step, results)
        .or_else(|| step.next_step_identifier().map(str::to_string));
    let Some(target) = target else {
        let next = task.step_after(current);
        tracing::debug!(
            step = %current,
            next = next.map(Step::identifier).unwrap_or("<end>"),
            "next step in declared order"
        );
        return next;
    };

    if target == NULL_STEP_IDENTIFIER {
        tracing::debug!(step = %current, "navigation ends the task");
        return None;
    }
    match task.step(&target) {
        Some(next) => {
            tracing::debug!(step = %current, next = %target, "navigation redirects");
            Some(next)
        }
        None => {
            tracing::warn!(
                task = %task.identifier,
                step = %current,
                target = %target,
                "navigation target is not part of the task"
            );
            None
        }
    }
}

/// Identifier of the step that follows `current`, or `None` at the end.
pub fn next_step_identifier(task: &Task, current: Option<&str>, results: &TaskResult) -> Option<String> {
    next_step(task, current, results).map(|step| step.identifier().to_string())
}
