//! Form, subtask and data-group steps.

use survey_factory_types::{
    DataGroupsStep, FormItem, FormStep, FormStyle, FormSubtype, NavigationFormStep,
    NavigationSubtaskStep, Step, SubtaskStep, SurveyItem, Task,
};

use crate::defect::BuildDefect;
use crate::factory::{StepContext, StepFactory};
use crate::instruction::create_learn_more_action;
use crate::rules::{create_navigation_rules, uses_navigation};

/// Copy the step-level text of an item onto a form step.
pub fn map_step_values(form: &mut FormStep, item: &SurveyItem) {
    form.title = item.title().map(|s| s.trim().to_string());
    form.text = item.text().map(|s| s.trim().to_string());
    form.footnote = item.footnote().map(str::to_string);
    form.optional = item.is_optional();
}

/// Build a form item from an item, with `subtype` as the fallback type.
pub fn create_form_item<F>(factory: &F, item: &SurveyItem, subtype: Option<FormSubtype>) -> FormItem
where
    F: StepFactory + ?Sized,
{
    let subtype = item.form_subtype().or(subtype);
    let format = factory.create_answer_format(item, subtype);
    FormItem::new(item.identifier(), item.text().map(str::to_string), format)
        .optional(item.is_optional())
        .with_placeholder(item.placeholder().map(str::to_string))
}

/// The subtype nested items and rules fall back to. Toggles are lists of
/// booleans; compound items have no shared type.
fn nested_subtype(subtype: FormSubtype) -> Option<FormSubtype> {
    match subtype {
        FormSubtype::Toggle => Some(FormSubtype::Boolean),
        FormSubtype::Compound => None,
        other => Some(other),
    }
}

/// The nested items of an item. Entries that are not survey items are
/// reported and left out.
fn nested_items<F>(factory: &F, item: &SurveyItem) -> Vec<SurveyItem>
where
    F: StepFactory + ?Sized,
{
    let mut parsed = Vec::new();
    for (index, nested) in item.nested_items().into_iter().enumerate() {
        match nested {
            Ok(nested) => parsed.push(nested),
            Err(err) => factory.report_defect(
                item.identifier(),
                BuildDefect::InvalidItem {
                    index,
                    message: err.to_string(),
                },
            ),
        }
    }
    parsed
}

/// Identifiers of every form item in `task`, including those of subtasks.
fn task_form_item_ids(task: &Task) -> Vec<&str> {
    let mut ids = Vec::new();
    for step in &task.steps {
        ids.extend(step.form_items().iter().map(|form_item| form_item.identifier.as_str()));
        if let Some(subtask) = step.subtask() {
            ids.extend(task_form_item_ids(subtask));
        }
    }
    ids
}

fn has_form_item(form: &FormStep, identifier: &str) -> bool {
    form.form_items
        .iter()
        .any(|form_item| form_item.identifier == identifier)
}

fn create_form_items<F>(factory: &F, item: &SurveyItem, subtype: FormSubtype) -> Vec<FormItem>
where
    F: StepFactory + ?Sized,
{
    if subtype.is_compound() {
        let fallback = nested_subtype(subtype);
        return nested_items(factory, item)
            .iter()
            .map(|nested| factory.create_form_item(nested, fallback))
            .collect();
    }
    // The item's text is the step text; the single field carries none.
    let mut form_item = factory.create_form_item(item, Some(subtype));
    form_item.text = None;
    vec![form_item]
}

/// Build a form step.
///
/// Compound and toggle items become one step with a field per nested item;
/// every other subtype is a one-field step. A step that routes the task
/// carries navigation rules, unless it lives in a subtask, where the subtask
/// wrapper routes instead.
pub fn create_form_step<F>(
    factory: &F,
    item: &SurveyItem,
    subtype: FormSubtype,
    context: StepContext,
) -> Step
where
    F: StepFactory + ?Sized,
{
    let mut form = FormStep::new(item.identifier());
    map_step_values(&mut form, item);
    form.form_items = create_form_items(factory, item, subtype);

    let style = if item.should_use_question_style() {
        Some(FormStyle::Question)
    } else if subtype == FormSubtype::Toggle {
        Some(FormStyle::Toggle)
    } else if !context.is_subtask_step && uses_navigation(item) {
        Some(FormStyle::Form)
    } else {
        None
    };

    match style {
        Some(style) => {
            let navigation = create_navigation_rules(factory, item, nested_subtype(subtype), |id| {
                has_form_item(&form, id)
            });
            Step::NavigationForm(NavigationFormStep {
                form,
                style,
                navigation,
                learn_more_action: create_learn_more_action(factory, item),
            })
        }
        None => Step::Form(form),
    }
}

/// Build the nested steps of an item as one subtask step.
///
/// When any nested item routes the task, the wrapper carries the rules so the
/// run can leave the subtask.
pub fn create_subtask_step<F>(factory: &F, item: &SurveyItem) -> Step
where
    F: StepFactory + ?Sized,
{
    let steps = nested_items(factory, item)
        .iter()
        .filter_map(|nested| factory.create_step(nested, StepContext::subtask()))
        .collect();
    let subtask = SubtaskStep::new(Task::new(item.identifier(), steps));

    if uses_navigation(item) {
        let reachable = task_form_item_ids(&subtask.subtask);
        let navigation = create_navigation_rules(factory, item, None, |id| {
            reachable.iter().any(|known| *known == id)
        });
        Step::NavigationSubtask(NavigationSubtaskStep { subtask, navigation })
    } else {
        Step::Subtask(subtask)
    }
}

/// Build a data-group selection step. Multiple choice unless the type names
/// another subtype.
pub fn create_data_groups_step<F>(
    factory: &F,
    item: &SurveyItem,
    subtype: Option<FormSubtype>,
) -> Step
where
    F: StepFactory + ?Sized,
{
    let subtype = subtype.unwrap_or(FormSubtype::MultipleChoice);
    let mut form = FormStep::new(item.identifier());
    map_step_values(&mut form, item);
    let mut form_item = factory.create_form_item(item, Some(subtype));
    form_item.text = None;
    form.form_items = vec![form_item];

    let navigation =
        create_navigation_rules(factory, item, Some(subtype), |id| has_form_item(&form, id));
    Step::DataGroups(DataGroupsStep { form, navigation })
}

/// A multiple-choice step over the item's entries, for selection tracking.
pub fn create_tracked_selection_step<F>(factory: &F, item: &SurveyItem) -> Step
where
    F: StepFactory + ?Sized,
{
    let mut form = FormStep::new(item.identifier());
    map_step_values(&mut form, item);
    let format = factory.create_answer_format(item, Some(FormSubtype::MultipleChoice));
    form.form_items = vec![FormItem::new(item.identifier(), None, format).optional(item.is_optional())];
    Step::Form(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultStepFactory;
    use serde_json::{Value, json};
    use survey_factory_types::{AnswerFormat, NULL_STEP_IDENTIFIER};

    fn item(value: Value) -> SurveyItem {
        SurveyItem::from_value(&value).unwrap()
    }

    fn build(value: Value) -> Step {
        let factory = DefaultStepFactory::default();
        factory
            .create_step(&item(value), StepContext::default())
            .unwrap()
    }

    #[test]
    fn plain_question_is_a_form() {
        let step = build(json!({
            "identifier": "name",
            "type": "textfield",
            "title": "Name",
            "text": "What should we call you?",
            "placeholder": "Jane",
            "optional": true,
        }));
        let Step::Form(form) = step else {
            panic!("expected a plain form");
        };
        assert_eq!(form.text.as_deref(), Some("What should we call you?"));
        assert!(form.optional);
        let field = &form.form_items[0];
        assert_eq!(field.identifier, "name");
        assert!(field.text.is_none());
        assert_eq!(field.placeholder.as_deref(), Some("Jane"));
        assert!(matches!(field.answer_format, Some(AnswerFormat::Text(_))));
    }

    #[test]
    fn compound_fans_out_nested_items() {
        let step = build(json!({
            "identifier": "quiz",
            "type": "compound",
            "items": [
                { "identifier": "q1", "type": "boolean", "text": "Is the sky blue?" },
                { "identifier": "q2", "type": "integer", "text": "How many legs?" },
            ],
        }));
        let ids: Vec<&str> = step.form_items().iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids, ["q1", "q2"]);
        assert_eq!(step.form_items()[0].text.as_deref(), Some("Is the sky blue?"));
        assert!(matches!(step, Step::Form(_)));
    }

    #[test]
    fn question_style_forces_navigation_step() {
        let step = build(json!({ "identifier": "q", "type": "boolean", "questionStyle": true }));
        match step {
            Step::NavigationForm(nav) => {
                assert_eq!(nav.style, FormStyle::Question);
                assert!(nav.navigation.is_empty());
            }
            other => panic!("expected a navigation form, got {other:?}"),
        }
    }

    #[test]
    fn toggle_items_are_booleans() {
        let step = build(json!({
            "identifier": "symptoms",
            "type": "toggle",
            "items": [ { "identifier": "cough" }, { "identifier": "fever" } ],
        }));
        match &step {
            Step::NavigationForm(nav) => assert_eq!(nav.style, FormStyle::Toggle),
            other => panic!("expected a toggle form, got {other:?}"),
        }
        assert!(
            step.form_items()
                .iter()
                .all(|i| i.answer_format == Some(AnswerFormat::Boolean))
        );
    }

    #[test]
    fn skip_identifier_makes_a_navigation_form() {
        let step = build(json!({
            "identifier": "eligible",
            "type": "boolean",
            "expectedAnswer": true,
            "skipIdentifier": "ineligible",
        }));
        let navigation = step.navigation().unwrap();
        assert_eq!(navigation.len(), 1);
        assert_eq!(navigation.rules[0].result_identifier, "eligible");
        assert_eq!(navigation.failed_skip_identifier.as_deref(), Some("ineligible"));
    }

    #[test]
    fn subtask_children_leave_navigation_to_the_wrapper() {
        let step = build(json!({
            "identifier": "quiz",
            "type": "subtask",
            "items": [
                { "identifier": "q1", "type": "boolean", "expectedAnswer": true, "skipIdentifier": "end" },
                { "identifier": "q2", "type": "boolean" },
            ],
        }));
        let Step::NavigationSubtask(wrapper) = &step else {
            panic!("expected a navigation subtask, got {step:?}");
        };
        assert!(wrapper.subtask.subtask.steps.iter().all(|s| matches!(s, Step::Form(_))));
        assert_eq!(wrapper.navigation.rules[0].result_identifier, "q1");
        assert_eq!(wrapper.navigation.rules[0].skip_identifier, "end");
        assert_eq!(
            wrapper.navigation.failed_skip_identifier.as_deref(),
            Some(NULL_STEP_IDENTIFIER)
        );
    }

    #[test]
    fn subtask_without_rules_is_plain() {
        let step = build(json!({
            "identifier": "about",
            "type": "subtask",
            "items": [ { "identifier": "intro", "type": "instruction" } ],
        }));
        assert!(matches!(step, Step::Subtask(_)));
    }

    #[test]
    fn compound_reports_unparsable_items_and_their_rules() {
        let factory = DefaultStepFactory::default();
        let quiz = item(json!({
            "identifier": "quiz",
            "type": "compound",
            "skipIdentifier": "consent",
            "items": [
                { "identifier": "q1", "type": "boolean", "expectedAnswer": true },
                { "type": "boolean", "expectedAnswer": true },
            ],
        }));
        let step = factory.create_step(&quiz, StepContext::default()).unwrap();

        let ids: Vec<&str> = step.form_items().iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids, ["q1"]);
        let rules: Vec<&str> = step
            .navigation()
            .unwrap()
            .rules
            .iter()
            .map(|r| r.result_identifier.as_str())
            .collect();
        assert_eq!(rules, ["q1"]);

        let defects: Vec<BuildDefect> = factory.take_defects().into_iter().map(|d| d.defect).collect();
        assert!(matches!(defects[0], BuildDefect::InvalidItem { index: 1, .. }));
        assert_eq!(defects[1], BuildDefect::UnreachableRule { result: "quiz".to_string() });

        let results = crate::TestResults::new().with_bool("quiz", "q1", true).build();
        assert_eq!(crate::navigation_target(&step, &results), None);
    }

    #[test]
    fn subtask_rules_must_name_a_nested_form_item() {
        let factory = DefaultStepFactory::default();
        let step = factory
            .create_step(
                &item(json!({
                    "identifier": "quiz",
                    "type": "subtask",
                    "skipIdentifier": "retry",
                    "rules": [
                        { "identifier": "q1", "type": "boolean", "expectedAnswer": true },
                        { "identifier": "q9", "type": "boolean", "expectedAnswer": true },
                    ],
                    "items": [
                        { "identifier": "q1", "type": "boolean" },
                        "not an item",
                    ],
                })),
                StepContext::default(),
            )
            .unwrap();
        let Step::NavigationSubtask(wrapper) = &step else {
            panic!("expected a navigation subtask, got {step:?}");
        };
        assert_eq!(wrapper.subtask.subtask.steps.len(), 1);
        assert_eq!(wrapper.navigation.rules.len(), 1);
        assert_eq!(wrapper.navigation.rules[0].result_identifier, "q1");

        let defects = factory.take_defects();
        assert_eq!(defects.len(), 2);
        assert!(matches!(defects[0].defect, BuildDefect::InvalidItem { index: 1, .. }));
        assert_eq!(
            defects[1].defect,
            BuildDefect::UnreachableRule { result: "q9".to_string() }
        );
    }

    #[test]
    fn data_groups_default_to_multiple_choice() {
        let step = build(json!({
            "identifier": "cohort",
            "type": "dataGroups",
            "title": "Pick",
            "items": [ { "text": "A", "value": "groupA" } ],
        }));
        let data_groups = step.as_data_groups().unwrap();
        assert_eq!(data_groups.form.form_items[0].identifier, "cohort");
        assert_eq!(
            data_groups.choice_format().unwrap().style,
            survey_factory_types::ChoiceStyle::MultipleChoice
        );
    }
}
