//! Instruction, completion and custom placeholder steps.

use serde_json::Value;
use survey_factory_types::{
    InstructionStep, InstructionSubtype, LearnMoreAction, Step, SurveyItem, SurveyItemType, keys,
};

use crate::factory::{StepContext, StepFactory};

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).map(str::to_string)
}

/// The learn-more button described by an item, if any.
///
/// A `learnMoreAction` object wins, then an HTML page, then an alert text.
/// `learnMoreButtonText` sets the button title of whichever was built.
pub fn create_learn_more_action<F>(factory: &F, item: &SurveyItem) -> Option<LearnMoreAction>
where
    F: StepFactory + ?Sized,
{
    let action = if let Some(object) = item.get(keys::LEARN_MORE_ACTION).and_then(Value::as_object) {
        let identifier = object
            .get(keys::IDENTIFIER)
            .and_then(Value::as_str)
            .unwrap_or(item.identifier());
        LearnMoreAction::custom(identifier, object.clone())
    } else if let Some(name) = item.string(keys::LEARN_MORE_HTML_CONTENT_URL) {
        let url = factory.resources().html(name)?;
        LearnMoreAction::url(name, url)
    } else {
        let text = item.string(keys::LEARN_MORE_ALERT_TEXT)?;
        LearnMoreAction::pop_up(item.identifier(), text)
    };

    Some(match item.string(keys::LEARN_MORE_BUTTON_TEXT) {
        Some(text) => action.with_button_text(text),
        None => action,
    })
}

/// Map an item onto an instruction step.
pub fn create_instruction_step<F>(
    factory: &F,
    item: &SurveyItem,
    subtype: InstructionSubtype,
) -> InstructionStep
where
    F: StepFactory + ?Sized,
{
    let resources = factory.resources();
    InstructionStep {
        identifier: item.identifier().to_string(),
        title: trimmed(item.title()),
        text: trimmed(item.text()),
        detail_text: trimmed(item.detail_text()),
        footnote: trimmed(item.footnote()),
        image: item.image().and_then(|name| resources.image(name)),
        icon_image: item.icon_image().and_then(|name| resources.image(name)),
        learn_more_action: create_learn_more_action(factory, item),
        next_step_identifier: item.next_identifier().map(str::to_string),
        custom_type_identifier: None,
        is_completion_step: subtype == InstructionSubtype::Completion,
        continue_button_title: item.continue_button_title().map(str::to_string),
        start_step_audio: item.start_step_audio().map(str::to_string),
    }
}

/// The placeholder built for item types the factory does not know.
///
/// An untyped item with nested items is a subtask. Anything else becomes an
/// instruction step tagged with its type string so the host can recognise it.
pub fn create_custom_step<F>(factory: &F, item: &SurveyItem, context: StepContext) -> Step
where
    F: StepFactory + ?Sized,
{
    let item_type = item.survey_item_type();
    if item_type.is_nil_type() && item.items().is_some() && context.tracking_type.is_none() {
        return factory.create_subtask_step(item);
    }

    let mut step = create_instruction_step(factory, item, InstructionSubtype::Instruction);
    step.custom_type_identifier = match item_type {
        SurveyItemType::Custom(name) => name,
        known => Some(known.key()),
    };
    Step::Instruction(step)
}

/// Dress an instruction as the last step of a task: completion styling, and
/// its detail text moved into a pop-up behind a copyright button.
pub fn mark_completion(step: &mut InstructionStep, copyright_title: &str) {
    step.is_completion_step = true;
    if let Some(detail) = step.detail_text.take() {
        step.learn_more_action = Some(
            LearnMoreAction::pop_up(keys::DETAIL_TEXT, detail).with_button_text(copyright_title),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{DefaultStepFactory, TrackingType};
    use survey_factory_types::{LearnMoreKind, Task};
    use serde_json::json;

    fn item(value: Value) -> SurveyItem {
        SurveyItem::from_value(&value).unwrap()
    }

    #[test]
    fn maps_instruction_fields() {
        let factory = DefaultStepFactory::default();
        let step = create_instruction_step(
            &factory,
            &item(json!({
                "identifier": "intro",
                "type": "instruction",
                "title": " Welcome ",
                "prompt": "Thanks for joining.",
                "detailText": "More here",
                "image": "welcome",
                "nextIdentifier": "consent",
                "continueButtonTitle": "Begin",
            })),
            InstructionSubtype::Instruction,
        );
        assert_eq!(step.title.as_deref(), Some("Welcome"));
        assert_eq!(step.text.as_deref(), Some("Thanks for joining."));
        assert_eq!(step.detail_text.as_deref(), Some("More here"));
        assert_eq!(step.image.as_deref(), Some("welcome"));
        assert_eq!(step.next_step_identifier.as_deref(), Some("consent"));
        assert_eq!(step.continue_button_title.as_deref(), Some("Begin"));
        assert!(!step.is_completion_step);
    }

    #[test]
    fn completion_subtype_is_marked() {
        let factory = DefaultStepFactory::default();
        let step = create_instruction_step(
            &factory,
            &item(json!({ "identifier": "done", "type": "completion" })),
            InstructionSubtype::Completion,
        );
        assert!(step.is_completion_step);
    }

    #[test]
    fn learn_more_sources() {
        let factory = DefaultStepFactory::default();

        let url = create_learn_more_action(
            &factory,
            &item(json!({ "identifier": "a", "learnMoreHTMLContentURL": "about", "learnMoreButtonText": "Why?" })),
        )
        .unwrap();
        assert_eq!(url.kind, LearnMoreKind::Url { url: "about".into() });
        assert_eq!(url.button_text.as_deref(), Some("Why?"));

        let alert = create_learn_more_action(
            &factory,
            &item(json!({ "identifier": "b", "learnMoreAlertText": "Careful" })),
        )
        .unwrap();
        assert_eq!(alert.kind, LearnMoreKind::PopUp { text: "Careful".into() });

        let custom = create_learn_more_action(
            &factory,
            &item(json!({ "identifier": "c", "learnMoreAction": { "identifier": "video", "url": "x" } })),
        )
        .unwrap();
        assert_eq!(custom.identifier, "video");
        assert!(matches!(custom.kind, LearnMoreKind::Custom { .. }));

        assert!(create_learn_more_action(&factory, &item(json!({ "identifier": "d" }))).is_none());
    }

    #[test]
    fn untyped_item_with_items_is_a_subtask() {
        let factory = DefaultStepFactory::default();
        let step = create_custom_step(
            &factory,
            &item(json!({
                "identifier": "group",
                "items": [ { "identifier": "q1", "type": "boolean" } ],
            })),
            StepContext::default(),
        );
        assert_eq!(step.subtask().map(Task::len), Some(1));
    }

    #[test]
    fn activity_keeps_known_type_name() {
        let factory = DefaultStepFactory::default();
        let step = create_custom_step(
            &factory,
            &item(json!({ "identifier": "tapping", "type": "boolean" })),
            StepContext::tracking(TrackingType::Activity),
        );
        assert_eq!(
            step.as_instruction().unwrap().custom_type_identifier.as_deref(),
            Some("boolean")
        );
    }

    #[test]
    fn completion_moves_detail_into_pop_up() {
        let mut step = InstructionStep {
            detail_text: Some("Copyright 2016 Example".into()),
            ..InstructionStep::new("done")
        };
        mark_completion(&mut step, "Copyright");
        assert!(step.is_completion_step);
        assert!(step.detail_text.is_none());
        let action = step.learn_more_action.unwrap();
        assert_eq!(action.button_text.as_deref(), Some("Copyright"));
        assert_eq!(
            action.kind,
            LearnMoreKind::PopUp {
                text: "Copyright 2016 Example".into()
            }
        );
    }
}
