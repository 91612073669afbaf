//! Choice lists: labelled text choices, timing ranges and moods.

use serde_json::Value;
use survey_factory_types::{
    ChoiceValue, MoodChoice, MoodScaleAnswerFormat, SurveyItem, TextChoice, keys, value_as_groups,
};

use crate::defect::BuildDefect;
use crate::factory::StepFactory;

/// Build a text choice from an item entry.
///
/// Objects read `text` (or `prompt`), `detail` (or `detailText`), `value`,
/// `exclusive` and `dataGroup`. A bare string or number is both the text and
/// the value. Anything else is reported and becomes an empty choice.
pub fn create_text_choice<F>(factory: &F, owner: &str, index: usize, entry: &Value) -> TextChoice
where
    F: StepFactory + ?Sized,
{
    match entry {
        Value::Object(object) => {
            let field = |key: &str| object.get(key).and_then(Value::as_str).map(str::trim);
            let text = field(keys::TEXT).or_else(|| field(keys::PROMPT)).unwrap_or("");
            let detail = field(keys::DETAIL).or_else(|| field(keys::DETAIL_TEXT));
            let value = object
                .get(keys::VALUE)
                .cloned()
                .unwrap_or_else(|| Value::String(text.to_string()));

            let mut choice = TextChoice::new(text, value);
            choice.detail = detail.map(str::to_string);
            choice.exclusive = object
                .get(keys::EXCLUSIVE)
                .and_then(Value::as_bool)
                .unwrap_or(false);
            choice.data_groups = object.get(keys::DATA_GROUP).map(value_as_groups);
            choice
        }
        Value::String(s) => TextChoice::new(s.trim(), s.clone()),
        Value::Number(n) => TextChoice::new(n.to_string(), entry.clone()),
        _ => {
            factory.report_defect(owner, BuildDefect::InvalidChoice { index });
            TextChoice::new("", Value::Null)
        }
    }
}

/// One choice per entry of the item's `items`, in order.
pub fn create_text_choices<F>(factory: &F, item: &SurveyItem) -> Option<Vec<TextChoice>>
where
    F: StepFactory + ?Sized,
{
    let entries = item.items()?;
    Some(
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| create_text_choice(factory, item.identifier(), index, entry))
            .collect(),
    )
}

/// A "how long ago" choice built from one timing-range entry.
///
/// The value is always English so results read the same in every locale.
/// Returns `None` when the entry has neither a min nor a max.
pub fn timing_range_choice(entry: &Value) -> Option<TextChoice> {
    let object = entry.as_object()?;
    let number = |key: &str| {
        object.get(key).and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().map(|f| f.trunc() as i64))
        })
    };
    let unit = object
        .get(keys::UNIT)
        .and_then(Value::as_str)
        .unwrap_or("seconds");

    let label = match (number(keys::MIN), number(keys::MAX)) {
        (Some(min), Some(max)) => format!("{min}-{max} {unit} ago"),
        (None, Some(max)) => format!("Less than {max} {unit} ago"),
        (Some(min), None) => format!("More than {min} {unit} ago"),
        (None, None) => return None,
    };
    Some(TextChoice::new(label.clone(), label))
}

/// The timing-range choices of an item followed by the "Not sure" choice.
pub fn create_timing_range_choices<F>(factory: &F, item: &SurveyItem) -> Option<Vec<TextChoice>>
where
    F: StepFactory + ?Sized,
{
    let entries = item.items()?;
    let mut choices: Vec<TextChoice> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let choice = timing_range_choice(entry);
            if choice.is_none() {
                factory.report_defect(
                    item.identifier(),
                    BuildDefect::TimingRangeMissingBounds { index },
                );
            }
            choice
        })
        .collect();
    choices.push(TextChoice::new(
        factory.config().not_sure_text.clone(),
        "Not sure",
    ));
    Some(choices)
}

/// The five canonical moods, worst to best.
pub fn default_mood_choices() -> Vec<MoodChoice> {
    ["Terrible", "Bad", "Okay", "Good", "Great"]
        .into_iter()
        .enumerate()
        .map(|(index, text)| MoodChoice {
            text: text.to_string(),
            value: ChoiceValue::from(index + 1),
            image: Some(format!("moodScale{}", index + 1)),
        })
        .collect()
}

/// The canonical mood scale, with each slot replaced by the matching item
/// when the item lists exactly as many choices.
///
/// A replacement keeps the canonical value and falls back to the canonical
/// image. An entry that is not an object keeps the canonical slot and is
/// reported.
pub fn create_mood_scale<F>(factory: &F, item: &SurveyItem) -> MoodScaleAnswerFormat
where
    F: StepFactory + ?Sized,
{
    let defaults = default_mood_choices();
    let Some(entries) = item.items().filter(|entries| entries.len() == defaults.len()) else {
        return MoodScaleAnswerFormat { choices: defaults };
    };

    let choices = defaults
        .into_iter()
        .zip(entries)
        .enumerate()
        .map(|(index, (default, entry))| {
            let Some(object) = entry.as_object() else {
                factory.report_defect(item.identifier(), BuildDefect::MoodChoiceMismatch { index });
                return default;
            };
            let field = |key: &str| object.get(key).and_then(Value::as_str);
            MoodChoice {
                text: field(keys::TEXT)
                    .or_else(|| field(keys::PROMPT))
                    .map_or(default.text, str::to_string),
                value: default.value,
                image: field(keys::IMAGE)
                    .and_then(|name| factory.resources().image(name))
                    .or(default.image),
            }
        })
        .collect();
    MoodScaleAnswerFormat { choices }
}
