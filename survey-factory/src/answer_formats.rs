use survey_factory_types::{
    AnswerFormat, DateAnswerFormat, DateStyle, FormSubtype, SurveyItem, TextChoiceAnswerFormat,
};

use crate::choices::{create_mood_scale, create_text_choices, create_timing_range_choices};
use crate::defect::BuildDefect;
use crate::factory::StepFactory;
use crate::numeric_range::NumberRange;
use crate::text_field::TextFieldOptions;

/// Build the answer format of a form item. `None` subtypes are boolean.
///
/// Returns `None` when the item cannot describe a format for the subtype:
/// a choice list without items, a scale without a range, or a compound or
/// toggle subtype, which only its nested items can answer.
pub fn create_answer_format<F>(
    factory: &F,
    item: &SurveyItem,
    subtype: Option<FormSubtype>,
) -> Option<AnswerFormat>
where
    F: StepFactory + ?Sized,
{
    let subtype = subtype.unwrap_or(FormSubtype::Boolean);
    match subtype {
        FormSubtype::Boolean => Some(AnswerFormat::Boolean),
        FormSubtype::Text | FormSubtype::MultipleLineText => {
            let options = TextFieldOptions::from_item(item);
            Some(AnswerFormat::Text(options.answer_format(
                factory,
                item.identifier(),
                subtype == FormSubtype::MultipleLineText,
            )))
        }
        FormSubtype::SingleChoice | FormSubtype::MultipleChoice => {
            let Some(choices) = create_text_choices(factory, item) else {
                factory.report_defect(
                    item.identifier(),
                    BuildDefect::MissingItems {
                        kind: subtype.key(),
                    },
                );
                return None;
            };
            Some(AnswerFormat::TextChoice(if subtype == FormSubtype::SingleChoice {
                TextChoiceAnswerFormat::single(choices)
            } else {
                TextChoiceAnswerFormat::multiple(choices)
            }))
        }
        FormSubtype::Mood => Some(AnswerFormat::MoodScale(create_mood_scale(factory, item))),
        FormSubtype::Date | FormSubtype::DateTime => {
            let style = if subtype == FormSubtype::Date {
                DateStyle::Date
            } else {
                DateStyle::DateAndTime
            };
            Some(AnswerFormat::Date(DateAnswerFormat::with_bounds(
                style,
                item.min_date(),
                item.max_date(),
            )))
        }
        FormSubtype::Time => Some(AnswerFormat::TimeOfDay),
        FormSubtype::Duration => Some(AnswerFormat::TimeInterval),
        FormSubtype::Integer | FormSubtype::Decimal => {
            Some(NumberRange::from_item(item).answer_format(subtype))
        }
        FormSubtype::Scale | FormSubtype::ContinuousScale => {
            let range = NumberRange::from_item(item);
            if range.is_unbounded() {
                factory.report_defect(
                    item.identifier(),
                    BuildDefect::MissingNumberRange {
                        subtype: subtype.key(),
                    },
                );
                return None;
            }
            Some(range.answer_format(subtype))
        }
        FormSubtype::TimingRange => {
            let Some(choices) = create_timing_range_choices(factory, item) else {
                factory.report_defect(
                    item.identifier(),
                    BuildDefect::MissingItems {
                        kind: subtype.key(),
                    },
                );
                return None;
            };
            Some(AnswerFormat::TextChoice(TextChoiceAnswerFormat::single(
                choices,
            )))
        }
        FormSubtype::Compound | FormSubtype::Toggle => {
            factory.report_defect(
                item.identifier(),
                BuildDefect::CompoundAnswerFormat {
                    subtype: subtype.key(),
                },
            );
            None
        }
    }
}
