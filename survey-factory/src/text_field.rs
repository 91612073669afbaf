use survey_factory_types::{
    Autocapitalization, KeyboardType, SurveyItem, TextAnswerFormat, ValidationRegex,
};

use crate::defect::BuildDefect;
use crate::factory::StepFactory;

pub(crate) const SHOULD_CONFIRM: &str = "shouldConfirm";

/// Validation and keyboard settings of a text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFieldOptions {
    pub validation_regex: Option<String>,
    pub invalid_message: Option<String>,
    pub minimum_length: usize,
    pub maximum_length: usize,
    pub autocapitalization: Autocapitalization,
    pub keyboard: KeyboardType,
    pub secure_text_entry: bool,
    /// Ask for the value twice.
    pub should_confirm: bool,
}

impl TextFieldOptions {
    pub fn from_item(item: &SurveyItem) -> Self {
        Self {
            validation_regex: item.validation_regex().map(str::to_string),
            invalid_message: item.invalid_message().map(str::to_string),
            minimum_length: item.minimum_length(),
            maximum_length: item.maximum_length(),
            autocapitalization: item
                .autocapitalization_type()
                .map_or_else(Autocapitalization::default, Autocapitalization::from_key),
            keyboard: item
                .keyboard_type()
                .map_or_else(KeyboardType::default, KeyboardType::from_key),
            secure_text_entry: false,
            should_confirm: item.bool_or(SHOULD_CONFIRM, false),
        }
    }

    /// `[[:ascii:]]{min,max}` when both lengths are set.
    pub fn default_pattern(&self) -> Option<String> {
        (self.minimum_length > 0 && self.maximum_length > 0).then(|| {
            format!(
                "[[:ascii:]]{{{},{}}}",
                self.minimum_length, self.maximum_length
            )
        })
    }

    /// Build the text format, reporting an unusable pattern against `item`.
    pub fn answer_format<F>(&self, factory: &F, item: &str, multiple_lines: bool) -> TextAnswerFormat
    where
        F: StepFactory + ?Sized,
    {
        let mut format = TextAnswerFormat {
            multiple_lines,
            minimum_length: self.minimum_length,
            maximum_length: self.maximum_length,
            autocapitalization: self.autocapitalization,
            keyboard: self.keyboard,
            secure_text_entry: self.secure_text_entry,
            ..TextAnswerFormat::default()
        };

        let explicit = self.validation_regex.is_some();
        let Some(pattern) = self.validation_regex.clone().or_else(|| self.default_pattern()) else {
            format.invalid_message = self.invalid_message.clone();
            return format;
        };

        match ValidationRegex::new(pattern.as_str()) {
            Ok(regex) => {
                format.validation_regex = Some(regex);
                format.invalid_message = Some(match &self.invalid_message {
                    Some(message) => message.clone(),
                    None => {
                        if explicit {
                            factory.report_defect(item, BuildDefect::RegexWithoutMessage);
                        }
                        factory
                            .config()
                            .invalid_length_message(self.minimum_length, self.maximum_length)
                    }
                });
            }
            Err(err) => {
                factory.report_defect(
                    item,
                    BuildDefect::InvalidRegex {
                        pattern,
                        message: err.to_string(),
                    },
                );
                format.invalid_message = self.invalid_message.clone();
            }
        }
        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultStepFactory;
    use serde_json::json;

    fn options(value: serde_json::Value) -> TextFieldOptions {
        TextFieldOptions::from_item(&SurveyItem::from_value(&value).unwrap())
    }

    #[test]
    fn reads_item_keys() {
        let options = options(json!({
            "identifier": "code",
            "validationRegex": "[0-9]+",
            "invalidMessage": "Digits only",
            "maximumLength": 6,
            "autocapitalizationType": "allCharacters",
            "keyboardType": "numberPad",
            "shouldConfirm": true,
        }));
        assert_eq!(options.validation_regex.as_deref(), Some("[0-9]+"));
        assert_eq!(options.maximum_length, 6);
        assert_eq!(options.autocapitalization, Autocapitalization::AllCharacters);
        assert_eq!(options.keyboard, KeyboardType::NumberPad);
        assert!(options.should_confirm);
    }

    #[test]
    fn default_pattern_needs_both_lengths() {
        let mut options = TextFieldOptions {
            minimum_length: 2,
            ..TextFieldOptions::default()
        };
        assert!(options.default_pattern().is_none());
        options.maximum_length = 4;
        assert_eq!(options.default_pattern().as_deref(), Some("[[:ascii:]]{2,4}"));
    }

    #[test]
    fn default_pattern_validates() {
        let factory = DefaultStepFactory::default();
        let options = TextFieldOptions {
            minimum_length: 2,
            maximum_length: 4,
            ..TextFieldOptions::default()
        };
        let format = options.answer_format(&factory, "nickname", false);
        assert_eq!(
            format.invalid_message.as_deref(),
            Some("Must be between 2 and 4 characters")
        );
        assert!(format.validate("abc").is_ok());
        assert!(format.validate("a").is_err());
        assert!(format.validate("abcde").is_err());
        assert!(factory.take_defects().is_empty());
    }

    #[test]
    fn regex_without_message_is_reported() {
        let factory = DefaultStepFactory::default();
        let options = TextFieldOptions {
            validation_regex: Some("[a-z]+".to_string()),
            ..TextFieldOptions::default()
        };
        let format = options.answer_format(&factory, "word", false);
        assert!(format.validation_regex.is_some());
        assert!(format.invalid_message.is_some());

        let defects = factory.take_defects();
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].defect, BuildDefect::RegexWithoutMessage);
    }

    #[test]
    fn invalid_regex_is_dropped() {
        let factory = DefaultStepFactory::default();
        let options = TextFieldOptions {
            validation_regex: Some("([a-z".to_string()),
            invalid_message: Some("Letters".to_string()),
            ..TextFieldOptions::default()
        };
        let format = options.answer_format(&factory, "word", true);
        assert!(format.multiple_lines);
        assert!(format.validation_regex.is_none());
        assert!(matches!(
            factory.take_defects()[0].defect,
            BuildDefect::InvalidRegex { .. }
        ));
    }
}
