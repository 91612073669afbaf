use std::fmt;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::answer::ChoiceValue;

/// Describes what a legal answer to a form item looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerFormat {
    /// Yes/no.
    Boolean,

    /// Free text, optionally validated.
    Text(TextAnswerFormat),

    /// An email address.
    Email,

    /// A list of labelled choices, single or multiple selection.
    TextChoice(TextChoiceAnswerFormat),

    /// A row of mood images.
    MoodScale(MoodScaleAnswerFormat),

    /// A date, or date and time.
    Date(DateAnswerFormat),

    /// A time of day.
    TimeOfDay,

    /// A duration.
    TimeInterval,

    /// A bounded number typed into a field.
    Numeric(NumericAnswerFormat),

    /// A discrete slider.
    Scale(ScaleAnswerFormat),

    /// A fractional slider.
    ContinuousScale(ContinuousScaleAnswerFormat),

    /// A health characteristic picker (sex, blood type, ...).
    HealthCharacteristic { characteristic: HealthCharacteristic },

    /// Height or weight in the participant's locale units.
    Measurement { kind: MeasurementKind },
}

impl AnswerFormat {
    pub fn as_text_choice(&self) -> Option<&TextChoiceAnswerFormat> {
        match self {
            Self::TextChoice(format) => Some(format),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnswerFormat> {
        match self {
            Self::Text(format) => Some(format),
            _ => None,
        }
    }

    /// Get the type name of this format for log messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Text(_) => "Text",
            Self::Email => "Email",
            Self::TextChoice(_) => "TextChoice",
            Self::MoodScale(_) => "MoodScale",
            Self::Date(_) => "Date",
            Self::TimeOfDay => "TimeOfDay",
            Self::TimeInterval => "TimeInterval",
            Self::Numeric(_) => "Numeric",
            Self::Scale(_) => "Scale",
            Self::ContinuousScale(_) => "ContinuousScale",
            Self::HealthCharacteristic { .. } => "HealthCharacteristic",
            Self::Measurement { .. } => "Measurement",
        }
    }
}

/// Configuration for a text answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnswerFormat {
    pub multiple_lines: bool,

    /// Pattern the whole answer must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<ValidationRegex>,

    /// Shown when the answer fails validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_message: Option<String>,

    /// Zero means no minimum.
    #[serde(default)]
    pub minimum_length: usize,

    /// Zero means no maximum.
    #[serde(default)]
    pub maximum_length: usize,

    #[serde(default)]
    pub autocapitalization: Autocapitalization,

    #[serde(default)]
    pub keyboard: KeyboardType,

    #[serde(default)]
    pub secure_text_entry: bool,
}

/// Reason a text answer was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextValidationError {
    #[error("must be at least {min} characters")]
    TooShort { min: usize },

    #[error("must be at most {max} characters")]
    TooLong { max: usize },

    #[error("{0}")]
    Pattern(String),
}

impl TextAnswerFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiple_lines: true,
            ..Self::default()
        }
    }

    /// Check an answer against the length bounds and the validation pattern.
    pub fn validate(&self, answer: &str) -> Result<(), TextValidationError> {
        let length = answer.chars().count();
        if self.minimum_length > 0 && length < self.minimum_length {
            return Err(TextValidationError::TooShort {
                min: self.minimum_length,
            });
        }
        if self.maximum_length > 0 && length > self.maximum_length {
            return Err(TextValidationError::TooLong {
                max: self.maximum_length,
            });
        }
        match &self.validation_regex {
            Some(regex) if !regex.is_match(answer) => Err(TextValidationError::Pattern(
                self.invalid_message
                    .clone()
                    .unwrap_or_else(|| format!("must match {}", regex.as_str())),
            )),
            _ => Ok(()),
        }
    }
}

/// A compiled validation pattern that must match a whole answer.
///
/// Serialized as the source pattern.
#[derive(Clone)]
pub struct ValidationRegex {
    pattern: String,
    compiled: Regex,
}

impl ValidationRegex {
    /// Compile a pattern. The pattern is anchored at both ends.
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let compiled = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { pattern, compiled })
    }

    /// The source pattern, without anchors.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

impl fmt::Debug for ValidationRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidationRegex").field(&self.pattern).finish()
    }
}

impl PartialEq for ValidationRegex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Serialize for ValidationRegex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> Deserialize<'de> for ValidationRegex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Self::new(pattern).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Autocapitalization {
    #[default]
    None,
    Words,
    Sentences,
    AllCharacters,
}

impl Autocapitalization {
    /// Unknown names fall back to `None`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "words" => Self::Words,
            "sentences" => Self::Sentences,
            "allCharacters" => Self::AllCharacters,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyboardType {
    #[default]
    Default,
    AsciiCapable,
    NumbersAndPunctuation,
    Url,
    NumberPad,
    PhonePad,
    NamePhonePad,
    EmailAddress,
    DecimalPad,
    WebSearch,
}

impl KeyboardType {
    /// Unknown names fall back to `Default`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "asciiCapable" => Self::AsciiCapable,
            "numbersAndPunctuation" => Self::NumbersAndPunctuation,
            "URL" | "url" => Self::Url,
            "numberPad" => Self::NumberPad,
            "phonePad" => Self::PhonePad,
            "namePhonePad" => Self::NamePhonePad,
            "emailAddress" => Self::EmailAddress,
            "decimalPad" => Self::DecimalPad,
            "webSearch" => Self::WebSearch,
            _ => Self::Default,
        }
    }
}

/// Single or multiple selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChoiceStyle {
    #[default]
    SingleChoice,
    MultipleChoice,
}

/// One labelled option of a choice format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChoice {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub value: ChoiceValue,

    /// Selecting this choice deselects every other.
    #[serde(default)]
    pub exclusive: bool,

    /// Explicit data groups; when absent the value doubles as the groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_groups: Option<Vec<String>>,
}

impl TextChoice {
    pub fn new(text: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            text: text.into(),
            detail: None,
            value: value.into(),
            exclusive: false,
            data_groups: None,
        }
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The data groups this choice stands for.
    ///
    /// Explicit groups win. Otherwise a string value is one group (the empty
    /// string is none) and an array value is a list of groups.
    pub fn groups(&self) -> Vec<String> {
        if let Some(groups) = &self.data_groups {
            return groups.clone();
        }
        value_as_groups(&self.value)
    }
}

/// Read a choice value as a list of data-group names.
pub fn value_as_groups(value: &ChoiceValue) -> Vec<String> {
    match value {
        ChoiceValue::String(s) if s.is_empty() => Vec::new(),
        ChoiceValue::String(s) => vec![s.clone()],
        ChoiceValue::Array(values) => values
            .iter()
            .filter_map(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        ChoiceValue::Number(n) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

/// Configuration for a labelled-choice answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChoiceAnswerFormat {
    pub style: ChoiceStyle,
    pub choices: Vec<TextChoice>,
}

impl TextChoiceAnswerFormat {
    pub fn new(style: ChoiceStyle, choices: Vec<TextChoice>) -> Self {
        Self { style, choices }
    }

    pub fn single(choices: Vec<TextChoice>) -> Self {
        Self::new(ChoiceStyle::SingleChoice, choices)
    }

    pub fn multiple(choices: Vec<TextChoice>) -> Self {
        Self::new(ChoiceStyle::MultipleChoice, choices)
    }

    /// Find a choice by value.
    pub fn choice_with_value(&self, value: &ChoiceValue) -> Option<&TextChoice> {
        self.choices
            .iter()
            .find(|c| crate::answer::choice_values_match(&c.value, value))
    }
}

/// One mood option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodChoice {
    pub text: String,
    pub value: ChoiceValue,
    /// Image resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodScaleAnswerFormat {
    pub choices: Vec<MoodChoice>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateStyle {
    #[default]
    Date,
    DateAndTime,
}

/// Configuration for a date answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAnswerFormat {
    pub style: DateStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_date: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_date: Option<NaiveDateTime>,
}

impl DateAnswerFormat {
    pub fn new(style: DateStyle) -> Self {
        Self {
            style,
            minimum_date: None,
            maximum_date: None,
        }
    }

    pub fn with_bounds(
        style: DateStyle,
        minimum_date: Option<NaiveDateTime>,
        maximum_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            style,
            minimum_date,
            maximum_date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericStyle {
    #[default]
    Integer,
    Decimal,
}

/// Configuration for a numeric field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericAnswerFormat {
    pub style: NumericStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl NumericAnswerFormat {
    pub fn new(style: NumericStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_bounds(
        style: NumericStyle,
        unit: Option<String>,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Self {
        Self {
            style,
            unit,
            minimum,
            maximum,
        }
    }
}

/// A discrete slider from `minimum` to `maximum` in increments of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleAnswerFormat {
    pub maximum: i64,
    pub minimum: i64,
    pub step: i64,
}

impl ScaleAnswerFormat {
    pub fn new(maximum: i64, minimum: i64, step: i64) -> Self {
        Self {
            maximum,
            minimum,
            step,
        }
    }

    /// Number of increments between the two ends.
    pub fn number_of_steps(&self) -> i64 {
        if self.step <= 0 {
            0
        } else {
            (self.maximum - self.minimum) / self.step
        }
    }
}

/// A fractional slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousScaleAnswerFormat {
    pub maximum: f64,
    pub minimum: f64,
    pub maximum_fraction_digits: u32,
}

impl ContinuousScaleAnswerFormat {
    pub fn new(maximum: f64, minimum: f64, maximum_fraction_digits: u32) -> Self {
        Self {
            maximum,
            minimum,
            maximum_fraction_digits,
        }
    }
}

/// Health characteristics with a fixed picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthCharacteristic {
    BiologicalSex,
    BloodType,
    FitzpatrickSkinType,
    WheelchairUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementKind {
    Height,
    Weight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn regex_is_anchored() {
        let regex = ValidationRegex::new("[0-9]{3}").unwrap();
        assert!(regex.is_match("123"));
        assert!(!regex.is_match("1234"));
        assert!(!regex.is_match("a123"));
        assert_eq!(regex.as_str(), "[0-9]{3}");
    }

    #[test]
    fn invalid_regex_fails_to_compile() {
        assert!(ValidationRegex::new("[unclosed").is_err());
    }

    #[test]
    fn text_validation() {
        let format = TextAnswerFormat {
            validation_regex: Some(ValidationRegex::new("[[:ascii:]]{2,4}").unwrap()),
            invalid_message: Some("Must be between 2 and 4 characters".into()),
            minimum_length: 2,
            maximum_length: 4,
            ..TextAnswerFormat::new()
        };
        assert_eq!(format.validate("abc"), Ok(()));
        assert_eq!(
            format.validate("a"),
            Err(TextValidationError::TooShort { min: 2 })
        );
        assert_eq!(
            format.validate("abcde"),
            Err(TextValidationError::TooLong { max: 4 })
        );
        assert_eq!(
            format.validate("ab\u{e9}"),
            Err(TextValidationError::Pattern(
                "Must be between 2 and 4 characters".into()
            ))
        );
    }

    #[test]
    fn choice_groups() {
        assert_eq!(TextChoice::new("A", "groupA").groups(), ["groupA"]);
        assert_eq!(
            TextChoice::new("CD", json!(["groupC", "groupD"])).groups(),
            ["groupC", "groupD"]
        );
        assert!(TextChoice::new("None", "").groups().is_empty());

        let mut explicit = TextChoice::new("Yes", true);
        explicit.data_groups = Some(vec!["eligible".into()]);
        assert_eq!(explicit.groups(), ["eligible"]);
    }

    #[test]
    fn scale_steps() {
        assert_eq!(ScaleAnswerFormat::new(10, 0, 1).number_of_steps(), 10);
        assert_eq!(ScaleAnswerFormat::new(10, 0, 0).number_of_steps(), 0);
    }

    #[test]
    fn serializes_with_type_tag() {
        let format = AnswerFormat::Scale(ScaleAnswerFormat::new(10, 0, 2));
        assert_eq!(
            serde_json::to_value(&format).unwrap(),
            json!({ "type": "scale", "maximum": 10, "minimum": 0, "step": 2 })
        );
        let text = AnswerFormat::Text(TextAnswerFormat {
            validation_regex: Some(ValidationRegex::new("[a-z]+").unwrap()),
            ..TextAnswerFormat::new()
        });
        let back: AnswerFormat =
            serde_json::from_value(serde_json::to_value(&text).unwrap()).unwrap();
        assert_eq!(back, text);
    }
}
