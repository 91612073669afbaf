use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::answer::ChoiceValue;
use crate::error::SurveyItemError;
use crate::item_type::{FormSubtype, SurveyItemType};

/// One node of a survey document, parsed into a typed view.
///
/// The item keeps its source object and exposes every known key through an
/// accessor, so unknown keys survive for host-specific step types.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyItem {
    identifier: String,
    item_type: String,
    raw: Map<String, Value>,
}

impl Serialize for SurveyItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Document keys understood by the item accessors.
pub mod keys {
    pub const IDENTIFIER: &str = "identifier";
    pub const SCHEMA_IDENTIFIER: &str = "schemaIdentifier";
    pub const TYPE: &str = "type";
    pub const TITLE: &str = "title";
    pub const TEXT: &str = "text";
    pub const PROMPT: &str = "prompt";
    pub const DETAIL_TEXT: &str = "detailText";
    pub const DETAIL: &str = "detail";
    pub const FOOTNOTE: &str = "footnote";
    pub const OPTIONS: &str = "options";
    pub const SPOKEN_INSTRUCTION: &str = "spokenInstruction";
    pub const FINISHED_SPOKEN_INSTRUCTION: &str = "finishedSpokenInstruction";
    pub const IMAGE: &str = "image";
    pub const ICON_IMAGE: &str = "iconImage";
    pub const LEARN_MORE_ACTION: &str = "learnMoreAction";
    pub const LEARN_MORE_BUTTON_TEXT: &str = "learnMoreButtonText";
    pub const LEARN_MORE_HTML_CONTENT_URL: &str = "learnMoreHTMLContentURL";
    pub const LEARN_MORE_ALERT_TEXT: &str = "learnMoreAlertText";
    pub const OPTIONAL: &str = "optional";
    pub const ITEMS: &str = "items";
    pub const QUESTION_STYLE: &str = "questionStyle";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const SKIP_IDENTIFIER: &str = "skipIdentifier";
    pub const SKIP_IF_PASSED: &str = "skipIfPassed";
    pub const EXPECTED_ANSWER: &str = "expectedAnswer";
    pub const RULES: &str = "rules";
    pub const RULE_OPERATOR: &str = "ruleOperator";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const UNIT: &str = "unit";
    pub const STEP_INTERVAL: &str = "stepInterval";
    pub const MIN_DATE: &str = "minDate";
    pub const MAX_DATE: &str = "maxDate";
    pub const VALIDATION_REGEX: &str = "validationRegex";
    pub const INVALID_MESSAGE: &str = "invalidMessage";
    pub const MAXIMUM_LENGTH: &str = "maximumLength";
    pub const MINIMUM_LENGTH: &str = "minimumLength";
    pub const AUTOCAPITALIZATION_TYPE: &str = "autocapitalizationType";
    pub const KEYBOARD_TYPE: &str = "keyboardType";
    pub const NEXT_IDENTIFIER: &str = "nextIdentifier";
    pub const CONTINUE_BUTTON_TITLE: &str = "continueButtonTitle";
    pub const START_STEP_AUDIO: &str = "startStepAudio";
    pub const DATA_GROUP: &str = "dataGroup";
    pub const VALUE: &str = "value";
    pub const EXCLUSIVE: &str = "exclusive";
}

impl SurveyItem {
    /// Parse a document node. Fails only when the node is not an object or
    /// carries neither `identifier` nor `schemaIdentifier`.
    pub fn from_value(value: &Value) -> Result<Self, SurveyItemError> {
        match value {
            Value::Object(map) => Self::from_map(map.clone()),
            other => Err(SurveyItemError::NotAnObject {
                found: json_kind(other),
            }),
        }
    }

    pub fn from_map(raw: Map<String, Value>) -> Result<Self, SurveyItemError> {
        let identifier = raw
            .get(keys::IDENTIFIER)
            .or_else(|| raw.get(keys::SCHEMA_IDENTIFIER))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(SurveyItemError::MissingIdentifier)?
            .to_string();
        let item_type = match raw.get(keys::TYPE) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(SurveyItemError::InvalidField {
                    key: keys::TYPE,
                    expected: "string",
                });
            }
        };
        Ok(Self {
            identifier,
            item_type,
            raw,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The item type, resolved from the `type` key.
    pub fn survey_item_type(&self) -> SurveyItemType {
        if self.item_type.is_empty() {
            SurveyItemType::Custom(None)
        } else {
            SurveyItemType::resolve(&self.item_type)
        }
    }

    /// The raw `type` string, if one was given.
    pub fn type_string(&self) -> Option<&str> {
        (!self.item_type.is_empty()).then_some(self.item_type.as_str())
    }

    pub fn form_subtype(&self) -> Option<FormSubtype> {
        match self.survey_item_type() {
            SurveyItemType::Form(subtype) => Some(subtype),
            SurveyItemType::DataGroups(subtype) => subtype,
            _ => None,
        }
    }

    /// The source object.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        })
    }

    // Step content

    pub fn title(&self) -> Option<&str> {
        self.string(keys::TITLE)
    }

    /// `text`, falling back to the legacy `prompt` key.
    pub fn text(&self) -> Option<&str> {
        self.string(keys::TEXT).or_else(|| self.string(keys::PROMPT))
    }

    pub fn detail_text(&self) -> Option<&str> {
        self.string(keys::DETAIL_TEXT)
    }

    pub fn footnote(&self) -> Option<&str> {
        self.string(keys::FOOTNOTE)
    }

    pub fn options(&self) -> Option<&Map<String, Value>> {
        self.get(keys::OPTIONS).and_then(Value::as_object)
    }

    pub fn spoken_instruction(&self) -> Option<&str> {
        self.string(keys::SPOKEN_INSTRUCTION)
    }

    pub fn finished_spoken_instruction(&self) -> Option<&str> {
        self.string(keys::FINISHED_SPOKEN_INSTRUCTION)
    }

    pub fn image(&self) -> Option<&str> {
        self.string(keys::IMAGE)
    }

    pub fn icon_image(&self) -> Option<&str> {
        self.string(keys::ICON_IMAGE)
    }

    pub fn next_identifier(&self) -> Option<&str> {
        self.string(keys::NEXT_IDENTIFIER)
    }

    pub fn continue_button_title(&self) -> Option<&str> {
        self.string(keys::CONTINUE_BUTTON_TITLE)
    }

    pub fn start_step_audio(&self) -> Option<&str> {
        self.string(keys::START_STEP_AUDIO)
    }

    // Form content

    pub fn is_optional(&self) -> bool {
        self.bool_or(keys::OPTIONAL, false)
    }

    pub fn should_use_question_style(&self) -> bool {
        self.bool_or(keys::QUESTION_STYLE, false)
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.string(keys::PLACEHOLDER)
    }

    /// Nested items as raw document values. Choices may be bare strings or
    /// numbers, so they are not parsed here.
    pub fn items(&self) -> Option<&[Value]> {
        self.get(keys::ITEMS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Nested items parsed as survey items, in declaration order. An entry
    /// that is not an object or has no identifier is an error in its slot.
    pub fn nested_items(&self) -> Vec<Result<SurveyItem, SurveyItemError>> {
        self.items()
            .unwrap_or_default()
            .iter()
            .map(SurveyItem::from_value)
            .collect()
    }

    // Rules

    pub fn skip_identifier(&self) -> Option<&str> {
        self.string(keys::SKIP_IDENTIFIER)
    }

    pub fn skip_if_passed(&self) -> bool {
        self.bool_or(keys::SKIP_IF_PASSED, false)
    }

    pub fn expected_answer(&self) -> Option<&Value> {
        self.get(keys::EXPECTED_ANSWER)
    }

    pub fn rule_operator(&self) -> Option<&str> {
        self.string(keys::RULE_OPERATOR)
    }

    /// Only the explicit `identifier` key; never the schema identifier.
    pub fn result_identifier(&self) -> Option<&str> {
        self.string(keys::IDENTIFIER)
    }

    /// Explicit rule objects under `rules`.
    pub fn rule_values(&self) -> Option<&[Value]> {
        self.get(keys::RULES)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// The item itself defines navigation.
    pub fn has_navigation_rules(&self) -> bool {
        self.skip_identifier().is_some() || self.expected_answer().is_some()
    }

    // Numeric range

    pub fn min_number(&self) -> Option<f64> {
        self.number(keys::MIN)
    }

    pub fn max_number(&self) -> Option<f64> {
        self.number(keys::MAX)
    }

    pub fn unit(&self) -> Option<&str> {
        self.string(keys::UNIT)
    }

    /// Defaults to 1.
    pub fn step_interval(&self) -> f64 {
        self.number(keys::STEP_INTERVAL).unwrap_or(1.0)
    }

    // Date range

    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.string(keys::MIN_DATE).and_then(parse_date_time)
    }

    pub fn max_date(&self) -> Option<NaiveDateTime> {
        self.string(keys::MAX_DATE).and_then(parse_date_time)
    }

    // Text field range

    pub fn validation_regex(&self) -> Option<&str> {
        self.string(keys::VALIDATION_REGEX)
    }

    pub fn invalid_message(&self) -> Option<&str> {
        self.string(keys::INVALID_MESSAGE)
    }

    /// Zero when unset.
    pub fn maximum_length(&self) -> usize {
        self.integer(keys::MAXIMUM_LENGTH)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }

    /// Zero when unset.
    pub fn minimum_length(&self) -> usize {
        self.integer(keys::MINIMUM_LENGTH)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }

    pub fn autocapitalization_type(&self) -> Option<&str> {
        self.string(keys::AUTOCAPITALIZATION_TYPE)
    }

    pub fn keyboard_type(&self) -> Option<&str> {
        self.string(keys::KEYBOARD_TYPE)
    }

    // Choice content

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.get(keys::VALUE)
    }

    pub fn is_exclusive(&self) -> bool {
        self.bool_or(keys::EXCLUSIVE, false)
    }

    pub fn data_group(&self) -> Option<&Value> {
        self.get(keys::DATA_GROUP)
    }
}

/// Parse a date or date-time string.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and a bare `YYYY-MM-DD` (midnight).
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|d| d.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Option<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
