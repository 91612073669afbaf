use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The value stored for one option of a choice answer format.
///
/// Choice values come straight from the survey document and may be strings,
/// numbers, booleans or arrays (a data-group choice can carry several groups).
pub type ChoiceValue = Value;

/// A single answer captured for a form item.
///
/// Choice-style formats (single choice, multiple choice, timing range) always
/// answer with [`Answer::Choices`], even when only one option can be picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Answer {
    /// Yes/no answer.
    Bool(bool),

    /// Integer answer (integer fields and discrete scales).
    Int(i64),

    /// Floating-point answer (decimal fields, continuous scales, durations in seconds).
    Float(f64),

    /// Free text.
    Text(String),

    /// Calendar date, or date and time.
    Date(NaiveDateTime),

    /// Time of day without a date.
    TimeOfDay(NaiveTime),

    /// The values of the selected choices, in selection order.
    Choices(Vec<ChoiceValue>),
}

impl Answer {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the answer; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::TimeOfDay(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[ChoiceValue]> {
        match self {
            Self::Choices(values) => Some(values),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Text(_) => "Text",
            Self::Date(_) => "Date",
            Self::TimeOfDay(_) => "TimeOfDay",
            Self::Choices(_) => "Choices",
        }
    }

    /// Convert an untyped document value without any subtype hint.
    ///
    /// Objects and `null` have no answer representation.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(values) => Some(Self::Choices(values.clone())),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Equality as used by rule predicates: numbers compare by value across
    /// integer and float, choice lists compare element-wise.
    pub fn matches(&self, other: &Answer) -> bool {
        match (self, other) {
            (Self::Choices(a), Self::Choices(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| choice_values_match(x, y))
            }
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }

    /// Ordering between two answers of compatible kinds.
    pub fn compare(&self, other: &Answer) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.as_float()?.partial_cmp(&other.as_float()?)
            }
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::TimeOfDay(a), Self::TimeOfDay(b)) => Some(a.cmp(b)),
            (Self::Choices(_), Self::Choices(_)) => {
                self.matches(other).then_some(Ordering::Equal)
            }
            _ => None,
        }
    }

    /// Whether a choice answer includes the given value.
    pub fn contains_choice(&self, value: &ChoiceValue) -> bool {
        self.as_choices()
            .is_some_and(|values| values.iter().any(|v| choice_values_match(v, value)))
    }
}

/// Compare two choice values, treating numbers by value (`1 == 1.0`).
pub fn choice_values_match(a: &ChoiceValue, b: &ChoiceValue) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| choice_values_match(l, r))
        }
        _ => a == b,
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Answer {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Answer {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Answer {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<NaiveDateTime> for Answer {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDate> for Answer {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveTime> for Answer {
    fn from(t: NaiveTime) -> Self {
        Self::TimeOfDay(t)
    }
}

impl From<Vec<ChoiceValue>> for Answer {
    fn from(values: Vec<ChoiceValue>) -> Self {
        Self::Choices(values)
    }
}
