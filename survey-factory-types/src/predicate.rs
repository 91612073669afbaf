use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::answer::{Answer, ChoiceValue};

/// A condition over the answer to one form item.
///
/// Predicates are evaluated against the answer found in a step result, or
/// `None` when the participant skipped the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum Predicate {
    /// The answer is absent.
    IsNull,
    Equal(Answer),
    NotEqual(Answer),
    LessThan(Answer),
    GreaterThan(Answer),
    LessThanOrEqual(Answer),
    GreaterThanOrEqual(Answer),
    /// A choice answer that does not include the value.
    NotContains(ChoiceValue),
    /// Any of the inner predicates holds.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate against an answer.
    ///
    /// Absent answers satisfy `IsNull`, `NotEqual` and `NotContains`; every
    /// comparison that needs a value is false without one.
    pub fn evaluate(&self, answer: Option<&Answer>) -> bool {
        match self {
            Self::IsNull => answer.is_none(),
            Self::Equal(expected) => answer.is_some_and(|a| a.matches(expected)),
            Self::NotEqual(expected) => !answer.is_some_and(|a| a.matches(expected)),
            Self::LessThan(expected) => ordering(answer, expected) == Some(Ordering::Less),
            Self::GreaterThan(expected) => ordering(answer, expected) == Some(Ordering::Greater),
            Self::LessThanOrEqual(expected) => matches!(
                ordering(answer, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::GreaterThanOrEqual(expected) => matches!(
                ordering(answer, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::NotContains(value) => !answer.is_some_and(|a| a.contains_choice(value)),
            Self::Or(predicates) => predicates.iter().any(|p| p.evaluate(answer)),
        }
    }

    /// Combine two predicates with OR, flattening nested ORs.
    pub fn or(self, other: Predicate) -> Predicate {
        let mut predicates = match self {
            Self::Or(inner) => inner,
            single => vec![single],
        };
        match other {
            Self::Or(inner) => predicates.extend(inner),
            single => predicates.push(single),
        }
        Self::Or(predicates)
    }
}

fn ordering(answer: Option<&Answer>, expected: &Answer) -> Option<Ordering> {
    answer?.compare(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_bool() {
        let predicate = Predicate::Equal(Answer::Bool(true));
        assert!(predicate.evaluate(Some(&Answer::Bool(true))));
        assert!(!predicate.evaluate(Some(&Answer::Bool(false))));
        assert!(!predicate.evaluate(None));
    }

    #[test]
    fn is_null() {
        assert!(Predicate::IsNull.evaluate(None));
        assert!(!Predicate::IsNull.evaluate(Some(&Answer::Int(0))));
    }

    #[test]
    fn ordering_comparisons() {
        let answer = Answer::Int(5);
        assert!(Predicate::LessThan(Answer::Int(6)).evaluate(Some(&answer)));
        assert!(!Predicate::LessThan(Answer::Int(5)).evaluate(Some(&answer)));
        assert!(Predicate::LessThanOrEqual(Answer::Int(5)).evaluate(Some(&answer)));
        assert!(Predicate::GreaterThan(Answer::Float(4.5)).evaluate(Some(&answer)));
        assert!(Predicate::GreaterThanOrEqual(Answer::Int(5)).evaluate(Some(&answer)));
        assert!(!Predicate::GreaterThan(Answer::Int(1)).evaluate(None));
    }

    #[test]
    fn not_equal_on_absent_answer() {
        assert!(Predicate::NotEqual(Answer::Int(1)).evaluate(None));
        assert!(!Predicate::NotEqual(Answer::Int(1)).evaluate(Some(&Answer::Int(1))));
    }

    #[test]
    fn not_contains() {
        let predicate = Predicate::NotContains(json!("red"));
        assert!(predicate.evaluate(Some(&Answer::Choices(vec![json!("blue")]))));
        assert!(!predicate.evaluate(Some(&Answer::Choices(vec![json!("blue"), json!("red")]))));
        assert!(predicate.evaluate(None));
    }

    #[test]
    fn or_flattens() {
        let merged = Predicate::Equal(Answer::Int(1))
            .or(Predicate::Equal(Answer::Int(2)))
            .or(Predicate::Equal(Answer::Int(3)));
        let Predicate::Or(inner) = &merged else {
            panic!("expected an OR predicate");
        };
        assert_eq!(inner.len(), 3);
        assert!(merged.evaluate(Some(&Answer::Int(2))));
        assert!(!merged.evaluate(Some(&Answer::Int(4))));
    }
}
