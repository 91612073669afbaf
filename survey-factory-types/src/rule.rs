use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;

/// Step identifier meaning "end the task".
pub const NULL_STEP_IDENTIFIER: &str = "ORKNullStepIdentifier";

/// Comparison requested by a rule item's `ruleOperator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    /// Matches when the item was skipped.
    Skip,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    /// For choice answers: the answer does not include the value.
    OtherThan,
}

impl RuleOperator {
    /// The two-letter code used in survey documents.
    pub fn code(self) -> &'static str {
        match self {
            Self::Skip => "de",
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::LessThan => "lt",
            Self::GreaterThan => "gt",
            Self::LessThanEqual => "le",
            Self::GreaterThanEqual => "ge",
            Self::OtherThan => "ot",
        }
    }

    /// `Equal` when there is an expected answer, otherwise `Skip`.
    pub fn default_for(has_expected_answer: bool) -> Self {
        if has_expected_answer {
            Self::Equal
        } else {
            Self::Skip
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule operator `{0}`")]
pub struct UnknownOperator(pub String);

impl FromStr for RuleOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "de" => Ok(Self::Skip),
            "eq" => Ok(Self::Equal),
            "ne" => Ok(Self::NotEqual),
            "lt" => Ok(Self::LessThan),
            "gt" => Ok(Self::GreaterThan),
            "le" => Ok(Self::LessThanEqual),
            "ge" => Ok(Self::GreaterThanEqual),
            "ot" => Ok(Self::OtherThan),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

/// A skip rule attached to a navigation-capable step.
///
/// When `predicate` holds for the answer to the form item named by
/// `result_identifier`, the task may jump to `skip_identifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRule {
    pub result_identifier: String,
    pub skip_identifier: String,
    pub predicate: Predicate,
}

impl SurveyRule {
    pub fn new(
        result_identifier: impl Into<String>,
        skip_identifier: impl Into<String>,
        predicate: Predicate,
    ) -> Self {
        Self {
            result_identifier: result_identifier.into(),
            skip_identifier: skip_identifier.into(),
            predicate,
        }
    }

    /// Whether this rule targets the same result and destination as another.
    pub fn same_target(&self, other: &SurveyRule) -> bool {
        self.result_identifier == other.result_identifier
            && self.skip_identifier == other.skip_identifier
    }
}

/// The rules of one navigation-capable step.
///
/// With `failed_skip_identifier` set, the step jumps there unless every rule
/// passes. Without it, the step jumps to a rule's destination once every rule
/// sharing that destination passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRules {
    pub rules: Vec<SurveyRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_skip_identifier: Option<String>,
}

impl NavigationRules {
    pub fn new(rules: Vec<SurveyRule>, failed_skip_identifier: Option<String>) -> Self {
        Self {
            rules,
            failed_skip_identifier,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Distinct skip destinations, in declaration order.
    pub fn skip_identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !identifiers.contains(&rule.skip_identifier.as_str()) {
                identifiers.push(&rule.skip_identifier);
            }
        }
        identifiers
    }

    /// First rule for a form item whose predicate holds for the answer.
    pub fn first_passing(
        &self,
        result_identifier: &str,
        answer: Option<&crate::Answer>,
    ) -> Option<&SurveyRule> {
        self.rules.iter().find(|rule| {
            rule.result_identifier == result_identifier && rule.predicate.evaluate(answer)
        })
    }
}
