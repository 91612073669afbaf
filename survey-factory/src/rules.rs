//! Navigation rules built from a survey item.
//!
//! A rule group is the item itself when it carries an `expectedAnswer`,
//! otherwise its explicit `rules`, otherwise those of its nested `items` that
//! describe a rule. Rules sharing a result identifier and skip identifier are
//! folded into one rule whose predicate is the OR of theirs.

use serde_json::{Map, Value};
use survey_factory_types::{
    Answer, CoercionError, FormSubtype, NULL_STEP_IDENTIFIER, NavigationRules, Predicate,
    RuleOperator, SurveyItem, SurveyItemType, SurveyRule, keys, parse_date_time,
    parse_time_of_day,
};

use crate::defect::BuildDefect;
use crate::factory::StepFactory;

/// Coerce an expected answer to the answer type of a subtype.
///
/// Choice subtypes wrap the value in a one-element list, since choice answers
/// are always lists. Subtypes without a fixed answer type pass the value
/// through.
pub fn coerce_value(subtype: Option<FormSubtype>, value: &Value) -> Result<Answer, CoercionError> {
    let Some(subtype) = subtype else {
        return Answer::from_json(value).ok_or_else(|| CoercionError::unsupported("value", value));
    };
    let unsupported = || CoercionError::unsupported(subtype.key(), value);

    match subtype {
        FormSubtype::SingleChoice | FormSubtype::MultipleChoice | FormSubtype::TimingRange => {
            Some(Answer::Choices(vec![value.clone()]))
        }
        FormSubtype::Boolean | FormSubtype::Toggle => coerce_bool(value).map(Answer::Bool),
        FormSubtype::Scale | FormSubtype::Integer => coerce_int(value).map(Answer::Int),
        FormSubtype::ContinuousScale | FormSubtype::Decimal | FormSubtype::Duration => {
            coerce_float(value).map(Answer::Float)
        }
        FormSubtype::Date | FormSubtype::DateTime => {
            value.as_str().and_then(parse_date_time).map(Answer::Date)
        }
        FormSubtype::Time => value
            .as_str()
            .and_then(parse_time_of_day)
            .map(Answer::TimeOfDay),
        FormSubtype::Compound
        | FormSubtype::Text
        | FormSubtype::MultipleLineText
        | FormSubtype::Mood => Answer::from_json(value),
    }
    .ok_or_else(unsupported)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build the predicate of one rule.
///
/// `Skip` tests for a missing answer and needs no expected answer; every
/// other operator does. For choice subtypes `OtherThan` means "the answer
/// does not include the value", and an `Equal` against a list of values
/// matches any one of them.
pub fn build_predicate(
    subtype: Option<FormSubtype>,
    expected: Option<&Value>,
    operator: RuleOperator,
) -> Result<Predicate, CoercionError> {
    if operator == RuleOperator::Skip {
        return Ok(Predicate::IsNull);
    }
    let value = expected.ok_or(CoercionError::MissingValue {
        operator: operator.code(),
    })?;

    if subtype.is_some_and(FormSubtype::is_choice) {
        match (operator, value) {
            (RuleOperator::OtherThan, _) => return Ok(Predicate::NotContains(value.clone())),
            (RuleOperator::Equal, Value::Array(values)) if !values.is_empty() => {
                let mut alternatives = values
                    .iter()
                    .map(|v| Predicate::Equal(Answer::Choices(vec![v.clone()])));
                let first = alternatives.next().ok_or_else(|| {
                    CoercionError::unsupported(subtype.map_or("value", FormSubtype::key), value)
                })?;
                return Ok(alternatives.fold(first, Predicate::or));
            }
            _ => {}
        }
    }

    let answer = coerce_value(subtype, value)?;
    Ok(match operator {
        RuleOperator::Skip => Predicate::IsNull,
        RuleOperator::Equal => Predicate::Equal(answer),
        RuleOperator::NotEqual | RuleOperator::OtherThan => Predicate::NotEqual(answer),
        RuleOperator::LessThan => Predicate::LessThan(answer),
        RuleOperator::GreaterThan => Predicate::GreaterThan(answer),
        RuleOperator::LessThanEqual => Predicate::LessThanOrEqual(answer),
        RuleOperator::GreaterThanEqual => Predicate::GreaterThanOrEqual(answer),
    })
}

/// A rule entry read straight from the document. Rule entries need not have
/// an identifier, so they are not parsed as survey items.
struct RuleItem<'a>(&'a Map<String, Value>);

impl RuleItem<'_> {
    fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn expected_answer(&self) -> Option<&Value> {
        self.0.get(keys::EXPECTED_ANSWER).filter(|v| !v.is_null())
    }

    fn form_subtype(&self) -> Option<FormSubtype> {
        match SurveyItemType::from_optional(self.string(keys::TYPE)) {
            SurveyItemType::Form(subtype) => Some(subtype),
            SurveyItemType::DataGroups(subtype) => subtype,
            _ => None,
        }
    }

    /// A nested item is a rule when it has an expected answer or an operator.
    fn is_valid_rule(&self) -> bool {
        self.expected_answer().is_some() || self.string(keys::RULE_OPERATOR).is_some()
    }
}

fn rule_group(item: &SurveyItem) -> Vec<RuleItem<'_>> {
    let own = RuleItem(item.raw());
    if own.is_valid_rule() {
        return vec![own];
    }
    if let Some(rules) = item.rule_values() {
        return rules.iter().filter_map(Value::as_object).map(RuleItem).collect();
    }
    item.items()
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_object)
        .map(RuleItem)
        .filter(RuleItem::is_valid_rule)
        .collect()
}

/// Build and fold the rules of an item.
///
/// `group_subtype` is used for rule entries that do not declare a type of
/// their own. Rules that cannot be built are reported and left out.
pub fn create_rules<F>(
    factory: &F,
    item: &SurveyItem,
    group_subtype: Option<FormSubtype>,
) -> Vec<SurveyRule>
where
    F: StepFactory + ?Sized,
{
    let mut rules: Vec<SurveyRule> = Vec::new();
    for rule_item in rule_group(item) {
        let subtype = rule_item.form_subtype().or(group_subtype);
        let result_identifier = rule_item
            .string(keys::IDENTIFIER)
            .unwrap_or(item.identifier());
        let expected = rule_item.expected_answer();

        let operator = match rule_item.string(keys::RULE_OPERATOR) {
            Some(code) => match code.parse::<RuleOperator>() {
                Ok(operator) => operator,
                Err(err) => {
                    factory.report_defect(item.identifier(), err.into());
                    continue;
                }
            },
            None => RuleOperator::default_for(expected.is_some()),
        };

        let predicate = match build_predicate(subtype, expected, operator) {
            Ok(predicate) => predicate,
            Err(err) => {
                factory.report_defect(item.identifier(), err.into());
                continue;
            }
        };

        let skip_identifier = rule_item
            .string(keys::SKIP_IDENTIFIER)
            .or(item.skip_identifier())
            .unwrap_or(NULL_STEP_IDENTIFIER);
        let rule = SurveyRule::new(result_identifier, skip_identifier, predicate);
        tracing::trace!(
            item = %item.identifier(),
            result = %rule.result_identifier,
            skip = %rule.skip_identifier,
            operator = %operator,
            "built rule"
        );

        match rules.iter_mut().find(|existing| existing.same_target(&rule)) {
            Some(existing) => {
                let folded = std::mem::replace(&mut existing.predicate, Predicate::IsNull);
                existing.predicate = folded.or(rule.predicate);
            }
            None => rules.push(rule),
        }
    }
    rules
}

/// Where to go when not every rule passes.
///
/// `None` when the item skips on success (`skipIfPassed`); otherwise the
/// item's skip identifier, or the end of the task.
pub fn failed_skip_identifier(item: &SurveyItem) -> Option<String> {
    if item.skip_if_passed() {
        None
    } else {
        Some(
            item.skip_identifier()
                .unwrap_or(NULL_STEP_IDENTIFIER)
                .to_string(),
        )
    }
}

/// The rules and failed-skip target of a navigation-capable step.
///
/// `reachable` says whether a result identifier names a form item of the
/// step. A rule on any other identifier could never pass, so it is reported
/// and dropped.
pub fn create_navigation_rules<F>(
    factory: &F,
    item: &SurveyItem,
    group_subtype: Option<FormSubtype>,
    reachable: impl Fn(&str) -> bool,
) -> NavigationRules
where
    F: StepFactory + ?Sized,
{
    let mut rules = create_rules(factory, item, group_subtype);
    rules.retain(|rule| {
        let keep = reachable(rule.result_identifier.as_str());
        if !keep {
            factory.report_defect(
                item.identifier(),
                BuildDefect::UnreachableRule {
                    result: rule.result_identifier.clone(),
                },
            );
        }
        keep
    });
    let navigation = NavigationRules::new(rules, failed_skip_identifier(item));
    let targets = navigation.skip_identifiers();
    if navigation.failed_skip_identifier.is_some() && targets.len() > 1 {
        factory.report_defect(
            item.identifier(),
            BuildDefect::AmbiguousFailedSkip {
                targets: targets.join(", "),
            },
        );
    }
    navigation
}

/// Whether the step built from an item needs navigation rules at all.
pub fn uses_navigation(item: &SurveyItem) -> bool {
    item.has_navigation_rules()
        || item.rule_values().is_some()
        || item
            .items()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .map(RuleItem)
            .any(|nested| nested.is_valid_rule())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultStepFactory;
    use serde_json::json;

    fn item(value: Value) -> SurveyItem {
        SurveyItem::from_value(&value).unwrap()
    }

    #[test]
    fn bool_coercion() {
        let subtype = Some(FormSubtype::Boolean);
        assert_eq!(coerce_value(subtype, &json!(true)).unwrap(), Answer::Bool(true));
        assert_eq!(coerce_value(subtype, &json!("no")).unwrap(), Answer::Bool(false));
        assert_eq!(coerce_value(subtype, &json!(1)).unwrap(), Answer::Bool(true));
        assert!(coerce_value(subtype, &json!("maybe")).is_err());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(
            coerce_value(Some(FormSubtype::Integer), &json!("42")).unwrap(),
            Answer::Int(42)
        );
        assert_eq!(
            coerce_value(Some(FormSubtype::Decimal), &json!(2)).unwrap(),
            Answer::Float(2.0)
        );
        assert!(coerce_value(Some(FormSubtype::Scale), &json!(2.5)).is_err());
    }

    #[test]
    fn date_and_time_coercion() {
        assert!(matches!(
            coerce_value(Some(FormSubtype::Date), &json!("2021-03-04")).unwrap(),
            Answer::Date(_)
        ));
        assert!(matches!(
            coerce_value(Some(FormSubtype::Time), &json!("07:30")).unwrap(),
            Answer::TimeOfDay(_)
        ));
        assert!(coerce_value(Some(FormSubtype::Time), &json!(730)).is_err());
    }

    #[test]
    fn choice_values_are_wrapped() {
        assert_eq!(
            coerce_value(Some(FormSubtype::SingleChoice), &json!("a")).unwrap(),
            Answer::Choices(vec![json!("a")])
        );
    }

    #[test]
    fn skip_needs_no_value() {
        let predicate = build_predicate(Some(FormSubtype::Integer), None, RuleOperator::Skip).unwrap();
        assert_eq!(predicate, Predicate::IsNull);
    }

    #[test]
    fn comparison_without_value_fails() {
        assert!(matches!(
            build_predicate(Some(FormSubtype::Integer), None, RuleOperator::GreaterThan),
            Err(CoercionError::MissingValue { operator: "gt" })
        ));
    }

    #[test]
    fn other_than_on_choices_is_not_contains() {
        let predicate = build_predicate(
            Some(FormSubtype::MultipleChoice),
            Some(&json!("b")),
            RuleOperator::OtherThan,
        )
        .unwrap();
        assert!(predicate.evaluate(Some(&Answer::Choices(vec![json!("a")]))));
        assert!(!predicate.evaluate(Some(&Answer::Choices(vec![json!("a"), json!("b")]))));
    }

    #[test]
    fn other_than_on_scalars_is_not_equal() {
        let predicate =
            build_predicate(Some(FormSubtype::Integer), Some(&json!(3)), RuleOperator::OtherThan)
                .unwrap();
        assert_eq!(predicate, Predicate::NotEqual(Answer::Int(3)));
    }

    #[test]
    fn list_of_expected_choices_matches_any() {
        let predicate = build_predicate(
            Some(FormSubtype::SingleChoice),
            Some(&json!(["A+", "A", "A-"])),
            RuleOperator::Equal,
        )
        .unwrap();
        assert!(predicate.evaluate(Some(&Answer::Choices(vec![json!("A")]))));
        assert!(!predicate.evaluate(Some(&Answer::Choices(vec![json!("B+")]))));
    }

    #[test]
    fn boolean_default_operator_is_equal() {
        let factory = DefaultStepFactory::default();
        let rules = create_rules(
            &factory,
            &item(json!({
                "identifier": "smoker",
                "type": "boolean",
                "expectedAnswer": true,
                "skipIdentifier": "end",
            })),
            Some(FormSubtype::Boolean),
        );
        assert_eq!(rules.len(), 1);
        let predicate = &rules[0].predicate;
        assert!(predicate.evaluate(Some(&Answer::Bool(true))));
        assert!(!predicate.evaluate(Some(&Answer::Bool(false))));
        assert!(!predicate.evaluate(None));
    }

    #[test]
    fn same_target_rules_fold_with_or() {
        let factory = DefaultStepFactory::default();
        let rules = create_rules(
            &factory,
            &item(json!({
                "identifier": "age",
                "type": "integer",
                "skipIdentifier": "end",
                "rules": [
                    { "ruleOperator": "lt", "expectedAnswer": 18 },
                    { "ruleOperator": "gt", "expectedAnswer": 90 },
                    { "ruleOperator": "eq", "expectedAnswer": 50, "skipIdentifier": "fifty" },
                ],
            })),
            Some(FormSubtype::Integer),
        );
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].skip_identifier, "end");
        assert!(rules[0].predicate.evaluate(Some(&Answer::Int(10))));
        assert!(rules[0].predicate.evaluate(Some(&Answer::Int(95))));
        assert!(!rules[0].predicate.evaluate(Some(&Answer::Int(40))));
        assert_eq!(rules[1].skip_identifier, "fifty");
    }

    #[test]
    fn nested_items_supply_rules() {
        let factory = DefaultStepFactory::default();
        let quiz = item(json!({
            "identifier": "quiz",
            "type": "compound",
            "skipIdentifier": "consent",
            "items": [
                { "identifier": "q1", "type": "boolean", "expectedAnswer": true },
                { "identifier": "q2", "type": "boolean" },
                { "identifier": "q3", "type": "boolean", "expectedAnswer": false },
            ],
        }));
        let rules = create_rules(&factory, &quiz, quiz.form_subtype());
        let ids: Vec<&str> = rules.iter().map(|r| r.result_identifier.as_str()).collect();
        assert_eq!(ids, ["q1", "q3"]);
        assert!(rules.iter().all(|r| r.skip_identifier == "consent"));
        assert!(uses_navigation(&quiz));
    }

    #[test]
    fn bad_rules_are_dropped_and_reported() {
        let factory = DefaultStepFactory::default();
        let rules = create_rules(
            &factory,
            &item(json!({
                "identifier": "age",
                "type": "integer",
                "rules": [
                    { "ruleOperator": "zz", "expectedAnswer": 1 },
                    { "ruleOperator": "eq", "expectedAnswer": "old" },
                    { "ruleOperator": "eq", "expectedAnswer": 3 },
                ],
            })),
            Some(FormSubtype::Integer),
        );
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].skip_identifier, NULL_STEP_IDENTIFIER);
        let defects = factory.take_defects();
        assert!(matches!(defects[0].defect, BuildDefect::UnknownOperator(_)));
        assert!(matches!(defects[1].defect, BuildDefect::Coercion(_)));
    }

    #[test]
    fn failed_skip_follows_skip_if_passed() {
        let failing = item(json!({ "identifier": "q", "skipIdentifier": "end" }));
        assert_eq!(failed_skip_identifier(&failing).as_deref(), Some("end"));

        let passing = item(json!({ "identifier": "q", "skipIdentifier": "end", "skipIfPassed": true }));
        assert_eq!(failed_skip_identifier(&passing), None);

        let bare = item(json!({ "identifier": "q" }));
        assert_eq!(failed_skip_identifier(&bare).as_deref(), Some(NULL_STEP_IDENTIFIER));
    }

    #[test]
    fn failed_skip_with_several_targets_is_reported() {
        let factory = DefaultStepFactory::default();
        let navigation = create_navigation_rules(
            &factory,
            &item(json!({
                "identifier": "age",
                "type": "integer",
                "rules": [
                    { "ruleOperator": "lt", "expectedAnswer": 18, "skipIdentifier": "minor" },
                    { "ruleOperator": "gt", "expectedAnswer": 90, "skipIdentifier": "senior" },
                ],
            })),
            Some(FormSubtype::Integer),
            |result| result == "age",
        );
        assert_eq!(navigation.len(), 2);
        assert!(matches!(
            factory.take_defects()[0].defect,
            BuildDefect::AmbiguousFailedSkip { .. }
        ));
    }

    #[test]
    fn rules_on_missing_form_items_are_dropped() {
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
        let navigation =
            create_navigation_rules(&factory, &quiz, quiz.form_subtype(), |result| result == "q1");
        let ids: Vec<&str> = navigation.rules.iter().map(|r| r.result_identifier.as_str()).collect();
        assert_eq!(ids, ["q1"]);
        assert_eq!(
            factory.take_defects()[0].defect,
            BuildDefect::UnreachableRule { result: "quiz".to_string() }
        );
    }

    #[test]
    fn plain_items_do_not_navigate() {
        assert!(!uses_navigation(&item(json!({
            "identifier": "name",
            "type": "text",
        }))));
    }
}
