//! Invariants of data-group folding and navigation over generated inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{Value, json};
use survey_factory::{
    DataGroupSelection, DefaultStepFactory, StepResult, TestResults, next_step_identifier,
};

const GROUPS: [&str; 6] = ["groupA", "groupB", "groupC", "groupD", "other", "test_user"];

fn group_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(GROUPS.to_vec(), 0..=GROUPS.len())
        .prop_map(|groups| groups.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn union_only_replaces_owned_groups(current in group_set(), picked in proptest::sample::subsequence(vec!["groupA", "groupB", "groupC"], 0..=3)) {
        let document = json!({
            "steps": [{
                "identifier": "groups",
                "type": "dataGroups",
                "items": [
                    { "text": "A", "value": "groupA" },
                    { "text": "B", "value": "groupB" },
                    { "text": "C", "value": ["groupC", "groupD"] },
                ],
            }],
        });
        let factory = DefaultStepFactory::from_document(&document).unwrap();
        let step = factory.steps()[0].as_data_groups().unwrap().clone();
        let universe = step.universe();

        let choices: Vec<Value> = picked.iter().map(|value| json!(value)).collect();
        let result = StepResult::new("groups").with_answer("groups", choices);
        let union = step.union_groups(&current, &result);

        for group in current.difference(&universe) {
            prop_assert!(union.contains(group));
        }
        for group in &union {
            prop_assert!(universe.contains(group) || current.contains(group));
        }
        prop_assert_eq!(union.contains("groupD"), picked.contains(&"groupC"));
    }

    #[test]
    fn unrouted_steps_follow_declared_order(count in 1usize..8) {
        let steps: Vec<Value> = (0..count)
            .map(|index| json!({ "identifier": format!("step{index}"), "type": "instruction" }))
            .collect();
        let task = DefaultStepFactory::from_document(&json!({ "steps": steps }))
            .unwrap()
            .create_task("ordered");
        let results = TestResults::new().build();

        prop_assert_eq!(next_step_identifier(&task, None, &results), Some("step0".to_string()));
        for index in 0..count {
            let expected = (index + 1 < count).then(|| format!("step{}", index + 1));
            prop_assert_eq!(
                next_step_identifier(&task, Some(&format!("step{index}")), &results),
                expected
            );
        }
    }
}
