use serde_json::{Value, json};

/// Multiple choice over six choices; values are the data groups.
pub fn data_group_selection() -> Value {
    json!({
        "identifier": "dataGroupSelection",
        "type": "dataGroups",
        "title": "Which data groups do you want to be in?",
        "text": "Choose one",
        "optional": false,
        "items": [
            { "text": "Group A", "value": "groupA" },
            { "text": "Group B", "value": ["groupB"] },
            { "text": "Group C", "value": "groupC" },
            { "text": "Group C and D", "value": ["groupC", "groupD"] },
            { "text": "Group E and F", "value": ["groupE", "groupF"] },
            { "text": "None", "value": "", "exclusive": true },
        ],
    })
}

/// Single choice where several answers map to the same group, so the answer
/// cannot be recovered from the groups.
pub fn data_group_single() -> Value {
    json!({
        "identifier": "dataGroupSelection",
        "type": "dataGroups.singleChoiceText",
        "title": "Which data groups do you want to be in?",
        "text": "Choose one",
        "optional": false,
        "items": [
            { "text": "Group A+", "value": "A+", "dataGroup": "groupA" },
            { "text": "Group A", "value": "A", "dataGroup": "groupA" },
            { "text": "Group A-", "value": "A-", "dataGroup": "groupA" },
            { "text": "Group B+", "value": "B+", "dataGroup": "groupB" },
            { "text": "Group B-", "value": "B-", "dataGroup": "groupB" },
            { "text": "None", "value": "none", "dataGroup": "" },
        ],
        "expectedAnswer": ["A+", "A", "A-"],
        "skipIdentifier": "answerA",
        "skipIfPassed": true,
    })
}

/// Two data-group steps, the second inside a subtask, owning disjoint groups.
pub fn cohort_survey() -> Value {
    json!({
        "steps": [
            {
                "identifier": "medication",
                "type": "dataGroups.singleChoiceText",
                "text": "Do you take medication?",
                "items": [
                    { "text": "Yes", "value": "groupA" },
                    { "text": "No", "value": "groupB" },
                ],
            },
            {
                "identifier": "lifestyle",
                "type": "subtask",
                "items": [
                    {
                        "identifier": "exercise",
                        "type": "dataGroups",
                        "text": "How do you exercise?",
                        "items": [
                            { "text": "Running", "value": "groupC" },
                            { "text": "Swimming", "value": "groupD" },
                        ],
                    },
                ],
            },
        ],
    })
}
