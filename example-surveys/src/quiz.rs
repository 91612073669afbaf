use serde_json::{Value, json};

/// Three yes/no questions in one compound step. Any wrong answer skips
/// ahead to `consent`.
pub fn compound_quiz() -> Value {
    json!({
        "identifier": "quiz",
        "type": "compound",
        "title": "Quiz",
        "items": [
            { "identifier": "question1", "type": "boolean", "prompt": "I can share my data broadly or only with Sage?", "expectedAnswer": true },
            { "identifier": "question2", "type": "boolean", "prompt": "My name is stored with my results?", "expectedAnswer": true },
            { "identifier": "question3", "type": "boolean", "prompt": "I can withdraw at any time?", "expectedAnswer": true },
        ],
        "skipIdentifier": "consent",
    })
}

/// The same questions as toggles. Getting every answer right skips ahead to
/// `consent`.
pub fn toggle_quiz() -> Value {
    json!({
        "identifier": "quiz",
        "type": "toggle",
        "title": "Quiz",
        "items": [
            { "identifier": "question1", "text": "I can share my data broadly or only with Sage?", "expectedAnswer": true },
            { "identifier": "question2", "text": "My name is stored with my results?", "expectedAnswer": true },
            { "identifier": "question3", "text": "I can withdraw at any time?", "expectedAnswer": true },
        ],
        "skipIdentifier": "consent",
        "skipIfPassed": true,
    })
}

/// One question per screen inside a subtask.
pub fn subtask_quiz() -> Value {
    json!({
        "identifier": "quiz",
        "type": "subtask",
        "items": [
            { "identifier": "question1", "type": "boolean", "prompt": "I can share my data broadly or only with Sage?", "expectedAnswer": true },
            { "identifier": "question2", "type": "boolean", "prompt": "My name is stored with my results?", "expectedAnswer": false },
            { "identifier": "question3", "type": "boolean", "prompt": "I can withdraw at any time?", "expectedAnswer": true },
        ],
        "skipIdentifier": "consent",
        "skipIfPassed": true,
    })
}

/// A quiz task: intro, quiz, a retry screen and the consent it leads to.
pub fn quiz_survey(quiz: Value) -> Value {
    json!({
        "steps": [
            { "identifier": "intro", "type": "instruction", "title": "Before you join", "text": "Answer a few questions about the study." },
            quiz,
            { "identifier": "retry", "type": "instruction", "prompt": "Some answers were wrong", "nextIdentifier": "intro" },
            { "identifier": "quizComplete", "type": "completion", "title": "Great Job!", "text": "You answered correctly" },
            { "identifier": "consent", "type": "consentReview" },
        ],
    })
}

/// Eligibility screening with rule operators and a direct jump.
pub fn eligibility() -> Value {
    json!({
        "steps": [
            {
                "identifier": "age",
                "type": "integer",
                "text": "How old are you?",
                "min": 0,
                "max": 120,
                "unit": "years",
                "ruleOperator": "lt",
                "expectedAnswer": 18,
                "skipIdentifier": "ineligible",
                "skipIfPassed": true,
            },
            {
                "identifier": "diagnosis",
                "type": "singleChoiceText",
                "text": "Have you been diagnosed with Parkinson's disease?",
                "items": [
                    { "text": "Yes", "value": "yes" },
                    { "text": "No", "value": "no" },
                    { "text": "Not sure", "value": "unsure" },
                ],
                "rules": [
                    { "expectedAnswer": "no", "skipIdentifier": "ineligible" },
                    { "expectedAnswer": "unsure", "skipIdentifier": "ineligible" },
                ],
                "skipIfPassed": true,
            },
            { "identifier": "eligible", "type": "instruction", "text": "You are eligible.", "nextIdentifier": "ORKNullStepIdentifier" },
            { "identifier": "ineligible", "type": "instruction", "prompt": "You can't get there from here", "nextIdentifier": "ORKNullStepIdentifier" },
        ],
    })
}
