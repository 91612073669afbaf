//! Survey documents used by the tests and the `survey-compile` binary.

pub mod consent;
pub mod data_groups;
pub mod formats;
pub mod onboarding;
pub mod quiz;

use serde_json::Value;

pub use consent::consent_survey;
pub use data_groups::{cohort_survey, data_group_selection, data_group_single};
pub use formats::{answer_formats, mood, timing_range};
pub use onboarding::{login, onboarding};
pub use quiz::{compound_quiz, eligibility, quiz_survey, subtask_quiz, toggle_quiz};

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "compound-quiz",
    "toggle-quiz",
    "subtask-quiz",
    "eligibility",
    "data-groups",
    "cohorts",
    "consent",
    "onboarding",
    "login",
    "answer-formats",
];

/// A complete survey document by name.
pub fn by_name(name: &str) -> Option<Value> {
    let document = match name {
        "compound-quiz" => quiz_survey(compound_quiz()),
        "toggle-quiz" => quiz_survey(toggle_quiz()),
        "subtask-quiz" => quiz_survey(subtask_quiz()),
        "eligibility" => eligibility(),
        "data-groups" => serde_json::json!({ "steps": [data_group_selection()] }),
        "cohorts" => cohort_survey(),
        "consent" => consent_survey(),
        "onboarding" => onboarding(),
        "login" => login(),
        "answer-formats" => answer_formats(),
        _ => return None,
    };
    Some(document)
}
