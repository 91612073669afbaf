//! Core types for the survey-factory crate.
//!
//! This crate provides the presentation-agnostic data model:
//! - `SurveyItem` and `SurveyItemType` - Parsed document nodes and their resolved kinds
//! - `AnswerFormat` and `FormItem` - What a legal answer looks like
//! - `Predicate`, `SurveyRule` and `NavigationRules` - Skip logic over future answers
//! - `Step` and `Task` - The constructed object graph
//! - `StepResult`, `TaskResult` and `ResultPath` - Answers collected at run time

mod result_path;
pub use result_path::ResultPath;

mod answer;
pub use answer::{Answer, ChoiceValue, choice_values_match};

mod item_type;
pub use item_type::{
    AccountSubtype, ConsentSubtype, FormSubtype, InstructionSubtype, PasscodeType, SurveyItemType,
};

mod item;
pub use item::{SurveyItem, keys, parse_date_time, parse_time_of_day};

mod answer_format;
pub use answer_format::{
    AnswerFormat, Autocapitalization, ChoiceStyle, ContinuousScaleAnswerFormat, DateAnswerFormat,
    DateStyle, HealthCharacteristic, KeyboardType, MeasurementKind, MoodChoice,
    MoodScaleAnswerFormat, NumericAnswerFormat, NumericStyle, ScaleAnswerFormat, TextAnswerFormat,
    TextChoice, TextChoiceAnswerFormat, TextValidationError, ValidationRegex, value_as_groups,
};

mod predicate;
pub use predicate::Predicate;

mod rule;
pub use rule::{NULL_STEP_IDENTIFIER, NavigationRules, RuleOperator, SurveyRule, UnknownOperator};

mod learn_more;
pub use learn_more::{LearnMoreAction, LearnMoreKind};

mod consent;
pub use consent::{ConsentDocument, ConsentSection, ConsentSectionType, ConsentSignature};

mod profile;
pub use profile::{PASSWORD_CONFIRMATION_IDENTIFIER, ProfileInfoOption};

mod step;
pub use step::{
    ConsentPage, ConsentReviewStep, ConsentSharingStep, DataGroupsStep, FormItem, FormStep,
    FormStyle, InstructionStep, NavigationFormStep, NavigationSubtaskStep, PasscodeStep,
    PermissionsStep, ProfileFormStep, Step, SubtaskStep, VisualConsentStep,
};

mod task;
pub use task::Task;

mod results;
pub use results::{StepResult, TaskResult};

mod error;
pub use error::{CoercionError, ResultError, SurveyItemError};
