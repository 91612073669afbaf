//! # survey-factory
//!
//! Compile declarative survey documents into navigable research-study tasks.
//!
//! A survey document is a JSON tree of items. The factory turns every item
//! into a typed [`Step`] (instruction, form, subtask, account, consent, data
//! groups or a host-defined custom step) with answer formats and skip rules.
//! At run time the navigation functions decide which step follows, and the
//! data-group fold works out the participant's study cohorts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use survey_factory::{DefaultStepFactory, TestResults, next_step_identifier};
//!
//! let factory = DefaultStepFactory::from_document(&json!({
//!     "steps": [
//!         {
//!             "identifier": "eligible",
//!             "type": "boolean",
//!             "text": "Are you over 18?",
//!             "expectedAnswer": true,
//!             "skipIdentifier": "ineligible"
//!         },
//!         { "identifier": "consent", "type": "consentReview" },
//!         { "identifier": "ineligible", "type": "instruction" }
//!     ]
//! }))?;
//!
//! let task = factory.create_task("onboarding");
//! let results = TestResults::new().with_bool("eligible", "eligible", false).build();
//!
//! assert_eq!(
//!     next_step_identifier(&task, Some("eligible"), &results).as_deref(),
//!     Some("ineligible")
//! );
//! ```
//!
//! ## Custom steps
//!
//! Every dispatch branch is a provided method of [`StepFactory`]. Implement
//! the four required accessors and override only the branches to change; the
//! free functions in [`forms`], [`instruction`], [`profile`] and [`consent`]
//! build the defaults and can be called from an override.
//!
//! ## Defects
//!
//! Malformed parts of a document (a scale without a range, an invalid
//! regex, a rule value that does not fit its question) never fail the build.
//! The affected piece is left out, a warning is logged and the defect is kept
//! for [`DefaultStepFactory::take_defects`].

// Re-export all types from survey-factory-types
pub use survey_factory_types::*;

mod config;
pub use config::{FactoryConfig, ProfileText};

mod defect;
pub use defect::{BuildDefect, DefectLog, ReportedDefect};

mod error;
pub use error::FactoryError;

mod resources;
pub use resources::{DirectoryResources, PassthroughResources, ResourceFinder};

mod factory;
pub use factory::{DefaultStepFactory, StepContext, StepFactory, TrackingType};

pub mod answer_formats;
pub mod choices;
pub mod consent;
pub mod forms;
pub mod instruction;
pub mod numeric_range;
pub mod profile;
pub mod rules;
pub mod text_field;

mod navigation;
pub use navigation::{SurveyNavigation, navigation_target, next_step, next_step_identifier};

mod data_groups;
pub use data_groups::{DataGroupSelection, union_data_groups};

mod task_assembly;
pub use task_assembly::{assemble_task, create_task_with_survey_elements};

// Results builder for exercising navigation without a UI
mod test_results;
pub use test_results::TestResults;
