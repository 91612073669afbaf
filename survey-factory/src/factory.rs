use serde_json::Value;
use survey_factory_types::{
    AccountSubtype, AnswerFormat, ConsentDocument, ConsentSubtype, FormItem, FormSubtype,
    InstructionSubtype, PasscodeType, Step, SurveyItem, SurveyItemType, Task,
};

use crate::answer_formats;
use crate::config::FactoryConfig;
use crate::consent;
use crate::defect::{BuildDefect, DefectLog, ReportedDefect};
use crate::error::FactoryError;
use crate::forms;
use crate::instruction;
use crate::profile;
use crate::resources::{PassthroughResources, ResourceFinder};
use crate::task_assembly;

const SECTIONS_KEY: &str = "sections";
const STEPS_KEY: &str = "steps";

/// How an item is being tracked when it is turned into a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingType {
    /// A selection screen over the item's choices.
    Selection,
    /// An activity the host runs itself.
    Activity,
}

/// Where a step is being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepContext {
    /// The step lives inside a subtask, so the subtask wrapper owns navigation.
    pub is_subtask_step: bool,
    pub tracking_type: Option<TrackingType>,
}

impl StepContext {
    pub fn subtask() -> Self {
        Self {
            is_subtask_step: true,
            tracking_type: None,
        }
    }

    pub fn tracking(tracking_type: TrackingType) -> Self {
        Self {
            is_subtask_step: false,
            tracking_type: Some(tracking_type),
        }
    }
}

/// Turns survey items into steps.
///
/// Every branch of the dispatch is a provided method, so a host can replace
/// the step built for any item type without touching the others. The provided
/// methods call the free functions of this crate, passing `self` along, so an
/// override is also seen by nested construction (compound form items, subtask
/// children, profile items).
///
/// Implementors supply the collaborators; [`DefaultStepFactory`] is the
/// ready-made one.
pub trait StepFactory {
    fn config(&self) -> &FactoryConfig;

    fn resources(&self) -> &dyn ResourceFinder;

    fn defects(&self) -> &DefectLog;

    /// The document used by consent steps.
    fn consent_document(&self) -> &ConsentDocument;

    /// Record a configuration defect found while building an item.
    fn report_defect(&self, item: &str, defect: BuildDefect) {
        self.defects().report(item, defect);
    }

    /// Build the step for an item, or `None` when the item produces no step.
    fn create_step(&self, item: &SurveyItem, context: StepContext) -> Option<Step> {
        match context.tracking_type {
            Some(TrackingType::Selection) => return Some(self.create_tracked_selection_step(item)),
            Some(TrackingType::Activity) => return self.create_custom_step(item, context),
            None => {}
        }

        let item_type = item.survey_item_type();
        tracing::debug!(item = %item.identifier(), item_type = %item_type, "creating step");
        match item_type {
            SurveyItemType::Instruction(subtype) => {
                Some(self.create_instruction_step(item, subtype))
            }
            SurveyItemType::Subtask => Some(self.create_subtask_step(item)),
            SurveyItemType::Form(subtype) => Some(self.create_form_step(item, subtype, context)),
            SurveyItemType::Account(subtype) => self.create_account_step(item, subtype),
            SurveyItemType::Passcode(passcode) => Some(self.create_passcode_step(item, passcode)),
            SurveyItemType::Consent(subtype) => self.create_consent_step(item, subtype),
            SurveyItemType::DataGroups(subtype) => {
                Some(self.create_data_groups_step(item, subtype))
            }
            SurveyItemType::Custom(_) => self.create_custom_step(item, context),
        }
    }

    fn create_instruction_step(&self, item: &SurveyItem, subtype: InstructionSubtype) -> Step {
        Step::Instruction(instruction::create_instruction_step(self, item, subtype))
    }

    fn create_subtask_step(&self, item: &SurveyItem) -> Step {
        forms::create_subtask_step(self, item)
    }

    fn create_form_step(&self, item: &SurveyItem, subtype: FormSubtype, context: StepContext) -> Step {
        forms::create_form_step(self, item, subtype, context)
    }

    /// Build one form item. The item's own subtype wins over `subtype`.
    fn create_form_item(&self, item: &SurveyItem, subtype: Option<FormSubtype>) -> FormItem {
        forms::create_form_item(self, item, subtype)
    }

    fn create_answer_format(
        &self,
        item: &SurveyItem,
        subtype: Option<FormSubtype>,
    ) -> Option<AnswerFormat> {
        answer_formats::create_answer_format(self, item, subtype)
    }

    fn create_account_step(&self, item: &SurveyItem, subtype: AccountSubtype) -> Option<Step> {
        Some(profile::create_account_step(self, item, subtype))
    }

    fn create_passcode_step(&self, item: &SurveyItem, passcode: PasscodeType) -> Step {
        profile::create_passcode_step(self, item, passcode)
    }

    fn create_consent_step(&self, item: &SurveyItem, subtype: ConsentSubtype) -> Option<Step> {
        Some(consent::create_consent_step(self, item, subtype))
    }

    fn create_data_groups_step(&self, item: &SurveyItem, subtype: Option<FormSubtype>) -> Step {
        forms::create_data_groups_step(self, item, subtype)
    }

    /// The catch-all for types this factory does not know.
    fn create_custom_step(&self, item: &SurveyItem, context: StepContext) -> Option<Step> {
        Some(instruction::create_custom_step(self, item, context))
    }

    fn create_tracked_selection_step(&self, item: &SurveyItem) -> Step {
        forms::create_tracked_selection_step(self, item)
    }
}

/// The stock factory: built-in steps, configurable text and resources.
pub struct DefaultStepFactory {
    config: FactoryConfig,
    resources: Box<dyn ResourceFinder>,
    defects: DefectLog,
    consent_document: ConsentDocument,
    steps: Vec<Step>,
}

impl Default for DefaultStepFactory {
    fn default() -> Self {
        Self::new(FactoryConfig::default(), PassthroughResources)
    }
}

impl std::fmt::Debug for DefaultStepFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultStepFactory")
            .field("config", &self.config)
            .field("defects", &self.defects.len())
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}

impl DefaultStepFactory {
    pub fn new(config: FactoryConfig, resources: impl ResourceFinder + 'static) -> Self {
        let consent_document = consent::default_consent_document(&config);
        Self {
            config,
            resources: Box::new(resources),
            defects: DefectLog::new(),
            consent_document,
            steps: Vec::new(),
        }
    }

    /// A default factory loaded with a survey document.
    pub fn from_document(document: &Value) -> Result<Self, FactoryError> {
        Self::default().with_document(document)
    }

    /// Parse `json` and load it as a survey document.
    pub fn with_json(self, json: &str) -> Result<Self, FactoryError> {
        let document: Value = serde_json::from_str(json)?;
        self.with_document(&document)
    }

    /// Read the consent `sections` and the `steps` of a document.
    ///
    /// Malformed entries inside `steps` are reported and skipped; only a
    /// document that is not an object is an error.
    pub fn with_document(mut self, document: &Value) -> Result<Self, FactoryError> {
        let object = document.as_object().ok_or(FactoryError::NotAnObject {
            found: json_type_name(document),
        })?;

        if object.contains_key(SECTIONS_KEY) {
            self.consent_document = consent::create_consent_document(&self, document);
        }

        let mut steps = Vec::new();
        for (index, value) in object
            .get(STEPS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .enumerate()
        {
            match SurveyItem::from_value(value) {
                Ok(item) => steps.extend(self.create_step(&item, StepContext::default())),
                Err(err) => self.report_defect(
                    STEPS_KEY,
                    BuildDefect::InvalidItem {
                        index,
                        message: err.to_string(),
                    },
                ),
            }
        }
        tracing::debug!(steps = steps.len(), "loaded survey document");
        self.steps = steps;
        Ok(self)
    }

    /// Steps built from the loaded document, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// A task over the loaded steps.
    pub fn create_task(&self, identifier: &str) -> Task {
        task_assembly::assemble_task(self, identifier, self.steps.clone())
    }

    /// Build a task from a list of items, dressing a trailing instruction as
    /// the completion step.
    pub fn create_task_with_survey_elements(&self, identifier: &str, elements: &[SurveyItem]) -> Task {
        task_assembly::create_task_with_survey_elements(self, identifier, elements)
    }

    /// Drain the defects reported so far.
    pub fn take_defects(&self) -> Vec<ReportedDefect> {
        self.defects.take()
    }
}

impl StepFactory for DefaultStepFactory {
    fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn resources(&self) -> &dyn ResourceFinder {
        self.resources.as_ref()
    }

    fn defects(&self) -> &DefectLog {
        &self.defects
    }

    fn consent_document(&self) -> &ConsentDocument {
        &self.consent_document
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
