use serde::{Deserialize, Serialize};

use crate::answer_format::{AnswerFormat, TextChoiceAnswerFormat};
use crate::consent::{ConsentDocument, ConsentSectionType, ConsentSignature};
use crate::item_type::PasscodeType;
use crate::learn_more::LearnMoreAction;
use crate::profile::ProfileInfoOption;
use crate::rule::NavigationRules;
use crate::task::Task;

/// One answerable field within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormItem {
    /// Key of this item's answer in the step result.
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// `None` when the format could not be built from the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_format: Option<AnswerFormat>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// For a confirmation field, the item whose answer must be repeated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_of: Option<String>,
}

impl FormItem {
    pub fn new(
        identifier: impl Into<String>,
        text: Option<String>,
        answer_format: Option<AnswerFormat>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            text,
            answer_format,
            optional: false,
            placeholder: None,
            confirmation_of: None,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// A second field that must repeat this one's answer.
    pub fn confirmation(&self, identifier: impl Into<String>, text: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text,
            answer_format: self.answer_format.clone(),
            optional: self.optional,
            placeholder: None,
            confirmation_of: Some(self.identifier.clone()),
        }
    }
}

/// A screen of form items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub form_items: Vec<FormItem>,
}

impl FormStep {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn form_item(&self, identifier: &str) -> Option<&FormItem> {
        self.form_items.iter().find(|i| i.identifier == identifier)
    }
}

/// How a navigation-capable form step is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStyle {
    #[default]
    Form,
    /// One question per screen.
    Question,
    /// A list of yes/no toggles.
    Toggle,
}

/// A form step that can redirect the task based on its answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFormStep {
    #[serde(flatten)]
    pub form: FormStep,

    #[serde(default)]
    pub style: FormStyle,

    #[serde(flatten)]
    pub navigation: NavigationRules,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more_action: Option<LearnMoreAction>,
}

/// A step that wraps a nested task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskStep {
    pub identifier: String,
    pub subtask: Task,
}

impl SubtaskStep {
    pub fn new(subtask: Task) -> Self {
        Self {
            identifier: subtask.identifier.clone(),
            subtask,
        }
    }
}

/// A subtask whose nested answers can redirect the parent task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSubtaskStep {
    #[serde(flatten)]
    pub subtask: SubtaskStep,

    #[serde(flatten)]
    pub navigation: NavigationRules,
}

/// A choice step whose answers are data-group memberships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGroupsStep {
    #[serde(flatten)]
    pub form: FormStep,

    #[serde(flatten)]
    pub navigation: NavigationRules,
}

impl DataGroupsStep {
    /// The choice format of the single form item, if it has one.
    pub fn choice_format(&self) -> Option<&TextChoiceAnswerFormat> {
        self.form
            .form_items
            .first()?
            .answer_format
            .as_ref()?
            .as_text_choice()
    }
}

/// Instruction, completion and placeholder screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more_action: Option<LearnMoreAction>,

    /// Jump here after this step instead of the next step in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step_identifier: Option<String>,

    /// Set for custom item types and steps a host handles specially.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type_identifier: Option<String>,

    #[serde(default)]
    pub is_completion_step: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_button_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_step_audio: Option<String>,
}

impl InstructionStep {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }
}

/// Account and demographics form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFormStep {
    #[serde(flatten)]
    pub form: FormStep,

    /// Options the form items were built from, in order.
    #[serde(default)]
    pub options: Vec<ProfileInfoOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Permission names requested, in order.
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasscodeStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub passcode_type: PasscodeType,
}

/// One page of the visual consent flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentPage {
    pub identifier: String,
    pub section_type: ConsentSectionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more_action: Option<LearnMoreAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualConsentStep {
    pub identifier: String,
    pub pages: Vec<ConsentPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSharingStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub answer_format: TextChoiceAnswerFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more_html_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentReviewStep {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<ConsentSignature>,

    pub document: ConsentDocument,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_consent: Option<String>,
}

/// A constructed step, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stepType", rename_all = "camelCase")]
pub enum Step {
    Instruction(InstructionStep),
    Form(FormStep),
    NavigationForm(NavigationFormStep),
    Subtask(SubtaskStep),
    NavigationSubtask(NavigationSubtaskStep),
    DataGroups(DataGroupsStep),
    Registration(ProfileFormStep),
    Login(ProfileFormStep),
    #[serde(rename = "externalID")]
    ExternalId(ProfileFormStep),
    Profile(ProfileFormStep),
    Permissions(PermissionsStep),
    OnboardingComplete(InstructionStep),
    Passcode(PasscodeStep),
    VisualConsent(VisualConsentStep),
    ConsentSharing(ConsentSharingStep),
    ConsentReview(ConsentReviewStep),
}

impl Step {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Instruction(s) | Self::OnboardingComplete(s) => &s.identifier,
            Self::Form(s) => &s.identifier,
            Self::NavigationForm(s) => &s.form.identifier,
            Self::Subtask(s) => &s.identifier,
            Self::NavigationSubtask(s) => &s.subtask.identifier,
            Self::DataGroups(s) => &s.form.identifier,
            Self::Registration(s) | Self::Login(s) | Self::ExternalId(s) | Self::Profile(s) => {
                &s.form.identifier
            }
            Self::Permissions(s) => &s.identifier,
            Self::Passcode(s) => &s.identifier,
            Self::VisualConsent(s) => &s.identifier,
            Self::ConsentSharing(s) => &s.identifier,
            Self::ConsentReview(s) => &s.identifier,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Instruction(s) | Self::OnboardingComplete(s) => s.title.as_deref(),
            Self::Permissions(s) => s.title.as_deref(),
            Self::Passcode(s) => s.title.as_deref(),
            Self::ConsentSharing(s) => s.title.as_deref(),
            _ => self.form().and_then(|f| f.title.as_deref()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Instruction(s) | Self::OnboardingComplete(s) => s.text.as_deref(),
            Self::Permissions(s) => s.text.as_deref(),
            Self::Passcode(s) => s.text.as_deref(),
            Self::ConsentSharing(s) => s.text.as_deref(),
            _ => self.form().and_then(|f| f.text.as_deref()),
        }
    }

    /// The form part of form-like steps.
    pub fn form(&self) -> Option<&FormStep> {
        match self {
            Self::Form(s) => Some(s),
            Self::NavigationForm(s) => Some(&s.form),
            Self::DataGroups(s) => Some(&s.form),
            Self::Registration(s) | Self::Login(s) | Self::ExternalId(s) | Self::Profile(s) => {
                Some(&s.form)
            }
            _ => None,
        }
    }

    pub fn form_items(&self) -> &[FormItem] {
        self.form().map_or(&[], |f| f.form_items.as_slice())
    }

    /// Navigation rules of navigation-capable steps.
    pub fn navigation(&self) -> Option<&NavigationRules> {
        match self {
            Self::NavigationForm(s) => Some(&s.navigation),
            Self::NavigationSubtask(s) => Some(&s.navigation),
            Self::DataGroups(s) => Some(&s.navigation),
            _ => None,
        }
    }

    /// The nested task of a subtask step.
    pub fn subtask(&self) -> Option<&Task> {
        match self {
            Self::Subtask(s) => Some(&s.subtask),
            Self::NavigationSubtask(s) => Some(&s.subtask.subtask),
            _ => None,
        }
    }

    /// A direct jump target declared on the step.
    pub fn next_step_identifier(&self) -> Option<&str> {
        match self {
            Self::Instruction(s) | Self::OnboardingComplete(s) => s.next_step_identifier.as_deref(),
            _ => None,
        }
    }

    pub fn as_instruction(&self) -> Option<&InstructionStep> {
        match self {
            Self::Instruction(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_data_groups(&self) -> Option<&DataGroupsStep> {
        match self {
            Self::DataGroups(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the step kind for log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Instruction(_) => "Instruction",
            Self::Form(_) => "Form",
            Self::NavigationForm(_) => "NavigationForm",
            Self::Subtask(_) => "Subtask",
            Self::NavigationSubtask(_) => "NavigationSubtask",
            Self::DataGroups(_) => "DataGroups",
            Self::Registration(_) => "Registration",
            Self::Login(_) => "Login",
            Self::ExternalId(_) => "ExternalId",
            Self::Profile(_) => "Profile",
            Self::Permissions(_) => "Permissions",
            Self::OnboardingComplete(_) => "OnboardingComplete",
            Self::Passcode(_) => "Passcode",
            Self::VisualConsent(_) => "VisualConsent",
            Self::ConsentSharing(_) => "ConsentSharing",
            Self::ConsentReview(_) => "ConsentReview",
        }
    }
}
