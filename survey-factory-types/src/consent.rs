use serde::{Deserialize, Serialize};

/// The role a consent section plays in the visual consent flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsentSectionType {
    Overview,
    DataGathering,
    Privacy,
    DataUse,
    TimeCommitment,
    StudySurvey,
    StudyTasks,
    Withdrawing,
    #[default]
    Custom,
    /// Only shown in the review document, never as a visual page.
    OnlyInDocument,
}

impl ConsentSectionType {
    /// Unknown names are `Custom`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "overview" => Self::Overview,
            "dataGathering" => Self::DataGathering,
            "privacy" => Self::Privacy,
            "dataUse" => Self::DataUse,
            "timeCommitment" => Self::TimeCommitment,
            "studySurvey" => Self::StudySurvey,
            "studyTasks" => Self::StudyTasks,
            "withdrawing" => Self::Withdrawing,
            "onlyInDocument" => Self::OnlyInDocument,
            _ => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSection {
    pub section_type: ConsentSectionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Resolved HTML resource for the section's learn-more page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ConsentSection {
    pub fn new(section_type: ConsentSectionType) -> Self {
        Self {
            section_type,
            ..Self::default()
        }
    }

    pub fn is_only_in_document(&self) -> bool {
        self.section_type == ConsentSectionType::OnlyInDocument
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSignature {
    pub identifier: String,
    pub title: String,
}

/// The document shown by the visual consent and review steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDocument {
    pub title: String,
    pub signature_page_title: String,
    pub signature_page_content: String,
    pub sections: Vec<ConsentSection>,
    pub signatures: Vec<ConsentSignature>,

    /// Full HTML used in place of the sections during review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_review_content: Option<String>,
}

impl ConsentDocument {
    pub fn first_signature(&self) -> Option<&ConsentSignature> {
        self.signatures.first()
    }

    /// Sections shown as pages of the visual consent step.
    pub fn visual_sections(&self) -> impl Iterator<Item = &ConsentSection> {
        self.sections.iter().filter(|s| !s.is_only_in_document())
    }
}
