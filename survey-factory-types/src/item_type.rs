use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of step a survey item describes.
///
/// Built from the item's `type` string by [`SurveyItemType::resolve`], which never
/// fails: strings it does not recognise become [`SurveyItemType::Custom`] so that
/// documents written for newer hosts still produce a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurveyItemType {
    Instruction(InstructionSubtype),
    Subtask,
    Form(FormSubtype),
    Account(AccountSubtype),
    Passcode(PasscodeType),
    Consent(ConsentSubtype),
    /// Data-group selection; the subtype picks the choice style when given.
    DataGroups(Option<FormSubtype>),
    /// Unrecognised type string, or `None` when the item had no type at all.
    Custom(Option<String>),
}

/// Instruction step flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionSubtype {
    Instruction,
    Completion,
}

/// Answer-shape categories for form items.
///
/// The answer-format builder and the rule builder both dispatch on this type,
/// so a subtype means the same answer shape in both places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormSubtype {
    /// Several independent form items in one step.
    Compound,
    /// Several boolean toggles in one step.
    Toggle,
    Boolean,
    SingleChoice,
    MultipleChoice,
    Text,
    MultipleLineText,
    Mood,
    Date,
    DateTime,
    Time,
    Duration,
    Integer,
    Decimal,
    Scale,
    ContinuousScale,
    TimingRange,
}

/// Account and onboarding step flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountSubtype {
    Registration,
    Login,
    EmailVerification,
    ExternalId,
    Permissions,
    Profile,
    Completion,
}

/// Passcode policy requested by a passcode item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasscodeType {
    FourDigit,
    SixDigit,
}

/// Consent step flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentSubtype {
    Visual,
    SharingOptions,
    Review,
}

impl InstructionSubtype {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "instruction" => Some(Self::Instruction),
            "completion" => Some(Self::Completion),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Instruction => "instruction",
            Self::Completion => "completion",
        }
    }
}

impl FormSubtype {
    /// Every subtype, in declaration order.
    pub const ALL: [FormSubtype; 17] = [
        Self::Compound,
        Self::Toggle,
        Self::Boolean,
        Self::SingleChoice,
        Self::MultipleChoice,
        Self::Text,
        Self::MultipleLineText,
        Self::Mood,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Duration,
        Self::Integer,
        Self::Decimal,
        Self::Scale,
        Self::ContinuousScale,
        Self::TimingRange,
    ];

    /// Look up a subtype by its canonical name or its short alias.
    pub fn from_key(key: &str) -> Option<Self> {
        let subtype = match key {
            "compound" => Self::Compound,
            "toggle" => Self::Toggle,
            "boolean" => Self::Boolean,
            "singleChoiceText" | "singleChoice" => Self::SingleChoice,
            "multipleChoiceText" | "multipleChoice" => Self::MultipleChoice,
            "textfield" | "text" => Self::Text,
            "multipleLineText" => Self::MultipleLineText,
            "moodScale" | "mood" => Self::Mood,
            "datePicker" | "date" => Self::Date,
            "timeAndDatePicker" | "dateTime" => Self::DateTime,
            "timePicker" | "time" => Self::Time,
            "timeInterval" | "duration" => Self::Duration,
            "numericInteger" | "integer" => Self::Integer,
            "numericDecimal" | "decimal" => Self::Decimal,
            "scaleInteger" | "scale" => Self::Scale,
            "continuousScale" => Self::ContinuousScale,
            "timingRange" => Self::TimingRange,
            _ => return None,
        };
        Some(subtype)
    }

    /// The canonical type string.
    pub fn key(self) -> &'static str {
        match self {
            Self::Compound => "compound",
            Self::Toggle => "toggle",
            Self::Boolean => "boolean",
            Self::SingleChoice => "singleChoiceText",
            Self::MultipleChoice => "multipleChoiceText",
            Self::Text => "textfield",
            Self::MultipleLineText => "multipleLineText",
            Self::Mood => "moodScale",
            Self::Date => "datePicker",
            Self::DateTime => "timeAndDatePicker",
            Self::Time => "timePicker",
            Self::Duration => "timeInterval",
            Self::Integer => "numericInteger",
            Self::Decimal => "numericDecimal",
            Self::Scale => "scaleInteger",
            Self::ContinuousScale => "continuousScale",
            Self::TimingRange => "timingRange",
        }
    }

    /// Compound and toggle items fan out their nested items instead of
    /// having an answer format of their own.
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Compound | Self::Toggle)
    }

    /// Subtypes whose answers are lists of choice values.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            Self::SingleChoice | Self::MultipleChoice | Self::TimingRange
        )
    }
}

impl AccountSubtype {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "registration" => Some(Self::Registration),
            "login" => Some(Self::Login),
            "emailVerification" => Some(Self::EmailVerification),
            "externalID" => Some(Self::ExternalId),
            "permissions" => Some(Self::Permissions),
            "profile" => Some(Self::Profile),
            "onboardingCompletion" => Some(Self::Completion),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Login => "login",
            Self::EmailVerification => "emailVerification",
            Self::ExternalId => "externalID",
            Self::Permissions => "permissions",
            Self::Profile => "profile",
            Self::Completion => "onboardingCompletion",
        }
    }
}

impl PasscodeType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "passcode" | "passcodeType4Digit" => Some(Self::FourDigit),
            "passcodeType6Digit" => Some(Self::SixDigit),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::FourDigit => "passcodeType4Digit",
            Self::SixDigit => "passcodeType6Digit",
        }
    }

    /// Number of digits in the passcode.
    pub fn digits(self) -> usize {
        match self {
            Self::FourDigit => 4,
            Self::SixDigit => 6,
        }
    }
}

impl ConsentSubtype {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "consentVisual" | "consent.visual" => Some(Self::Visual),
            "consentSharingOptions" | "consent.sharingOptions" => Some(Self::SharingOptions),
            "consentReview" | "consent.review" => Some(Self::Review),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Visual => "consentVisual",
            Self::SharingOptions => "consentSharingOptions",
            Self::Review => "consentReview",
        }
    }
}

const SUBTASK_KEY: &str = "subtask";
const DATA_GROUPS_KEY: &str = "dataGroups";

impl SurveyItemType {
    /// Map a type string to its item type. Total: unknown strings become `Custom`.
    pub fn resolve(type_string: &str) -> Self {
        if let Some(subtype) = InstructionSubtype::from_key(type_string) {
            Self::Instruction(subtype)
        } else if let Some(subtype) = FormSubtype::from_key(type_string) {
            Self::Form(subtype)
        } else if let Some(subtype) = ConsentSubtype::from_key(type_string) {
            Self::Consent(subtype)
        } else if let Some(subtype) = AccountSubtype::from_key(type_string) {
            Self::Account(subtype)
        } else if let Some(passcode) = PasscodeType::from_key(type_string) {
            Self::Passcode(passcode)
        } else if type_string == SUBTASK_KEY {
            Self::Subtask
        } else if type_string == DATA_GROUPS_KEY {
            Self::DataGroups(None)
        } else if let Some(subtype) = type_string
            .strip_prefix(DATA_GROUPS_KEY)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(FormSubtype::from_key)
        {
            Self::DataGroups(Some(subtype))
        } else {
            Self::Custom(Some(type_string.to_string()))
        }
    }

    /// Resolve an optional type string; a missing type is `Custom(None)`.
    pub fn from_optional(type_string: Option<&str>) -> Self {
        type_string.map_or(Self::Custom(None), Self::resolve)
    }

    pub fn form_subtype(&self) -> Option<FormSubtype> {
        match self {
            Self::Form(subtype) => Some(*subtype),
            _ => None,
        }
    }

    pub fn consent_subtype(&self) -> Option<ConsentSubtype> {
        match self {
            Self::Consent(subtype) => Some(*subtype),
            _ => None,
        }
    }

    pub fn account_subtype(&self) -> Option<AccountSubtype> {
        match self {
            Self::Account(subtype) => Some(*subtype),
            _ => None,
        }
    }

    /// The raw type string of a custom item.
    pub fn custom_type_identifier(&self) -> Option<&str> {
        match self {
            Self::Custom(name) => name.as_deref(),
            _ => None,
        }
    }

    /// True for items that declared no type at all.
    pub fn is_nil_type(&self) -> bool {
        matches!(self, Self::Custom(None))
    }

    /// The type string this item type is written as in a survey document.
    pub fn key(&self) -> String {
        match self {
            Self::Instruction(subtype) => subtype.key().to_string(),
            Self::Subtask => SUBTASK_KEY.to_string(),
            Self::Form(subtype) => subtype.key().to_string(),
            Self::Account(subtype) => subtype.key().to_string(),
            Self::Passcode(passcode) => passcode.key().to_string(),
            Self::Consent(subtype) => subtype.key().to_string(),
            Self::DataGroups(None) => DATA_GROUPS_KEY.to_string(),
            Self::DataGroups(Some(subtype)) => format!("{DATA_GROUPS_KEY}.{}", subtype.key()),
            Self::Custom(name) => name.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for SurveyItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl fmt::Display for FormSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for FormSubtype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for FormSubtype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown form subtype `{key}`")))
    }
}

impl Serialize for AccountSubtype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for AccountSubtype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown account subtype `{key}`")))
    }
}
