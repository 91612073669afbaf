use serde::{Deserialize, Serialize};

/// Account and demographic fields a profile form can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileInfoOption {
    Email,
    Password,
    #[serde(rename = "externalID")]
    ExternalId,
    #[serde(rename = "name")]
    FullName,
    #[serde(rename = "given")]
    GivenName,
    #[serde(rename = "family")]
    FamilyName,
    Birthdate,
    CurrentAge,
    Gender,
    BloodType,
    FitzpatrickSkinType,
    WheelchairUse,
    Height,
    Weight,
    WakeTime,
    SleepTime,
}

impl ProfileInfoOption {
    pub fn from_key(key: &str) -> Option<Self> {
        let option = match key {
            "email" => Self::Email,
            "password" => Self::Password,
            "externalID" => Self::ExternalId,
            "name" => Self::FullName,
            "given" => Self::GivenName,
            "family" => Self::FamilyName,
            "birthdate" => Self::Birthdate,
            "currentAge" => Self::CurrentAge,
            "gender" => Self::Gender,
            "bloodType" => Self::BloodType,
            "fitzpatrickSkinType" => Self::FitzpatrickSkinType,
            "wheelchairUse" => Self::WheelchairUse,
            "height" => Self::Height,
            "weight" => Self::Weight,
            "wakeTime" => Self::WakeTime,
            "sleepTime" => Self::SleepTime,
            _ => return None,
        };
        Some(option)
    }

    /// The form item identifier used for this option.
    pub fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ExternalId => "externalID",
            Self::FullName => "name",
            Self::GivenName => "given",
            Self::FamilyName => "family",
            Self::Birthdate => "birthdate",
            Self::CurrentAge => "currentAge",
            Self::Gender => "gender",
            Self::BloodType => "bloodType",
            Self::FitzpatrickSkinType => "fitzpatrickSkinType",
            Self::WheelchairUse => "wheelchairUse",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::WakeTime => "wakeTime",
            Self::SleepTime => "sleepTime",
        }
    }
}

/// Identifier of the form item that repeats the password.
pub const PASSWORD_CONFIRMATION_IDENTIFIER: &str = "passwordConfirmation";
