use serde::{Deserialize, Serialize};

/// English defaults the factory falls back to when a document leaves text out.
///
/// Every field has a default, so a partial JSON config only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactoryConfig {
    /// Label of the choice appended to every timing-range question.
    pub not_sure_text: String,

    /// Text-field message template; `{min}` and `{max}` are substituted.
    pub invalid_length_message: String,

    pub consent_title: String,
    pub consent_signature_content: String,
    pub consent_person_title: String,

    pub sharing_title: String,
    /// `{long}` is the investigator's long description.
    pub sharing_text: String,
    /// `{short}` is the investigator's short description.
    pub sharing_broadly_choice: String,
    /// `{long}` is the investigator's long description.
    pub sharing_narrowly_choice: String,

    pub password_min_length: usize,
    pub password_max_length: usize,

    /// Button title of the pop-up built from a completion step's detail text.
    pub copyright_title: String,

    pub profile: ProfileText,
}

/// Labels and placeholders of the built-in profile form items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileText {
    pub email_title: String,
    pub email_placeholder: String,
    pub password_title: String,
    pub password_placeholder: String,
    pub confirm_password_title: String,
    pub confirm_password_placeholder: String,
    pub external_id_title: String,
    pub external_id_placeholder: String,
    pub full_name_title: String,
    pub full_name_placeholder: String,
    pub given_name_title: String,
    pub family_name_title: String,
    pub name_placeholder: String,
    pub birthdate_title: String,
    pub current_age_title: String,
    pub gender_title: String,
    pub blood_type_title: String,
    pub fitzpatrick_skin_type_title: String,
    pub wheelchair_use_title: String,
    pub height_title: String,
    pub weight_title: String,
    pub wake_time_title: String,
    pub sleep_time_title: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            not_sure_text: "Not sure".to_string(),
            invalid_length_message: "Must be between {min} and {max} characters".to_string(),
            consent_title: "Consent".to_string(),
            consent_signature_content: "By agreeing you confirm that you read the consent and \
                                        that you wish to take part in this research study."
                .to_string(),
            consent_person_title: "Participant".to_string(),
            sharing_title: "Sharing Options".to_string(),
            sharing_text: "{long} will receive your study data from your participation in this \
                           study.\n\nSharing your coded study data more broadly (without \
                           information such as your name) may benefit this and future research."
                .to_string(),
            sharing_broadly_choice:
                "Share my data with {short} and qualified researchers worldwide".to_string(),
            sharing_narrowly_choice: "Only share my data with {long}".to_string(),
            password_min_length: 8,
            password_max_length: 24,
            copyright_title: "Copyright".to_string(),
            profile: ProfileText::default(),
        }
    }
}

impl Default for ProfileText {
    fn default() -> Self {
        Self {
            email_title: "Email".to_string(),
            email_placeholder: "jappleseed@example.com".to_string(),
            password_title: "Password".to_string(),
            password_placeholder: "Enter password".to_string(),
            confirm_password_title: "Confirm".to_string(),
            confirm_password_placeholder: "Enter password again".to_string(),
            external_id_title: "Participant ID".to_string(),
            external_id_placeholder: "Enter participant ID".to_string(),
            full_name_title: "Full Name".to_string(),
            full_name_placeholder: "Enter full name".to_string(),
            given_name_title: "First Name".to_string(),
            family_name_title: "Last Name".to_string(),
            name_placeholder: "Required".to_string(),
            birthdate_title: "Date of Birth".to_string(),
            current_age_title: "Age".to_string(),
            gender_title: "Gender".to_string(),
            blood_type_title: "Blood Type".to_string(),
            fitzpatrick_skin_type_title: "Skin Type".to_string(),
            wheelchair_use_title: "Use a wheelchair?".to_string(),
            height_title: "Height".to_string(),
            weight_title: "Weight".to_string(),
            wake_time_title: "What time do you usually wake up?".to_string(),
            sleep_time_title: "What time do you usually go to sleep?".to_string(),
        }
    }
}

impl FactoryConfig {
    /// Load from a JSON string, filling in every missing field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The invalid-length message for the given bounds.
    pub fn invalid_length_message(&self, min: usize, max: usize) -> String {
        self.invalid_length_message
            .replace("{min}", &min.to_string())
            .replace("{max}", &max.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FactoryConfig::from_json(r#"{ "notSureText": "Unsure" }"#).unwrap();
        assert_eq!(config.not_sure_text, "Unsure");
        assert_eq!(config.password_min_length, 8);
        assert_eq!(config.password_max_length, 24);
        assert_eq!(config.profile.email_title, "Email");
    }

    #[test]
    fn invalid_length_message_substitutes_bounds() {
        assert_eq!(
            FactoryConfig::default().invalid_length_message(8, 24),
            "Must be between 8 and 24 characters"
        );
    }
}
