//! Account, profile and passcode steps.

use std::collections::HashMap;

use serde_json::{Map, Value};
use survey_factory_types::{
    AccountSubtype, AnswerFormat, Autocapitalization, DateAnswerFormat, DateStyle, FormItem,
    FormStep, HealthCharacteristic, InstructionSubtype, KeyboardType, MeasurementKind,
    NumericAnswerFormat, NumericStyle, PASSWORD_CONFIRMATION_IDENTIFIER, PasscodeStep,
    PasscodeType, PermissionsStep, ProfileFormStep, ProfileInfoOption, Step, SurveyItem, keys,
};

use crate::defect::BuildDefect;
use crate::factory::StepFactory;
use crate::forms::map_step_values;
use crate::instruction::create_instruction_step;
use crate::text_field::{SHOULD_CONFIRM, TextFieldOptions};

/// The profile fields an account item asks for.
///
/// `items` entries may name an option (`"email"`), describe one with extra
/// settings (`{ "identifier": "password", "validationRegex": ... }`) or
/// describe an ordinary question, which is built through the factory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileInfoOptions {
    pub includes: Vec<ProfileInfoOption>,
    /// Settings given alongside an option.
    pub extended: HashMap<ProfileInfoOption, Map<String, Value>>,
    /// Entries that name no option.
    pub custom_items: Vec<Value>,
    /// Login forms never validate or confirm the password.
    pub is_login: bool,
}

impl ProfileInfoOptions {
    /// Read the options of an item, using `defaults` when it names none.
    pub fn from_item<F>(factory: &F, item: &SurveyItem, defaults: &[ProfileInfoOption]) -> Self
    where
        F: StepFactory + ?Sized,
    {
        let mut options = Self::default();
        for (index, entry) in item.items().unwrap_or_default().iter().enumerate() {
            match entry {
                Value::String(key) => match ProfileInfoOption::from_key(key) {
                    Some(option) => options.includes.push(option),
                    None => factory.report_defect(
                        item.identifier(),
                        BuildDefect::InvalidItem {
                            index,
                            message: format!("unknown profile option `{key}`"),
                        },
                    ),
                },
                Value::Object(object) => {
                    let option = object
                        .get(keys::IDENTIFIER)
                        .and_then(Value::as_str)
                        .and_then(ProfileInfoOption::from_key);
                    match option {
                        Some(option) => {
                            options.includes.push(option);
                            options.extended.insert(option, object.clone());
                        }
                        None => options.custom_items.push(entry.clone()),
                    }
                }
                _ => factory.report_defect(
                    item.identifier(),
                    BuildDefect::InvalidItem {
                        index,
                        message: "profile items must be strings or objects".to_string(),
                    },
                ),
            }
        }
        if options.includes.is_empty() {
            options.includes = defaults.to_vec();
        }
        options.is_login = item.survey_item_type().account_subtype() == Some(AccountSubtype::Login);
        options
    }

    fn extended_str(&self, option: ProfileInfoOption, key: &str) -> Option<&str> {
        self.extended.get(&option)?.get(key)?.as_str()
    }

    fn extended_usize(&self, option: ProfileInfoOption, key: &str) -> Option<usize> {
        self.extended
            .get(&option)?
            .get(key)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Text settings of the password field.
    ///
    /// A custom pattern needs both a regex and a message; otherwise the
    /// length-based default pattern applies. Confirmation is on by default.
    pub fn password_options<F>(&self, factory: &F) -> TextFieldOptions
    where
        F: StepFactory + ?Sized,
    {
        if self.is_login {
            return TextFieldOptions {
                secure_text_entry: true,
                ..TextFieldOptions::default()
            };
        }

        let config = factory.config();
        let option = ProfileInfoOption::Password;
        let (validation_regex, invalid_message) = match (
            self.extended_str(option, keys::VALIDATION_REGEX),
            self.extended_str(option, keys::INVALID_MESSAGE),
        ) {
            (Some(regex), Some(message)) => (Some(regex.to_string()), Some(message.to_string())),
            _ => (None, None),
        };
        TextFieldOptions {
            validation_regex,
            invalid_message,
            minimum_length: self
                .extended_usize(option, keys::MINIMUM_LENGTH)
                .unwrap_or(config.password_min_length),
            maximum_length: self
                .extended_usize(option, keys::MAXIMUM_LENGTH)
                .unwrap_or(config.password_max_length),
            secure_text_entry: true,
            should_confirm: self
                .extended
                .get(&option)
                .and_then(|object| object.get(SHOULD_CONFIRM))
                .and_then(Value::as_bool)
                .unwrap_or(true),
            ..TextFieldOptions::default()
        }
    }

    fn external_id_options(&self) -> TextFieldOptions {
        let option = ProfileInfoOption::ExternalId;
        TextFieldOptions {
            autocapitalization: self
                .extended_str(option, keys::AUTOCAPITALIZATION_TYPE)
                .map_or(Autocapitalization::AllCharacters, Autocapitalization::from_key),
            keyboard: self
                .extended_str(option, keys::KEYBOARD_TYPE)
                .map_or(KeyboardType::AsciiCapable, KeyboardType::from_key),
            ..TextFieldOptions::default()
        }
    }

    /// One form item per option, in order, then the custom items.
    pub fn make_form_items<F>(&self, factory: &F, owner: &str) -> Vec<FormItem>
    where
        F: StepFactory + ?Sized,
    {
        let text = &factory.config().profile;
        let mut form_items = Vec::new();

        for &option in &self.includes {
            let key = option.key();
            let field = |title: &str, format: AnswerFormat| {
                FormItem::new(key, Some(title.to_string()), Some(format))
            };
            let text_format = |options: &TextFieldOptions| {
                AnswerFormat::Text(options.answer_format(factory, owner, false))
            };

            let item = match option {
                ProfileInfoOption::Email => field(&text.email_title, AnswerFormat::Email)
                    .with_placeholder(Some(text.email_placeholder.clone())),
                ProfileInfoOption::Password => {
                    let options = self.password_options(factory);
                    let password = field(&text.password_title, text_format(&options))
                        .with_placeholder(Some(text.password_placeholder.clone()));
                    if options.should_confirm {
                        let confirm = password
                            .confirmation(
                                PASSWORD_CONFIRMATION_IDENTIFIER,
                                Some(text.confirm_password_title.clone()),
                            )
                            .with_placeholder(Some(text.confirm_password_placeholder.clone()));
                        form_items.push(password);
                        confirm
                    } else {
                        password
                    }
                }
                ProfileInfoOption::ExternalId => {
                    field(&text.external_id_title, text_format(&self.external_id_options()))
                        .with_placeholder(Some(text.external_id_placeholder.clone()))
                }
                ProfileInfoOption::FullName
                | ProfileInfoOption::GivenName
                | ProfileInfoOption::FamilyName => {
                    let words = TextFieldOptions {
                        autocapitalization: Autocapitalization::Words,
                        ..TextFieldOptions::default()
                    };
                    let (title, placeholder) = match option {
                        ProfileInfoOption::FullName => {
                            (&text.full_name_title, &text.full_name_placeholder)
                        }
                        ProfileInfoOption::GivenName => {
                            (&text.given_name_title, &text.name_placeholder)
                        }
                        _ => (&text.family_name_title, &text.name_placeholder),
                    };
                    field(title, text_format(&words)).with_placeholder(Some(placeholder.clone()))
                }
                ProfileInfoOption::Birthdate => field(
                    &text.birthdate_title,
                    AnswerFormat::Date(DateAnswerFormat::new(DateStyle::Date)),
                ),
                ProfileInfoOption::CurrentAge => field(
                    &text.current_age_title,
                    AnswerFormat::Numeric(NumericAnswerFormat::new(NumericStyle::Integer)),
                ),
                ProfileInfoOption::Gender => field(
                    &text.gender_title,
                    AnswerFormat::HealthCharacteristic {
                        characteristic: HealthCharacteristic::BiologicalSex,
                    },
                ),
                ProfileInfoOption::BloodType => field(
                    &text.blood_type_title,
                    AnswerFormat::HealthCharacteristic {
                        characteristic: HealthCharacteristic::BloodType,
                    },
                ),
                ProfileInfoOption::FitzpatrickSkinType => field(
                    &text.fitzpatrick_skin_type_title,
                    AnswerFormat::HealthCharacteristic {
                        characteristic: HealthCharacteristic::FitzpatrickSkinType,
                    },
                ),
                ProfileInfoOption::WheelchairUse => field(
                    &text.wheelchair_use_title,
                    AnswerFormat::HealthCharacteristic {
                        characteristic: HealthCharacteristic::WheelchairUse,
                    },
                ),
                ProfileInfoOption::Height => field(
                    &text.height_title,
                    AnswerFormat::Measurement {
                        kind: MeasurementKind::Height,
                    },
                ),
                ProfileInfoOption::Weight => field(
                    &text.weight_title,
                    AnswerFormat::Measurement {
                        kind: MeasurementKind::Weight,
                    },
                ),
                ProfileInfoOption::WakeTime => field(&text.wake_time_title, AnswerFormat::TimeOfDay),
                ProfileInfoOption::SleepTime => {
                    field(&text.sleep_time_title, AnswerFormat::TimeOfDay)
                }
            };
            form_items.push(item);
        }

        for (index, entry) in self.custom_items.iter().enumerate() {
            match SurveyItem::from_value(entry) {
                Ok(custom) => form_items.push(factory.create_form_item(&custom, None)),
                Err(err) => factory.report_defect(
                    owner,
                    BuildDefect::InvalidItem {
                        index,
                        message: err.to_string(),
                    },
                ),
            }
        }
        form_items
    }
}

fn profile_form_step<F>(
    factory: &F,
    item: &SurveyItem,
    defaults: &[ProfileInfoOption],
) -> ProfileFormStep
where
    F: StepFactory + ?Sized,
{
    let options = ProfileInfoOptions::from_item(factory, item, defaults);
    let mut form = FormStep::new(item.identifier());
    map_step_values(&mut form, item);
    form.form_items = options.make_form_items(factory, item.identifier());
    ProfileFormStep {
        form,
        options: options.includes,
    }
}

/// Names of the permissions requested by a permissions item.
fn permission_names(item: &SurveyItem) -> Vec<String> {
    item.items()
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name.clone()),
            Value::Object(object) => object
                .get(keys::IDENTIFIER)
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}

/// Build an account step. Each subtype has its own step kind.
pub fn create_account_step<F>(factory: &F, item: &SurveyItem, subtype: AccountSubtype) -> Step
where
    F: StepFactory + ?Sized,
{
    use ProfileInfoOption::{Email, ExternalId, Password};

    match subtype {
        AccountSubtype::Registration => {
            Step::Registration(profile_form_step(factory, item, &[Email, Password]))
        }
        AccountSubtype::Login => Step::Login(profile_form_step(factory, item, &[Email, Password])),
        AccountSubtype::ExternalId => {
            Step::ExternalId(profile_form_step(factory, item, &[ExternalId]))
        }
        AccountSubtype::Profile => Step::Profile(profile_form_step(factory, item, &[])),
        AccountSubtype::Permissions => Step::Permissions(PermissionsStep {
            identifier: item.identifier().to_string(),
            title: item.title().map(|s| s.trim().to_string()),
            text: item.text().map(|s| s.trim().to_string()),
            permissions: permission_names(item),
        }),
        AccountSubtype::EmailVerification => {
            let mut step = create_instruction_step(factory, item, InstructionSubtype::Instruction);
            step.custom_type_identifier = Some(subtype.key().to_string());
            Step::Instruction(step)
        }
        AccountSubtype::Completion => Step::OnboardingComplete(create_instruction_step(
            factory,
            item,
            InstructionSubtype::Completion,
        )),
    }
}

pub fn create_passcode_step<F>(_factory: &F, item: &SurveyItem, passcode: PasscodeType) -> Step
where
    F: StepFactory + ?Sized,
{
    Step::Passcode(PasscodeStep {
        identifier: item.identifier().to_string(),
        title: item.title().map(|s| s.trim().to_string()),
        text: item.text().map(|s| s.trim().to_string()),
        passcode_type: passcode,
    })
}
