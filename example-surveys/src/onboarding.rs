use serde_json::{Value, json};

/// Account creation and study setup.
pub fn onboarding() -> Value {
    json!({
        "steps": [
            {
                "identifier": "registration",
                "type": "registration",
                "title": "Create an account",
                "items": [
                    "email",
                    { "identifier": "password", "minimumLength": 10, "shouldConfirm": true },
                    "given",
                    "family",
                    "birthdate",
                ],
            },
            { "identifier": "emailVerification", "type": "emailVerification", "title": "Check your email" },
            {
                "identifier": "permissions",
                "type": "permissions",
                "title": "Permissions",
                "items": ["notifications", "location", "motion"],
            },
            {
                "identifier": "profile",
                "type": "profile",
                "items": [
                    "gender",
                    "height",
                    "weight",
                    "wakeTime",
                    { "identifier": "favoriteColor", "type": "textfield", "text": "Favorite color" },
                ],
            },
            { "identifier": "passcode", "type": "passcodeType6Digit", "title": "Set a passcode" },
            { "identifier": "onboardingCompletion", "type": "onboardingCompletion", "title": "Welcome aboard" },
        ],
    })
}

/// Sign in to an existing account.
pub fn login() -> Value {
    json!({
        "steps": [
            { "identifier": "login", "type": "login" },
            { "identifier": "externalID", "type": "externalID", "title": "Enter your participant ID" },
        ],
    })
}
