use serde_json::{Value, json};

/// A consent document with visual, sharing and review steps.
pub fn consent_survey() -> Value {
    json!({
        "documentProperties": { "htmlDocument": "consent_full" },
        "sections": [
            {
                "sectionType": "overview",
                "sectionTitle": "Welcome",
                "sectionSummary": "This study looks at how symptoms change over a day.",
                "sectionHtmlContent": "consent_overview",
            },
            {
                "sectionType": "dataGathering",
                "sectionTitle": "Data Gathering",
                "sectionSummary": "The app collects survey answers and activity results.",
                "sectionImage": "consent_data",
            },
            {
                "sectionType": "withdrawing",
                "sectionTitle": "Withdrawing",
                "sectionSummary": "You can leave the study at any time.",
            },
            {
                "sectionType": "onlyInDocument",
                "sectionTitle": "Risks",
                "sectionContent": "There are no known risks.",
            },
        ],
        "steps": [
            { "identifier": "consentVisual", "type": "consentVisual" },
            { "identifier": "consentQuiz", "type": "compound", "items": [
                { "identifier": "withdraw", "type": "boolean", "text": "I can withdraw at any time.", "expectedAnswer": true },
            ], "skipIdentifier": "consentVisual" },
            {
                "identifier": "consentSharingOptions",
                "type": "consentSharingOptions",
                "investigatorShortDescription": "Sage Bionetworks",
                "investigatorLongDescription": "Sage Bionetworks and its partners",
                "learnMoreHTMLContentURL": "consent_sharing",
            },
            { "identifier": "consentReview", "type": "consentReview" },
        ],
    })
}
