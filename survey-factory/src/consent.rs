//! The consent document and the steps that present it.

use serde_json::{Map, Value};
use survey_factory_types::{
    ConsentDocument, ConsentPage, ConsentReviewStep, ConsentSection, ConsentSectionType,
    ConsentSharingStep, ConsentSignature, ConsentSubtype, LearnMoreAction, Step, SurveyItem,
    TextChoice, TextChoiceAnswerFormat, VisualConsentStep, keys,
};

use crate::choices::create_text_choices;
use crate::config::FactoryConfig;
use crate::factory::StepFactory;

const SECTIONS: &str = "sections";
const SECTION_TYPE: &str = "sectionType";
const SECTION_TITLE: &str = "sectionTitle";
const SECTION_SUMMARY: &str = "sectionSummary";
const SECTION_CONTENT: &str = "sectionContent";
const SECTION_HTML_CONTENT: &str = "sectionHtmlContent";
const SECTION_IMAGE: &str = "sectionImage";
const DOCUMENT_PROPERTIES: &str = "documentProperties";
const HTML_DOCUMENT: &str = "htmlDocument";

const INVESTIGATOR_SHORT_DESCRIPTION: &str = "investigatorShortDescription";
const INVESTIGATOR_LONG_DESCRIPTION: &str = "investigatorLongDescription";

/// Identifier of the participant's signature.
pub const PARTICIPANT_SIGNATURE: &str = "participant";

/// A document with no sections, titled from the config and signed by the
/// participant.
pub fn default_consent_document(config: &FactoryConfig) -> ConsentDocument {
    ConsentDocument {
        title: config.consent_title.clone(),
        signature_page_title: config.consent_title.clone(),
        signature_page_content: config.consent_signature_content.clone(),
        sections: Vec::new(),
        signatures: vec![ConsentSignature {
            identifier: PARTICIPANT_SIGNATURE.to_string(),
            title: config.consent_person_title.clone(),
        }],
        html_review_content: None,
    }
}

fn create_consent_section<F>(factory: &F, object: &Map<String, Value>) -> ConsentSection
where
    F: StepFactory + ?Sized,
{
    let field = |key: &str| object.get(key).and_then(Value::as_str);
    let resources = factory.resources();
    ConsentSection {
        section_type: field(SECTION_TYPE).map_or(ConsentSectionType::Custom, ConsentSectionType::from_key),
        title: field(SECTION_TITLE).map(str::to_string),
        summary: field(SECTION_SUMMARY).map(str::to_string),
        content: field(SECTION_CONTENT).map(str::to_string),
        html_content: field(SECTION_HTML_CONTENT).and_then(|name| resources.html(name)),
        image: field(SECTION_IMAGE).and_then(|name| resources.image(name)),
    }
}

/// Read the consent `sections` and `documentProperties` of a document.
///
/// The HTML of an `onlyInDocument` section, or the document's own
/// `htmlDocument`, replaces the sections in the review step.
pub fn create_consent_document<F>(factory: &F, document: &Value) -> ConsentDocument
where
    F: StepFactory + ?Sized,
{
    let mut consent = default_consent_document(factory.config());
    consent.sections = document
        .get(SECTIONS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_object)
        .map(|object| create_consent_section(factory, object))
        .collect();

    consent.html_review_content = consent
        .sections
        .iter()
        .filter(|section| section.is_only_in_document())
        .find_map(|section| section.html_content.clone());

    if let Some(html) = document
        .get(DOCUMENT_PROPERTIES)
        .and_then(|properties| properties.get(HTML_DOCUMENT))
        .and_then(Value::as_str)
        .and_then(|name| factory.resources().html(name))
    {
        consent.html_review_content = Some(html);
    }

    tracing::debug!(
        sections = consent.sections.len(),
        html_review = consent.html_review_content.is_some(),
        "loaded consent document"
    );
    consent
}

/// One page per section shown in the visual flow.
pub fn create_visual_consent_step(identifier: &str, document: &ConsentDocument) -> VisualConsentStep {
    let pages = document
        .visual_sections()
        .enumerate()
        .map(|(index, section)| {
            let page_identifier = section
                .title
                .clone()
                .unwrap_or_else(|| format!("consentSection{}", index + 1));
            ConsentPage {
                learn_more_action: section
                    .html_content
                    .as_ref()
                    .map(|url| LearnMoreAction::url(page_identifier.clone(), url.clone())),
                identifier: page_identifier,
                section_type: section.section_type,
                title: section.title.clone(),
                text: section.summary.clone(),
                image: section.image.clone(),
            }
        })
        .collect();
    VisualConsentStep {
        identifier: identifier.to_string(),
        pages,
    }
}

/// The data-sharing question.
///
/// The default text and choices name the investigator. Item text is
/// appended after a blank line; item entries replace the choices.
pub fn create_sharing_step<F>(factory: &F, item: &SurveyItem) -> ConsentSharingStep
where
    F: StepFactory + ?Sized,
{
    let config = factory.config();
    let short = item.string(INVESTIGATOR_SHORT_DESCRIPTION).unwrap_or_default();
    let long = item.string(INVESTIGATOR_LONG_DESCRIPTION).unwrap_or_default();

    let mut text = config.sharing_text.replace("{long}", long);
    if let Some(additional) = item.text() {
        text.push_str("\n\n");
        text.push_str(additional);
    }

    let choices = create_text_choices(factory, item).unwrap_or_else(|| {
        vec![
            TextChoice::new(config.sharing_broadly_choice.replace("{short}", short), true),
            TextChoice::new(config.sharing_narrowly_choice.replace("{long}", long), false),
        ]
    });

    ConsentSharingStep {
        identifier: item.identifier().to_string(),
        title: Some(item.title().unwrap_or(&config.sharing_title).to_string()),
        text: Some(text),
        answer_format: TextChoiceAnswerFormat::single(choices),
        learn_more_html_content: item
            .string(keys::LEARN_MORE_HTML_CONTENT_URL)
            .and_then(|name| factory.resources().html(name)),
    }
}

/// The signature step, tied to the document's first signature.
pub fn create_review_step(
    identifier: &str,
    document: &ConsentDocument,
    config: &FactoryConfig,
) -> ConsentReviewStep {
    ConsentReviewStep {
        identifier: identifier.to_string(),
        signature: document.first_signature().cloned(),
        document: document.clone(),
        reason_for_consent: Some(config.consent_signature_content.clone()),
    }
}

pub fn create_consent_step<F>(factory: &F, item: &SurveyItem, subtype: ConsentSubtype) -> Step
where
    F: StepFactory + ?Sized,
{
    let document = factory.consent_document();
    match subtype {
        ConsentSubtype::Visual => {
            Step::VisualConsent(create_visual_consent_step(item.identifier(), document))
        }
        ConsentSubtype::SharingOptions => Step::ConsentSharing(create_sharing_step(factory, item)),
        ConsentSubtype::Review => Step::ConsentReview(create_review_step(
            item.identifier(),
            document,
            factory.config(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{DefaultStepFactory, StepContext};
    use serde_json::json;

    fn consent_factory() -> DefaultStepFactory {
        DefaultStepFactory::from_document(&json!({
            "sections": [
                { "sectionType": "overview", "sectionTitle": "Welcome", "sectionSummary": "About the study", "sectionHtmlContent": "overview" },
                { "sectionType": "privacy", "sectionTitle": "Privacy", "sectionSummary": "Your data" },
                { "sectionType": "onlyInDocument", "sectionTitle": "Full text", "sectionHtmlContent": "fullConsent" },
            ],
            "steps": [
                { "identifier": "consentVisual", "type": "consentVisual" },
                {
                    "identifier": "consentSharing",
                    "type": "consentSharingOptions",
                    "investigatorShortDescription": "Sage",
                    "investigatorLongDescription": "Sage Bionetworks",
                    "text": "Extra words.",
                },
                { "identifier": "consentReview", "type": "consentReview" },
            ],
        }))
        .unwrap()
    }

    #[test]
    fn document_sections_and_review_html() {
        let factory = consent_factory();
        let document = factory.consent_document();
        assert_eq!(document.sections.len(), 3);
        assert_eq!(document.html_review_content.as_deref(), Some("fullConsent"));
        assert_eq!(document.first_signature().unwrap().identifier, "participant");
    }

    #[test]
    fn visual_step_skips_document_only_sections() {
        let factory = consent_factory();
        let Step::VisualConsent(visual) = &factory.steps()[0] else {
            panic!("expected a visual consent step");
        };
        let ids: Vec<&str> = visual.pages.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, ["Welcome", "Privacy"]);
        assert_eq!(visual.pages[0].text.as_deref(), Some("About the study"));
        assert!(visual.pages[0].learn_more_action.is_some());
        assert!(visual.pages[1].learn_more_action.is_none());
    }

    #[test]
    fn sharing_step_text_and_choices() {
        let factory = consent_factory();
        let Step::ConsentSharing(sharing) = &factory.steps()[1] else {
            panic!("expected a sharing step");
        };
        let text = sharing.text.as_deref().unwrap();
        assert!(text.starts_with("Sage Bionetworks will receive"));
        assert!(text.ends_with("\n\nExtra words."));
        let choices = &sharing.answer_format.choices;
        assert_eq!(choices[0].value, json!(true));
        assert!(choices[0].text.contains("Sage and qualified researchers"));
        assert_eq!(choices[1].text, "Only share my data with Sage Bionetworks");
    }

    #[test]
    fn sharing_items_replace_choices() {
        let factory = DefaultStepFactory::default();
        let item = SurveyItem::from_value(&json!({
            "identifier": "sharing",
            "type": "consent.sharingOptions",
            "items": [ { "text": "Yes", "value": "yes" }, { "text": "No", "value": "no" } ],
        }))
        .unwrap();
        let step = factory.create_step(&item, StepContext::default()).unwrap();
        let Step::ConsentSharing(sharing) = step else {
            panic!("expected a sharing step");
        };
        let values: Vec<&Value> = sharing.answer_format.choices.iter().map(|c| &c.value).collect();
        assert_eq!(values, [&json!("yes"), &json!("no")]);
    }

    #[test]
    fn review_uses_first_signature() {
        let factory = consent_factory();
        let Step::ConsentReview(review) = &factory.steps()[2] else {
            panic!("expected a review step");
        };
        assert_eq!(review.signature.as_ref().unwrap().title, "Participant");
        assert_eq!(
            review.reason_for_consent.as_deref(),
            Some(factory.config().consent_signature_content.as_str())
        );
    }

    #[test]
    fn document_html_overrides_section_html() {
        let factory = DefaultStepFactory::default();
        let document = create_consent_document(
            &factory,
            &json!({
                "sections": [ { "sectionType": "onlyInDocument", "sectionHtmlContent": "a" } ],
                "documentProperties": { "htmlDocument": "b" },
            }),
        );
        assert_eq!(document.html_review_content.as_deref(), Some("b"));
    }
}
