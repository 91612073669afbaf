use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A "Learn more" button attached to an instruction or form step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnMoreAction {
    pub identifier: String,

    /// Overrides the host's default button title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    #[serde(flatten)]
    pub kind: LearnMoreKind,
}

/// What pressing the button does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "camelCase")]
pub enum LearnMoreKind {
    /// Open an HTML page.
    Url { url: String },
    /// Show a text alert.
    PopUp { text: String },
    /// Host-defined action, kept as its source object.
    Custom { object: Map<String, Value> },
}

impl LearnMoreAction {
    pub fn url(identifier: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            button_text: None,
            kind: LearnMoreKind::Url { url: url.into() },
        }
    }

    pub fn pop_up(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            button_text: None,
            kind: LearnMoreKind::PopUp { text: text.into() },
        }
    }

    pub fn custom(identifier: impl Into<String>, object: Map<String, Value>) -> Self {
        Self {
            identifier: identifier.into(),
            button_text: None,
            kind: LearnMoreKind::Custom { object },
        }
    }

    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattened_kind_tag() {
        let action = LearnMoreAction::pop_up("learnMoreAlertText", "Copyright 2016")
            .with_button_text("Copyright");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "identifier": "learnMoreAlertText",
                "buttonText": "Copyright",
                "actionType": "popUp",
                "text": "Copyright 2016"
            })
        );
    }
}
