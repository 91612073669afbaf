use serde_json::{Value, json};

/// One question for every answer format.
pub fn answer_formats() -> Value {
    json!({
        "steps": [
            { "identifier": "name", "type": "textfield", "text": "What is your name?", "placeholder": "Jane Doe" },
            {
                "identifier": "nickname",
                "type": "text",
                "text": "Pick a nickname",
                "minimumLength": 3,
                "maximumLength": 12,
                "autocapitalizationType": "none",
                "keyboardType": "asciiCapable",
            },
            {
                "identifier": "zipCode",
                "type": "textfield",
                "text": "Zip code",
                "validationRegex": "^[0-9]{5}$",
                "invalidMessage": "Enter five digits",
                "keyboardType": "numberPad",
            },
            { "identifier": "notes", "type": "multipleLineText", "text": "Anything else?", "optional": true },
            { "identifier": "diagnosed", "type": "datePicker", "text": "When were you diagnosed?", "minDate": "1950-01-01", "maxDate": "2020-12-31" },
            { "identifier": "lastDose", "type": "timeAndDatePicker", "text": "When did you last take medication?" },
            { "identifier": "bedtime", "type": "timePicker", "text": "When do you go to bed?" },
            { "identifier": "walk", "type": "timeInterval", "text": "How long did you walk today?" },
            { "identifier": "steps", "type": "numericInteger", "text": "Steps today", "min": 0, "max": 100000, "unit": "steps" },
            { "identifier": "weight", "type": "numericDecimal", "text": "Your weight", "min": 20, "max": 300, "unit": "kg" },
            { "identifier": "pain", "type": "scaleInteger", "text": "Pain level", "min": 0, "max": 10, "stepInterval": 1 },
            { "identifier": "energy", "type": "scale", "text": "Energy level", "min": 0, "max": 10, "stepInterval": 0.1 },
            { "identifier": "tremor", "type": "continuousScale", "text": "Tremor severity", "min": 0, "max": 1, "stepInterval": 0.01 },
            mood(),
            timing_range(),
        ],
    })
}

/// A mood question with its five labels replaced.
pub fn mood() -> Value {
    json!({
        "identifier": "mood",
        "type": "moodScale",
        "text": "How do you feel today?",
        "items": [
            { "text": "Excellent", "detail": "Could not be better" },
            { "text": "Good" },
            { "text": "Okay" },
            { "text": "Poor" },
            { "text": "Terrible", "detail": "Could not be worse" },
        ],
    })
}

/// How long ago something happened, in hours.
pub fn timing_range() -> Value {
    json!({
        "identifier": "medicationTiming",
        "type": "timingRange",
        "text": "When did you last take your medication?",
        "items": [
            { "max": 1, "unit": "hours" },
            { "min": 1, "max": 2, "unit": "hours" },
            { "min": 2, "unit": "hours" },
        ],
    })
}
