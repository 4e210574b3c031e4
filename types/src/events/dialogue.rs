use std::collections::BTreeMap;

/// One-way notifications from the dialogue manager. None of them expects a reply.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum DialogueEvent {
    #[serde(rename = "show_popup")]
    ShowPopup {
        title: String,
        options: Vec<BTreeMap<String, String>>,
    },
    /// Text the system is about to speak.
    #[serde(rename = "system_utterance_to_speak")]
    SystemUtteranceToSpeak {
        utterance: String,
    },
    /// The hypothesis the dialogue manager chose to interpret.
    #[serde(rename = "selected_recognition")]
    SelectedRecognition {
        recognition: String,
    },
    #[serde(rename = "active_ddd_changed")]
    ActiveDddChanged {
        ddd: String,
        language_code: String,
    },
}

impl DialogueEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DialogueEvent::ShowPopup { .. } => "show_popup",
            DialogueEvent::SystemUtteranceToSpeak { .. } => "system_utterance_to_speak",
            DialogueEvent::SelectedRecognition { .. } => "selected_recognition",
            DialogueEvent::ActiveDddChanged { .. } => "active_ddd_changed",
        }
    }
}
