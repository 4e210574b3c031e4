//! Status text derived from events, independent of the session state.

use super::{Effect, SessionEvent};
use crate::types::RecognitionEvent;
use crate::ui::UiUpdate;

pub(crate) fn display_effects(event: &SessionEvent) -> Vec<Effect> {
    match event {
        SessionEvent::Backend(e) => vec![Effect::project(UiUpdate::BackendStatus(e.status_line()))],
        SessionEvent::TalkPressed => vec![],
        SessionEvent::Recognition(e) => recognition_display(e),
    }
}

fn status(text: &str) -> Effect {
    Effect::project(UiUpdate::RecognitionStatus(text.to_string()))
}

fn utterance(text: &str) -> Effect {
    Effect::project(UiUpdate::UserUtterance(text.to_string()))
}

fn recognition_display(event: &RecognitionEvent) -> Vec<Effect> {
    match event {
        RecognitionEvent::ReadyForSpeech => vec![status("Ready")],
        RecognitionEvent::BeginningOfSpeech => vec![status("Began speaking"), utterance("")],
        RecognitionEvent::EndOfSpeech => vec![status("Finished speaking")],
        RecognitionEvent::PartialResults { hypotheses } => hypotheses
            .first()
            .map(|h| vec![utterance(h.recognition())])
            .unwrap_or_default(),
        RecognitionEvent::RmsChanged { .. } => vec![],
        RecognitionEvent::SpeechTimeout => vec![status("ASR timed out")],
        RecognitionEvent::EmptyResult => vec![status("ASR results empty")],
        RecognitionEvent::Error { reason } => vec![status(&format!("AsrError: {reason}"))],
        RecognitionEvent::Results { .. } => {
            vec![utterance(event.best_recognition().unwrap_or(""))]
        }
    }
}
