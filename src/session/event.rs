use crate::types::{BackendEvent, RecognitionEvent};

/// Inputs that drive the session state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Backend(BackendEvent),
    /// The user pressed the talk control.
    TalkPressed,
    Recognition(RecognitionEvent),
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Backend(e) => e.name(),
            SessionEvent::TalkPressed => "talk_pressed",
            SessionEvent::Recognition(e) => e.name(),
        }
    }
}

impl From<BackendEvent> for SessionEvent {
    fn from(event: BackendEvent) -> Self {
        SessionEvent::Backend(event)
    }
}

impl From<RecognitionEvent> for SessionEvent {
    fn from(event: RecognitionEvent) -> Self {
        SessionEvent::Recognition(event)
    }
}
