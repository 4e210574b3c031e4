use crate::types::ListeningState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalkLabel {
    Start,
    Stop,
}

impl std::fmt::Display for TalkLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TalkLabel::Start => f.write_str("START LISTEN"),
            TalkLabel::Stop => f.write_str("STOP LISTEN"),
        }
    }
}

/// What the talk control shows and whether it accepts presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Affordance {
    pub label: TalkLabel,
    pub enabled: bool,
}

impl Affordance {
    /// Derived from the listening state alone, never patched incrementally.
    pub fn of(state: ListeningState) -> Self {
        let (label, enabled) = match state {
            ListeningState::Disabled => (TalkLabel::Start, false),
            ListeningState::Idle => (TalkLabel::Start, true),
            ListeningState::RequestedStart => (TalkLabel::Start, false),
            ListeningState::Listening => (TalkLabel::Stop, true),
            ListeningState::RequestedStop => (TalkLabel::Stop, false),
        };
        Self { label, enabled }
    }
}

impl Default for Affordance {
    fn default() -> Self {
        Self::of(ListeningState::Disabled)
    }
}
