//! Pure state transition function
//!
//! Given the same state, context and event it always produces the same
//! outcome and performs no I/O.

use super::{Effect, ListenCommand, SessionEvent};
use crate::types::{BackendEvent, ListeningState, RecognitionEvent, SessionState};
use thiserror::Error;

/// How listening is toggled on the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PttMode {
    /// Explicit start-listening and stop-listening commands.
    #[default]
    StartStop,
    /// One push-to-talk notification for both directions, for connectors
    /// that manage listening internally.
    Notify,
}

impl std::str::FromStr for PttMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start_stop" | "start-stop" | "startstop" => Ok(PttMode::StartStop),
            "notify" => Ok(PttMode::Notify),
            other => Err(format!("unknown push-to-talk mode: {other}")),
        }
    }
}

/// Static inputs of the transition function.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionContext {
    pub ptt_mode: PttMode,
}

impl SessionContext {
    pub fn new(ptt_mode: PttMode) -> Self {
        Self { ptt_mode }
    }

    fn start_command(&self) -> ListenCommand {
        match self.ptt_mode {
            PttMode::StartStop => ListenCommand::StartListening,
            PttMode::Notify => ListenCommand::NotifyPushToTalk,
        }
    }

    fn stop_command(&self) -> ListenCommand {
        match self.ptt_mode {
            PttMode::StartStop => ListenCommand::StopListening,
            PttMode::Notify => ListenCommand::NotifyPushToTalk,
        }
    }
}

/// Result of a state transition
#[derive(Debug)]
pub struct Transition {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("unexpected {event} in state {state}")]
    Unexpected {
        state: SessionState,
        event: &'static str,
    },
}

impl TransitionError {
    fn unexpected(state: &SessionState, event: &SessionEvent) -> Self {
        TransitionError::Unexpected {
            state: *state,
            event: event.name(),
        }
    }
}

pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: &SessionEvent,
) -> Result<Transition, TransitionError> {
    use ListeningState::*;

    match (state.listening(), event) {
        // Backend lifecycle applies in every state; close is the reset signal.
        (_, SessionEvent::Backend(BackendEvent::Opened)) => {
            Ok(Transition::new(SessionState::connected(Idle)))
        }
        (_, SessionEvent::Backend(BackendEvent::Closed { .. })) => {
            Ok(Transition::new(SessionState::disconnected()))
        }
        (_, SessionEvent::Backend(BackendEvent::Error { .. })) => Ok(Transition::new(*state)),

        (Idle, SessionEvent::TalkPressed) => Ok(Transition::new(state.with_listening(RequestedStart))
            .with_effect(Effect::Command(context.start_command()))),
        (Listening, SessionEvent::TalkPressed) => Ok(Transition::new(
            state.with_listening(RequestedStop),
        )
        .with_effect(Effect::Command(context.stop_command()))),
        (_, SessionEvent::TalkPressed) => Err(TransitionError::unexpected(state, event)),

        (RequestedStart, SessionEvent::Recognition(RecognitionEvent::ReadyForSpeech)) => {
            Ok(Transition::new(state.with_listening(Listening)))
        }
        (Listening | RequestedStop, SessionEvent::Recognition(e)) if e.is_terminal() => {
            Ok(Transition::new(state.with_listening(Idle)))
        }
        (
            _,
            SessionEvent::Recognition(
                RecognitionEvent::BeginningOfSpeech
                | RecognitionEvent::EndOfSpeech
                | RecognitionEvent::PartialResults { .. }
                | RecognitionEvent::RmsChanged { .. },
            ),
        ) => Ok(Transition::new(*state)),
        (_, SessionEvent::Recognition(_)) => Err(TransitionError::unexpected(state, event)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: SessionState, event: SessionEvent) -> Result<Transition, TransitionError> {
        transition(&state, &SessionContext::default(), &event)
    }

    #[test]
    fn opened_and_closed_apply_in_any_state() {
        for listening in [Disabled, Idle, RequestedStart, Listening, RequestedStop] {
            let state = SessionState::connected(listening);
            let opened = step(state, BackendEvent::Opened.into()).unwrap();
            assert_eq!(opened.new_state, SessionState::connected(Idle));
            let closed = step(state, BackendEvent::closed(1000, "bye").into()).unwrap();
            assert_eq!(closed.new_state, SessionState::disconnected());
            assert!(closed.effects.is_empty());
        }
    }

    use ListeningState::*;

    #[test]
    fn talk_press_from_idle_starts_listening() {
        let t = step(SessionState::connected(Idle), SessionEvent::TalkPressed).unwrap();
        assert_eq!(t.new_state.listening(), RequestedStart);
        assert_eq!(t.effects, vec![Effect::Command(ListenCommand::StartListening)]);
    }

    #[test]
    fn talk_press_while_listening_stops() {
        let t = step(SessionState::connected(Listening), SessionEvent::TalkPressed).unwrap();
        assert_eq!(t.new_state.listening(), RequestedStop);
        assert_eq!(t.effects, vec![Effect::Command(ListenCommand::StopListening)]);
    }

    #[test]
    fn talk_press_in_pending_states_is_rejected() {
        for listening in [Disabled, RequestedStart, RequestedStop] {
            let err = step(SessionState::connected(listening), SessionEvent::TalkPressed)
                .unwrap_err();
            assert!(matches!(err, TransitionError::Unexpected { event: "talk_pressed", .. }));
        }
    }

    #[test]
    fn notify_mode_uses_single_command() {
        let context = SessionContext::new(PttMode::Notify);
        let start = transition(
            &SessionState::connected(Idle),
            &context,
            &SessionEvent::TalkPressed,
        )
        .unwrap();
        let stop = transition(
            &SessionState::connected(Listening),
            &context,
            &SessionEvent::TalkPressed,
        )
        .unwrap();
        assert_eq!(start.effects, vec![Effect::Command(ListenCommand::NotifyPushToTalk)]);
        assert_eq!(stop.effects, vec![Effect::Command(ListenCommand::NotifyPushToTalk)]);
        assert_eq!(stop.new_state.listening(), RequestedStop);
    }

    #[test]
    fn ready_only_counts_after_start_request() {
        let t = step(
            SessionState::connected(RequestedStart),
            RecognitionEvent::ReadyForSpeech.into(),
        )
        .unwrap();
        assert_eq!(t.new_state.listening(), Listening);

        assert!(step(SessionState::connected(Idle), RecognitionEvent::ReadyForSpeech.into()).is_err());
    }

    #[test]
    fn terminal_recognition_returns_to_idle() {
        let terminal = [
            RecognitionEvent::results(vec![]),
            RecognitionEvent::EmptyResult,
            RecognitionEvent::SpeechTimeout,
            RecognitionEvent::error("network"),
        ];
        for listening in [Listening, RequestedStop] {
            for event in &terminal {
                let t = step(SessionState::connected(listening), event.clone().into()).unwrap();
                assert_eq!(t.new_state.listening(), Idle);
            }
        }
        for event in terminal {
            assert!(step(SessionState::connected(RequestedStart), event.into()).is_err());
        }
    }

    #[test]
    fn display_only_recognition_keeps_state() {
        let state = SessionState::connected(Listening);
        for event in [
            RecognitionEvent::BeginningOfSpeech,
            RecognitionEvent::EndOfSpeech,
            RecognitionEvent::RmsChanged { level: -2.0 },
            RecognitionEvent::PartialResults { hypotheses: vec![] },
        ] {
            assert_eq!(step(state, event.into()).unwrap().new_state, state);
        }
    }

    #[test]
    fn backend_error_keeps_state() {
        let state = SessionState::connected(RequestedStart);
        let t = step(state, BackendEvent::error("timeout").into()).unwrap();
        assert_eq!(t.new_state, state);
    }
}
