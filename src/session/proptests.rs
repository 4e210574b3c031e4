//! Property-based tests for the session state machine
//!
//! Random event sequences are replayed through the machine and checked
//! against a direct fold of the transition table.

use super::*;
use crate::types::{
    BackendEvent, ConnectionState, ListeningState, RecognitionEvent, RecognitionHypothesis,
    SessionState,
};
use crate::ui::UiUpdate;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_hypotheses() -> impl Strategy<Value = Vec<RecognitionHypothesis>> {
    proptest::collection::vec(
        "[a-z ]{1,20}".prop_map(|text| RecognitionHypothesis::new(&text)),
        0..3,
    )
}

fn arb_backend_event() -> impl Strategy<Value = BackendEvent> {
    prop_oneof![
        Just(BackendEvent::Opened),
        (1000i32..1012, "[a-z ]{0,12}").prop_map(|(code, reason)| BackendEvent::closed(code, &reason)),
        "[a-z ]{1,12}".prop_map(|reason| BackendEvent::error(&reason)),
    ]
}

fn arb_recognition_event() -> impl Strategy<Value = RecognitionEvent> {
    prop_oneof![
        Just(RecognitionEvent::ReadyForSpeech),
        Just(RecognitionEvent::BeginningOfSpeech),
        Just(RecognitionEvent::EndOfSpeech),
        arb_hypotheses().prop_map(|hypotheses| RecognitionEvent::PartialResults { hypotheses }),
        (-10.0f32..10.0).prop_map(|level| RecognitionEvent::RmsChanged { level }),
        Just(RecognitionEvent::SpeechTimeout),
        Just(RecognitionEvent::EmptyResult),
        "[a-z ]{1,12}".prop_map(|reason| RecognitionEvent::error(&reason)),
        arb_hypotheses().prop_map(RecognitionEvent::results),
    ]
}

fn arb_event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        arb_backend_event().prop_map(SessionEvent::Backend),
        Just(SessionEvent::TalkPressed),
        arb_recognition_event().prop_map(SessionEvent::Recognition),
    ]
}

fn arb_ptt_mode() -> impl Strategy<Value = PttMode> {
    prop_oneof![Just(PttMode::StartStop), Just(PttMode::Notify)]
}

// ============================================================================
// Reference model
// ============================================================================

/// The transition table written out as a plain fold step.
fn table(state: SessionState, event: &SessionEvent) -> SessionState {
    use ListeningState::*;
    match event {
        SessionEvent::Backend(BackendEvent::Opened) => SessionState::connected(Idle),
        SessionEvent::Backend(BackendEvent::Closed { .. }) => SessionState::disconnected(),
        SessionEvent::Backend(BackendEvent::Error { .. }) => state,
        SessionEvent::TalkPressed => match state.listening() {
            Idle => state.with_listening(RequestedStart),
            Listening => state.with_listening(RequestedStop),
            _ => state,
        },
        SessionEvent::Recognition(RecognitionEvent::ReadyForSpeech) => match state.listening() {
            RequestedStart => state.with_listening(Listening),
            _ => state,
        },
        SessionEvent::Recognition(e) if e.is_terminal() => match state.listening() {
            Listening | RequestedStop => state.with_listening(Idle),
            _ => state,
        },
        SessionEvent::Recognition(_) => state,
    }
}

proptest! {
    #[test]
    fn replay_matches_table_fold(
        mode in arb_ptt_mode(),
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let mut machine = SessionMachine::new(SessionContext::new(mode));
        let expected = events.iter().fold(SessionState::disconnected(), |s, e| table(s, e));
        for event in events {
            machine.handle(event);
        }
        prop_assert_eq!(machine.state(), expected);
    }

    #[test]
    fn published_affordance_never_drifts(events in proptest::collection::vec(arb_event(), 1..60)) {
        let mut machine = SessionMachine::new(SessionContext::default());
        let mut shown = machine.affordance();
        for event in events {
            for effect in machine.handle(event).effects {
                if let Effect::Project(UiUpdate::TalkControl(a)) = effect {
                    shown = a;
                }
            }
            prop_assert_eq!(shown, Affordance::of(machine.state().listening()));
        }
    }

    #[test]
    fn commands_only_follow_accepted_presses(
        mode in arb_ptt_mode(),
        events in proptest::collection::vec(arb_event(), 0..60),
    ) {
        let mut machine = SessionMachine::new(SessionContext::new(mode));
        for event in events {
            let before = machine.state().listening();
            let is_press = event == SessionEvent::TalkPressed;
            let step = machine.handle(event);
            let commands: Vec<ListenCommand> = step.commands().collect();
            if is_press && matches!(before, ListeningState::Idle | ListeningState::Listening) {
                prop_assert_eq!(commands.len(), 1);
            } else {
                prop_assert!(commands.is_empty());
            }
        }
    }

    #[test]
    fn disconnected_implies_disabled(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut machine = SessionMachine::new(SessionContext::default());
        for event in events {
            machine.handle(event);
            let state = machine.state();
            prop_assert_eq!(
                state.connection() == ConnectionState::Disconnected,
                state.listening() == ListeningState::Disabled
            );
        }
    }
}
