use super::display::display_effects;
use super::{transition, Affordance, Effect, SessionContext, SessionEvent, TransitionError};
use crate::types::SessionState;
use crate::ui::UiUpdate;

/// Outcome of feeding one event to the machine.
#[derive(Debug, Default)]
pub struct Step {
    pub effects: Vec<Effect>,
    /// Set when the event was not expected in the state it arrived in.
    pub rejected: Option<TransitionError>,
}

impl Step {
    pub fn commands(&self) -> impl Iterator<Item = super::ListenCommand> + '_ {
        self.effects.iter().filter_map(Effect::command)
    }
}

/// Owns the session state; the only place it changes.
#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    context: SessionContext,
}

impl SessionMachine {
    pub fn new(context: SessionContext) -> Self {
        Self {
            state: SessionState::disconnected(),
            context,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn affordance(&self) -> Affordance {
        Affordance::of(self.state.listening())
    }

    /// Effect publishing the talk control for the current state.
    pub fn publish_affordance(&self) -> Effect {
        Effect::project(UiUpdate::TalkControl(self.affordance()))
    }

    pub fn handle(&mut self, event: SessionEvent) -> Step {
        let mut step = Step::default();

        match transition(&self.state, &self.context, &event) {
            Ok(t) => {
                let previous = self.state;
                self.state = t.new_state;
                if previous != self.state {
                    tracing::debug!(from = %previous, to = %self.state, event = event.name(), "session transition");
                }
                if previous.listening() != self.state.listening() {
                    step.effects.push(self.publish_affordance());
                }
                step.effects.extend(t.effects);
            }
            Err(e) => {
                tracing::warn!(state = %self.state, event = event.name(), "ignoring event: {}", e);
                step.rejected = Some(e);
            }
        }

        step.effects.extend(display_effects(&event));
        step
    }
}
