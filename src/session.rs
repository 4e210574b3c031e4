//! Push-to-talk session state machine
//!
//! Pure transitions over [`SessionState`](crate::types::SessionState); the
//! [`SessionMachine`] wraps them, logs rejected events and collects the
//! effects the coordinator executes.

mod affordance;
mod display;
mod effect;
mod event;
mod machine;
mod transition;

#[cfg(test)]
mod proptests;

pub use affordance::{Affordance, TalkLabel};
pub use effect::{Effect, ListenCommand};
pub use event::SessionEvent;
pub use machine::{SessionMachine, Step};
pub use transition::{transition, PttMode, SessionContext, Transition, TransitionError};
