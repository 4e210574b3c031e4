mod backend;
mod recognition;
mod dialogue;

pub use backend::BackendEvent;
pub use dialogue::DialogueEvent;
pub use recognition::{RecognitionEvent, RecognitionHypothesis};
