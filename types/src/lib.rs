pub mod session;
pub mod events;
pub mod callbacks;
pub mod contacts;
pub mod language;

pub use callbacks::{Args, CallbackKind, CallbackReply, CallbackRequest, Entity};
pub use contacts::ContactRecord;
pub use events::{BackendEvent, DialogueEvent, RecognitionEvent, RecognitionHypothesis};
pub use language::Language;
pub use session::{ConnectionState, ListeningState, SessionState};
