pub mod callbacks;
pub mod connector;
pub mod contacts;
pub mod coordinator;
pub mod session;
pub mod ui;

pub use tdm_session_types as types;
pub use callbacks::{CallbackRouter, UnknownActionPolicy};
pub use connector::{Connector, ConnectorError};
pub use contacts::{ContactDirectory, EntityResolver};
pub use coordinator::{spawn, spawn_with_config, Coordinator, CoordinatorError, CoordinatorHandle, Input};
pub use session::{Affordance, PttMode, SessionMachine};
pub use ui::{ChannelProjector, Screen, UiProjector, UiRx, UiUpdate};
