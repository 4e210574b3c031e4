//! Effects produced by session transitions

use crate::ui::UiUpdate;

/// Listening commands issued to the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenCommand {
    StartListening,
    StopListening,
    /// Single toggle command of connectors that track listening themselves.
    NotifyPushToTalk,
}

impl ListenCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenCommand::StartListening => "start_listening",
            ListenCommand::StopListening => "stop_listening",
            ListenCommand::NotifyPushToTalk => "push_to_talk_notify",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Command(ListenCommand),
    Project(UiUpdate),
}

impl Effect {
    pub fn project(update: UiUpdate) -> Self {
        Effect::Project(update)
    }

    pub fn command(&self) -> Option<ListenCommand> {
        match self {
            Effect::Command(c) => Some(*c),
            Effect::Project(_) => None,
        }
    }
}
