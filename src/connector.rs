use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::session::ListenCommand;
use crate::types::Language;

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("not connected")]
    NotConnected,
    #[error("connector transport failed: {0}")]
    Transport(String),
}

/// Commands the coordinator issues to the dialogue backend connector.
///
/// Implemented by the SDK binding. Events flow the other way through a
/// [`CoordinatorHandle`](crate::CoordinatorHandle); replies to callbacks go
/// back through the callback's own reply channel.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Connector: Send {
    async fn connect(&mut self, endpoint: &str) -> Result<(), ConnectorError>;

    async fn disconnect(&mut self) -> Result<(), ConnectorError>;

    async fn set_language(&mut self, language: Language) -> Result<(), ConnectorError>;

    async fn start_listening(&mut self) -> Result<(), ConnectorError>;

    async fn stop_listening(&mut self) -> Result<(), ConnectorError>;

    /// Toggle for connectors that track the listening state themselves.
    async fn push_to_talk_notify(&mut self) -> Result<(), ConnectorError>;
}

/// Sends `command` through the matching connector method.
pub(crate) async fn issue(
    connector: &mut (dyn Connector + '_),
    command: ListenCommand,
) -> Result<(), ConnectorError> {
    match command {
        ListenCommand::StartListening => connector.start_listening().await,
        ListenCommand::StopListening => connector.stop_listening().await,
        ListenCommand::NotifyPushToTalk => connector.push_to_talk_notify().await,
    }
}
