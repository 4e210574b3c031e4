//! In-process stand-in for the dialogue backend SDK.
//!
//! Commands are answered with the events a live backend would eventually
//! send; the events go out on a channel and are fed back to the coordinator
//! by [`forward`].

use async_trait::async_trait;
use tdm_session::types::{BackendEvent, Language, RecognitionEvent};
use tdm_session::{Connector, ConnectorError, CoordinatorHandle};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Echo {
    Backend(BackendEvent),
    Recognition(RecognitionEvent),
}

pub type EchoRx = mpsc::UnboundedReceiver<Echo>;

#[derive(Debug)]
pub struct LoopbackConnector {
    tx: mpsc::UnboundedSender<Echo>,
    connected: bool,
    listening: bool,
}

impl LoopbackConnector {
    pub fn new() -> (Self, EchoRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connector = Self {
            tx,
            connected: false,
            listening: false,
        };
        (connector, rx)
    }

    fn echo(&self, echo: Echo) -> Result<(), ConnectorError> {
        self.tx
            .send(echo)
            .map_err(|_| ConnectorError::Transport("loopback closed".to_string()))
    }

    fn ensure_connected(&self) -> Result<(), ConnectorError> {
        if self.connected {
            Ok(())
        } else {
            Err(ConnectorError::NotConnected)
        }
    }
}

#[async_trait]
impl Connector for LoopbackConnector {
    async fn connect(&mut self, endpoint: &str) -> Result<(), ConnectorError> {
        tracing::info!(endpoint, "loopback connect");
        self.connected = true;
        self.listening = false;
        self.echo(Echo::Backend(BackendEvent::Opened))
    }

    async fn disconnect(&mut self) -> Result<(), ConnectorError> {
        self.ensure_connected()?;
        self.connected = false;
        self.listening = false;
        self.echo(Echo::Backend(BackendEvent::closed(1000, "disconnected by user")))
    }

    async fn set_language(&mut self, language: Language) -> Result<(), ConnectorError> {
        tracing::info!(language = language.code(), "loopback language set");
        Ok(())
    }

    async fn start_listening(&mut self) -> Result<(), ConnectorError> {
        self.ensure_connected()?;
        self.listening = true;
        self.echo(Echo::Recognition(RecognitionEvent::ReadyForSpeech))
    }

    async fn stop_listening(&mut self) -> Result<(), ConnectorError> {
        self.ensure_connected()?;
        self.listening = false;
        tracing::debug!("loopback stopped listening, waiting for a recognition result");
        Ok(())
    }

    async fn push_to_talk_notify(&mut self) -> Result<(), ConnectorError> {
        if self.listening {
            self.stop_listening().await
        } else {
            self.start_listening().await
        }
    }
}

/// Feeds echoed events back into the coordinator until either side closes.
pub async fn forward(mut rx: EchoRx, handle: CoordinatorHandle) {
    while let Some(echo) = rx.recv().await {
        let sent = match echo {
            Echo::Backend(event) => handle.backend(event).await,
            Echo::Recognition(event) => handle.recognition(event).await,
        };
        if let Err(e) = sent {
            tracing::debug!("loopback forwarding stopped: {}", e);
            break;
        }
    }
}
