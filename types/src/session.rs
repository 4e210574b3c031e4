/// Whether the dialogue backend connection is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Push-to-talk lifecycle as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListeningState {
    /// No backend connection, the talk control is inert.
    #[default]
    Disabled,
    Idle,
    /// A start-listening command was issued and the recognizer is not ready yet.
    RequestedStart,
    Listening,
    /// A stop-listening command was issued and no recognition outcome has arrived yet.
    RequestedStop,
}

impl ListeningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListeningState::Disabled => "disabled",
            ListeningState::Idle => "idle",
            ListeningState::RequestedStart => "requested_start",
            ListeningState::Listening => "listening",
            ListeningState::RequestedStop => "requested_stop",
        }
    }
}

impl std::fmt::Display for ListeningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection and listening state composed into the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    connection: ConnectionState,
    listening: ListeningState,
}

impl SessionState {
    pub fn new(connection: ConnectionState, listening: ListeningState) -> Self {
        Self {
            connection,
            listening,
        }
    }

    pub fn connected(listening: ListeningState) -> Self {
        Self::new(ConnectionState::Connected, listening)
    }

    pub fn disconnected() -> Self {
        Self::new(ConnectionState::Disconnected, ListeningState::Disabled)
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn listening(&self) -> ListeningState {
        self.listening
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn with_listening(self, listening: ListeningState) -> Self {
        Self { listening, ..self }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection = match self.connection {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
        };
        write!(f, "{}/{}", connection, self.listening)
    }
}
