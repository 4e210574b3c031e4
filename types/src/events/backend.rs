/// Connection lifecycle notifications delivered by the backend connector.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum BackendEvent {
    #[serde(rename = "opened")]
    Opened,
    #[serde(rename = "closed")]
    Closed {
        /// Close code reported by the transport
        code: i32,
        reason: String,
    },
    /// The connection reported a problem without closing.
    #[serde(rename = "error")]
    Error {
        reason: String,
    },
}

impl BackendEvent {
    pub fn closed(code: i32, reason: &str) -> Self {
        BackendEvent::Closed {
            code,
            reason: reason.to_string(),
        }
    }

    pub fn error(reason: &str) -> Self {
        BackendEvent::Error {
            reason: reason.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendEvent::Opened => "opened",
            BackendEvent::Closed { .. } => "closed",
            BackendEvent::Error { .. } => "error",
        }
    }

    /// Status line shown in the backend status log.
    pub fn status_line(&self) -> String {
        match self {
            BackendEvent::Opened => "Opened".to_string(),
            BackendEvent::Closed { code, reason } => format!("Closed with code {code}: {reason}"),
            BackendEvent::Error { reason } => format!("Error: {reason}"),
        }
    }
}
