//! Display updates and the projector seam towards the rendering context.
//!
//! The coordinator never touches render state. It pushes [`UiUpdate`]s to a
//! [`UiProjector`], which must hand them over without blocking; a [`Screen`]
//! applies them on the rendering thread.

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use crate::session::Affordance;

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A new line for the backend status log.
    BackendStatus(String),
    TalkControl(Affordance),
    RecognitionStatus(String),
    UserUtterance(String),
    /// Human-readable summary of a callback invocation.
    CallbackSummary(String),
    SystemUtterance(String),
    InterpretedUtterance(String),
    ActiveDdd {
        ddd: String,
        language_code: String,
    },
    Popup {
        title: String,
        options: Vec<BTreeMap<String, String>>,
    },
    DialRequested(String),
}

/// Sink for display updates. Implementations must not block the caller.
pub trait UiProjector: Send + Sync {
    fn project(&self, update: UiUpdate);
}

/// Hands updates to a render context over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelProjector {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

pub type UiRx = mpsc::UnboundedReceiver<UiUpdate>;

impl ChannelProjector {
    pub fn new() -> (Self, UiRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UiProjector for ChannelProjector {
    fn project(&self, update: UiUpdate) {
        if let Err(e) = self.tx.send(update) {
            tracing::debug!("render context gone, dropping update: {:?}", e.0);
        }
    }
}

/// Render-side model of the demo screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    /// Backend status lines, newest first
    pub backend_status: Vec<String>,
    pub talk_control: Affordance,
    pub recognition_status: String,
    pub user_utterance: String,
    pub last_callback: String,
    pub system_utterance: String,
    pub interpreted_utterance: String,
    pub active_ddd: String,
    pub popup: Option<(String, Vec<BTreeMap<String, String>>)>,
    pub dialed: Option<String>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::BackendStatus(line) => self.backend_status.insert(0, line),
            UiUpdate::TalkControl(affordance) => self.talk_control = affordance,
            UiUpdate::RecognitionStatus(status) => self.recognition_status = status,
            UiUpdate::UserUtterance(text) => self.user_utterance = text,
            UiUpdate::CallbackSummary(summary) => self.last_callback = summary,
            UiUpdate::SystemUtterance(text) => self.system_utterance = text,
            UiUpdate::InterpretedUtterance(text) => self.interpreted_utterance = text,
            UiUpdate::ActiveDdd { ddd, language_code } => {
                self.active_ddd = format!("{ddd}, {language_code}");
            }
            UiUpdate::Popup { title, options } => self.popup = Some((title, options)),
            UiUpdate::DialRequested(number) => self.dialed = Some(number),
        }
    }

    /// Plain-text rendering, one labelled line per view.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let button = if self.talk_control.enabled {
            format!("[{}]", self.talk_control.label)
        } else {
            format!("({})", self.talk_control.label)
        };
        out.push_str(&format!("talk:        {button}\n"));
        out.push_str(&format!("asr:         {}\n", self.recognition_status));
        out.push_str(&format!("user:        {}\n", self.user_utterance));
        out.push_str(&format!("interpreted: {}\n", self.interpreted_utterance));
        out.push_str(&format!("system:      {}\n", self.system_utterance));
        out.push_str(&format!("ddd:         {}\n", self.active_ddd));
        out.push_str(&format!("callback:    {}\n", self.last_callback));
        if let Some(number) = &self.dialed {
            out.push_str(&format!("dialing:     {number}\n"));
        }
        if let Some((title, options)) = &self.popup {
            out.push_str(&format!("popup:       {title} ({} options)\n", options.len()));
        }
        out.push_str("backend:\n");
        for line in &self.backend_status {
            out.push_str(&format!("  {line}\n"));
        }
        out
    }
}
