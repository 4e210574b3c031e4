use std::time::Duration;

use crate::callbacks::UnknownActionPolicy;
use crate::coordinator::consts::{
    DEFAULT_CALLBACK_DEADLINE_MS, DEFAULT_CAPACITY, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
    WEBSOCKET_PATH,
};
use crate::session::PttMode;
use crate::types::Language;

#[derive(Debug, Clone)]
pub struct Config {
    server_address: String,
    server_port: u16,
    language: Language,
    ptt_mode: PttMode,
    callback_deadline: Duration,
    capacity: usize,
    unknown_actions: UnknownActionPolicy,
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    pub fn with_server_address(mut self, server_address: &str) -> Self {
        self.config.server_address = server_address.to_string();
        self
    }

    pub fn with_server_port(mut self, server_port: u16) -> Self {
        self.config.server_port = server_port;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.config.language = language;
        self
    }

    pub fn with_ptt_mode(mut self, ptt_mode: PttMode) -> Self {
        self.config.ptt_mode = ptt_mode;
        self
    }

    pub fn with_callback_deadline(mut self, deadline: Duration) -> Self {
        self.config.callback_deadline = deadline;
        self
    }

    /// Capacity of the coordinator's input queue.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity.max(1);
        self
    }

    pub fn with_unknown_actions(mut self, policy: UnknownActionPolicy) -> Self {
        self.config.unknown_actions = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            language: Language::default(),
            ptt_mode: PttMode::default(),
            callback_deadline: Duration::from_millis(DEFAULT_CALLBACK_DEADLINE_MS),
            capacity: DEFAULT_CAPACITY,
            unknown_actions: UnknownActionPolicy::default(),
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// WebSocket endpoint of the dialogue backend.
    pub fn endpoint(&self) -> String {
        format!(
            "ws://{}:{}{}",
            self.server_address, self.server_port, WEBSOCKET_PATH
        )
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn ptt_mode(&self) -> PttMode {
        self.ptt_mode
    }

    pub fn callback_deadline(&self) -> Duration {
        self.callback_deadline
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn unknown_actions(&self) -> UnknownActionPolicy {
        self.unknown_actions
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
