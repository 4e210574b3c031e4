//! Demo configuration
//!
//! Loaded from the environment (and a `.env` file when present):
//!
//! * `TDM_SERVER_ADDRESS`: backend host. Defaults to `localhost`.
//! * `TDM_SERVER_PORT`: backend port. Defaults to `9090`.
//! * `TDM_LANGUAGE`: `english` or `swedish`. Defaults to `english`.
//! * `TDM_PTT_MODE`: `start_stop` or `notify`. Defaults to `start_stop`.
//! * `TDM_CALLBACK_DEADLINE_MS`: callback reply deadline. Defaults to `2000`.
//! * `TDM_UNKNOWN_ACTIONS`: `acknowledge` or `reject`. Defaults to `acknowledge`.
//! * `RUST_LOG`: log filter. Defaults to `info`.

use std::env;
use std::time::Duration;

use tdm_session::coordinator;
use tdm_session::types::Language;
use tdm_session::{PttMode, UnknownActionPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub server_port: u16,
    pub language: Language,
    pub ptt_mode: PttMode,
    pub callback_deadline: Duration,
    pub unknown_actions: UnknownActionPolicy,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
    #[error("invalid log filter provided for RUST_LOG: {0}")]
    InvalidLogFilter(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = coordinator::Config::new();

        let server_address = lookup("TDM_SERVER_ADDRESS")
            .unwrap_or_else(|| defaults.server_address().to_string());
        let server_port = parse_var(&lookup, "TDM_SERVER_PORT")?.unwrap_or(defaults.server_port());
        let language = parse_var(&lookup, "TDM_LANGUAGE")?.unwrap_or(defaults.language());
        let ptt_mode = parse_var(&lookup, "TDM_PTT_MODE")?.unwrap_or(defaults.ptt_mode());
        let callback_deadline = parse_var::<u64>(&lookup, "TDM_CALLBACK_DEADLINE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.callback_deadline());
        let unknown_actions =
            parse_var(&lookup, "TDM_UNKNOWN_ACTIONS")?.unwrap_or(UnknownActionPolicy::Acknowledge);

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(&log_filter)
            .map_err(|_| ConfigError::InvalidLogFilter(log_filter.clone()))?;

        Ok(Self {
            server_address,
            server_port,
            language,
            ptt_mode,
            callback_deadline,
            unknown_actions,
            log_filter,
        })
    }

    pub fn coordinator(&self) -> coordinator::Config {
        coordinator::Config::builder()
            .with_server_address(&self.server_address)
            .with_server_port(self.server_port)
            .with_language(self.language)
            .with_ptt_mode(self.ptt_mode)
            .with_callback_deadline(self.callback_deadline)
            .with_unknown_actions(self.unknown_actions)
            .build()
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidVar {
                var,
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.coordinator().endpoint(), "ws://localhost:9090/websocket");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.ptt_mode, PttMode::StartStop);
        assert_eq!(config.callback_deadline, Duration::from_millis(2000));
        assert_eq!(config.unknown_actions, UnknownActionPolicy::Acknowledge);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("TDM_SERVER_ADDRESS", "10.0.2.2"),
            ("TDM_SERVER_PORT", "8080"),
            ("TDM_LANGUAGE", "swedish"),
            ("TDM_PTT_MODE", "notify"),
            ("TDM_CALLBACK_DEADLINE_MS", "500"),
            ("TDM_UNKNOWN_ACTIONS", "reject"),
        ])
        .unwrap();
        let coordinator = config.coordinator();
        assert_eq!(coordinator.endpoint(), "ws://10.0.2.2:8080/websocket");
        assert_eq!(coordinator.language(), Language::Swedish);
        assert_eq!(coordinator.ptt_mode(), PttMode::Notify);
        assert_eq!(coordinator.callback_deadline(), Duration::from_millis(500));
        assert_eq!(coordinator.unknown_actions(), UnknownActionPolicy::Reject);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("TDM_SERVER_PORT", "ninety")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "TDM_SERVER_PORT", .. }));
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(config(&[("TDM_LANGUAGE", "klingon")]).is_err());
    }
}
