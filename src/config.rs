//! Application configuration
//!
//! Reads environment variables with sensible defaults.

use crate::reply::simulated::DEFAULT_REPLY_DELAY;
use std::env;
use std::time::Duration;

/// Default location of the backend's chat endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/chat";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where agent replies come from
    pub reply: ReplyConfig,
    /// Reject saves that would leave an agent invalid
    pub strict_save: bool,
}

/// Reply collaborator configuration
#[derive(Debug, Clone)]
pub struct ReplyConfig {
    pub mode: ReplyMode,
    /// Chat endpoint used in remote mode
    pub endpoint: String,
    /// Delay before a simulated reply appears
    pub delay: Duration,
}

/// Which reply collaborator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyMode {
    #[default]
    Simulated,
    Remote,
}

impl ReplyMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" | "local" => Some(ReplyMode::Simulated),
            "remote" | "http" => Some(ReplyMode::Remote),
            _ => None,
        }
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            mode: ReplyMode::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            delay: DEFAULT_REPLY_DELAY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("AGENT_STUDIO_REPLY_MODE") {
            Some(value) => ReplyMode::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown reply mode, using simulated replies");
                ReplyMode::Simulated
            }),
            None => ReplyMode::default(),
        };

        Self {
            reply: ReplyConfig {
                mode,
                endpoint: lookup("AGENT_STUDIO_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                delay: lookup("AGENT_STUDIO_REPLY_DELAY_MS")
                    .and_then(|ms| ms.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_REPLY_DELAY),
            },
            strict_save: lookup("AGENT_STUDIO_STRICT_SAVE")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.reply.mode, ReplyMode::Simulated);
        assert_eq!(config.reply.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.reply.delay, Duration::from_millis(1000));
        assert!(!config.strict_save);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AGENT_STUDIO_REPLY_MODE", "Remote"),
            ("AGENT_STUDIO_ENDPOINT", "http://localhost:9000/api/chat"),
            ("AGENT_STUDIO_REPLY_DELAY_MS", "250"),
            ("AGENT_STUDIO_STRICT_SAVE", "true"),
        ]);
        assert_eq!(config.reply.mode, ReplyMode::Remote);
        assert_eq!(config.reply.endpoint, "http://localhost:9000/api/chat");
        assert_eq!(config.reply.delay, Duration::from_millis(250));
        assert!(config.strict_save);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("AGENT_STUDIO_REPLY_MODE", "carrier-pigeon"),
            ("AGENT_STUDIO_REPLY_DELAY_MS", "soon"),
        ]);
        assert_eq!(config.reply.mode, ReplyMode::Simulated);
        assert_eq!(config.reply.delay, DEFAULT_REPLY_DELAY);
    }
}
