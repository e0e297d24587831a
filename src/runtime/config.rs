//! Environment-driven configuration for the OpenClaw adapter.
//!
//! Settings are resolved once, up front, and passed by value into the
//! adapter; nothing else reads the process environment.

use std::env;
use std::path::PathBuf;

use super::{Result, RuntimeError};

pub const DEFAULT_BINARY: &str = "openclaw";
pub const DEFAULT_WORKSPACE: &str = ".openclaw";
pub const DEFAULT_MODEL: &str = "openclaw";
pub const DEFAULT_TIMEOUT_S: u64 = 30;

/// Recognized OpenClaw settings.
#[derive(Debug, Clone)]
pub struct OpenClawConfig {
    /// Local executable name; informational unless a start command is set.
    pub binary_path: String,
    /// Working directory for a spawned process (and its log file).
    pub workspace_dir: PathBuf,
    /// Base URL of a chat-completion-style HTTP endpoint.
    pub server_url: Option<String>,
    /// Model identifier sent in generation requests.
    pub model: String,
    /// Argument vector used to launch a local process.
    pub start_command: Option<Vec<String>>,
    /// Bearer token forwarded as-is in the Authorization header.
    pub api_key: Option<String>,
    /// Request and shutdown timeout, in seconds.
    pub timeout_s: u64,
}

impl Default for OpenClawConfig {
    fn default() -> Self {
        Self {
            binary_path: DEFAULT_BINARY.to_string(),
            workspace_dir: PathBuf::from(DEFAULT_WORKSPACE),
            server_url: None,
            model: DEFAULT_MODEL.to_string(),
            start_command: None,
            api_key: None,
            timeout_s: DEFAULT_TIMEOUT_S,
        }
    }
}

impl OpenClawConfig {
    /// Resolve settings from the `OPENCLAW_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup, so tests can supply
    /// values without mutating the process environment.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let start_command = match lookup("OPENCLAW_START_COMMAND") {
            Some(raw) => {
                let argv = shell_words::split(&raw).map_err(|err| {
                    RuntimeError::Configuration(format!("parse OPENCLAW_START_COMMAND: {err}"))
                })?;
                if argv.is_empty() {
                    None
                } else {
                    Some(argv)
                }
            }
            None => None,
        };

        let timeout_s = match lookup("OPENCLAW_TIMEOUT_S") {
            Some(raw) => raw.parse().map_err(|err| {
                RuntimeError::Configuration(format!("parse OPENCLAW_TIMEOUT_S {raw:?}: {err}"))
            })?,
            None => DEFAULT_TIMEOUT_S,
        };

        Ok(Self {
            binary_path: lookup("OPENCLAW_BINARY").unwrap_or_else(|| DEFAULT_BINARY.to_string()),
            workspace_dir: lookup("OPENCLAW_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE)),
            server_url: lookup("OPENCLAW_URL").filter(|url| !url.is_empty()),
            model: lookup("OPENCLAW_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            start_command,
            api_key: lookup("OPENCLAW_API_KEY").filter(|key| !key.is_empty()),
            timeout_s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = OpenClawConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.binary_path, "openclaw");
        assert_eq!(config.workspace_dir, PathBuf::from(".openclaw"));
        assert_eq!(config.model, "openclaw");
        assert_eq!(config.timeout_s, 30);
        assert!(config.server_url.is_none());
        assert!(config.start_command.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn start_command_is_split_into_an_argument_vector() {
        let lookup = lookup_from(&[(
            "OPENCLAW_START_COMMAND",
            "openclaw serve --workspace \"my dir\"",
        )]);
        let config = OpenClawConfig::from_lookup(lookup).unwrap();
        assert_eq!(
            config.start_command.unwrap(),
            vec!["openclaw", "serve", "--workspace", "my dir"]
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let lookup = lookup_from(&[
            ("OPENCLAW_URL", "http://127.0.0.1:8080"),
            ("OPENCLAW_MODEL", "openclaw-mini"),
            ("OPENCLAW_API_KEY", "secret"),
            ("OPENCLAW_TIMEOUT_S", "5"),
        ]);
        let config = OpenClawConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.model, "openclaw-mini");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_s, 5);
    }

    #[test]
    fn malformed_timeout_is_a_configuration_error() {
        let lookup = lookup_from(&[("OPENCLAW_TIMEOUT_S", "soon")]);
        let err = OpenClawConfig::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, RuntimeError::Configuration(_)));
    }
}
