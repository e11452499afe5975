//! API key and base URL resolution.

use crate::error::{Result, VisionError};
use std::collections::HashMap;
use std::fmt;

/// Environment variable holding the default xAI API key.
pub const API_KEY_ENV: &str = "XAI_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "XAI_BASE_URL";

/// Production xAI API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

/// Source of process-wide configuration values.
///
/// [`EnvConfig`] reads the real environment; [`StaticConfig`] holds fixed
/// values and is what tests and embedders without an environment use.
pub trait ConfigSource: Send + Sync {
    /// Returns the value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads configuration from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed configuration values.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    vars: HashMap<String, String>,
}

impl StaticConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Resolved API key and base URL for a single call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    base_url: String,
}

impl Credentials {
    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the chat completions endpoint under the base URL.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolves credentials from caller-supplied values, falling back to `config`.
///
/// Empty or whitespace-only values count as absent. Fails with
/// [`VisionError::Credential`] when no key is available anywhere.
pub fn resolve_credentials(
    api_key: Option<&str>,
    base_url: Option<&str>,
    config: &dyn ConfigSource,
) -> Result<Credentials> {
    let api_key = non_empty(api_key)
        .or_else(|| non_empty(config.var(API_KEY_ENV).as_deref()))
        .ok_or_else(|| {
            VisionError::Credential(format!(
                "API key not provided and {API_KEY_ENV} environment variable not set"
            ))
        })?;

    let base_url = non_empty(base_url)
        .or_else(|| non_empty(config.var(BASE_URL_ENV).as_deref()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(Credentials {
        api_key,
        base_url: base_url.trim_end_matches('/').to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_caller_key_takes_precedence() {
        let config = StaticConfig::new().with(API_KEY_ENV, "xai-env");
        let creds = resolve_credentials(Some("xai-caller"), None, &config).unwrap();
        assert_eq!(creds.api_key(), "xai-caller");
    }

    #[test]
    fn test_falls_back_to_env_key() {
        let config = StaticConfig::new().with(API_KEY_ENV, "xai-env");
        let creds = resolve_credentials(Some("  "), None, &config).unwrap();
        assert_eq!(creds.api_key(), "xai-env");

        let creds = resolve_credentials(None, None, &config).unwrap();
        assert_eq!(creds.api_key(), "xai-env");
    }

    #[test]
    fn test_missing_key_is_credential_error() {
        let config = StaticConfig::new().with(API_KEY_ENV, "");
        let err = resolve_credentials(Some(""), None, &config).unwrap_err();
        assert!(matches!(err, VisionError::Credential(_)));
        assert!(err.to_string().contains("API key not provided"));
    }

    #[test]
    fn test_base_url_chain() {
        let empty = StaticConfig::new();
        let creds = resolve_credentials(Some("k"), None, &empty).unwrap();
        assert_eq!(creds.base_url(), DEFAULT_BASE_URL);

        let config = StaticConfig::new().with(BASE_URL_ENV, "https://proxy.local/v1/");
        let creds = resolve_credentials(Some("k"), None, &config).unwrap();
        assert_eq!(creds.base_url(), "https://proxy.local/v1");
        assert_eq!(
            creds.chat_completions_url(),
            "https://proxy.local/v1/chat/completions"
        );

        let creds = resolve_credentials(Some("k"), Some("http://127.0.0.1:9000"), &config).unwrap();
        assert_eq!(creds.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = resolve_credentials(Some("xai-secret"), None, &StaticConfig::new()).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("xai-secret"));
        assert!(debug.contains("redacted"));
    }

    struct ChangingConfig(Mutex<Option<String>>);

    impl ConfigSource for ChangingConfig {
        fn var(&self, name: &str) -> Option<String> {
            (name == API_KEY_ENV)
                .then(|| self.0.lock().unwrap().clone())
                .flatten()
        }
    }

    #[test]
    fn test_resolution_sees_config_changes() {
        let config = ChangingConfig(Mutex::new(Some("first".into())));
        assert_eq!(
            resolve_credentials(None, None, &config).unwrap().api_key(),
            "first"
        );

        *config.0.lock().unwrap() = Some("second".into());
        assert_eq!(
            resolve_credentials(None, None, &config).unwrap().api_key(),
            "second"
        );

        *config.0.lock().unwrap() = None;
        assert!(resolve_credentials(None, None, &config).is_err());
    }
}
