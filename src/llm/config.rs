//! Chat-completion endpoint settings read from the environment

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OpenAI API key not found. Set OPENAI_API_KEY in the environment or a .env file.")]
    MissingApiKey,
}

#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = read("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_url: read("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: read("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: REQUEST_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = LlmConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = LlmConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_URL", "http://localhost:8080/v1/chat/completions"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        assert_eq!(
            LlmConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            LlmConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = LlmConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
