use std::env;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8000,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8000));
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[])),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8081/v1/"),
            ("OPENAI_MODEL", "local-model"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8081/v1");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 9000));
    }

    #[test]
    fn bad_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }
}
