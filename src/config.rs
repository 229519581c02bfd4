use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid { name: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Mailbox size of each resource actor.
    pub actor_buffer_size: usize,
    /// Upper bound on every catalog call.
    pub catalog_timeout: Duration,
    /// Load demo products into the in-memory catalog at startup.
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            actor_buffer_size: 32,
            catalog_timeout: Duration::from_millis(2000),
            seed_catalog: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // Load .env file if present
        let config = Self::from_lookup(|name| env::var(name).ok())?;
        tracing::info!(?config, "Application configuration loaded");
        Ok(config)
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let actor_buffer_size = match lookup("ACTOR_BUFFER_SIZE") {
            Some(value) => match value.trim().parse::<usize>().map_err(|e| e.to_string()) {
                Ok(0) => return Err(invalid("ACTOR_BUFFER_SIZE", value, "must be at least 1".to_string())),
                Ok(size) => size,
                Err(reason) => return Err(invalid("ACTOR_BUFFER_SIZE", value, reason)),
            },
            None => defaults.actor_buffer_size,
        };

        let catalog_timeout = match lookup("CATALOG_TIMEOUT_MS") {
            Some(value) => match value.trim().parse::<u64>().map_err(|e| e.to_string()) {
                Ok(0) => return Err(invalid("CATALOG_TIMEOUT_MS", value, "must be at least 1".to_string())),
                Ok(millis) => Duration::from_millis(millis),
                Err(reason) => return Err(invalid("CATALOG_TIMEOUT_MS", value, reason)),
            },
            None => defaults.catalog_timeout,
        };

        let seed_catalog = match lookup("SEED_CATALOG") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .map_err(|e| invalid("SEED_CATALOG", value.clone(), e.to_string()))?,
            None => defaults.seed_catalog,
        };

        Ok(Self { actor_buffer_size, catalog_timeout, seed_catalog })
    }
}

fn invalid(name: &'static str, value: String, reason: String) -> ConfigError {
    ConfigError::Invalid { name, value, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ACTOR_BUFFER_SIZE", "8"),
            ("CATALOG_TIMEOUT_MS", "250"),
            ("SEED_CATALOG", "false"),
        ]))
        .unwrap();
        assert_eq!(config.actor_buffer_size, 8);
        assert_eq!(config.catalog_timeout, Duration::from_millis(250));
        assert!(!config.seed_catalog);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("CATALOG_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CATALOG_TIMEOUT_MS", .. }));

        let err = AppConfig::from_lookup(lookup(&[("ACTOR_BUFFER_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "ACTOR_BUFFER_SIZE", .. }));

        assert!(AppConfig::from_lookup(lookup(&[("SEED_CATALOG", "yes")])).is_err());
    }
}
