use thiserror::Error;

pub const METRICS_ENABLED_ENV: &str = "HELLO_METRICS_ENABLED";
pub const METRICS_NAMESPACE_ENV: &str = "HELLO_METRICS_NAMESPACE";
pub const ENVIRONMENT_ENV: &str = "DEPLOYMENT_ENVIRONMENT";

pub const DEFAULT_METRICS_NAMESPACE: &str = "HelloWorldLambda";
pub const DEFAULT_ENVIRONMENT: &str = "dev";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a boolean (true/false/1/0/yes/no/on/off), got '{value}'")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} cannot be empty")]
    Empty { key: &'static str },
}

/// Cold-start configuration read once from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub metrics_enabled: bool,
    pub metrics_namespace: String,
    pub environment: String,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_namespace: DEFAULT_METRICS_NAMESPACE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let metrics_enabled = match lookup(METRICS_ENABLED_ENV) {
            Some(value) => parse_bool(METRICS_ENABLED_ENV, &value)?,
            None => defaults.metrics_enabled,
        };
        let metrics_namespace = non_empty(METRICS_NAMESPACE_ENV, lookup(METRICS_NAMESPACE_ENV))?
            .unwrap_or(defaults.metrics_namespace);
        let environment =
            non_empty(ENVIRONMENT_ENV, lookup(ENVIRONMENT_ENV))?.unwrap_or(defaults.environment);

        Ok(Self {
            metrics_enabled,
            metrics_namespace,
            environment,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn non_empty(key: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = LambdaConfig::from_lookup(lookup_from(&[])).expect("defaults should load");

        assert_eq!(config, LambdaConfig::default());
        assert!(config.metrics_enabled);
    }

    #[test]
    fn reads_all_overrides() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            (METRICS_ENABLED_ENV, "OFF"),
            (METRICS_NAMESPACE_ENV, " Custom/Hello "),
            (ENVIRONMENT_ENV, "prod"),
        ]))
        .expect("overrides should load");

        assert!(!config.metrics_enabled);
        assert_eq!(config.metrics_namespace, "Custom/Hello");
        assert_eq!(config.environment, "prod");
    }

    #[test]
    fn rejects_unparseable_flag() {
        let error = LambdaConfig::from_lookup(lookup_from(&[(METRICS_ENABLED_ENV, "maybe")]))
            .expect_err("flag should be rejected");

        assert_eq!(
            error,
            ConfigError::InvalidBool {
                key: METRICS_ENABLED_ENV,
                value: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn rejects_blank_environment_name() {
        let error = LambdaConfig::from_lookup(lookup_from(&[(ENVIRONMENT_ENV, "  ")]))
            .expect_err("blank value should be rejected");

        assert_eq!(error.to_string(), "DEPLOYMENT_ENVIRONMENT cannot be empty");
    }
}
