//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the NOTAM API client id.
pub const ENV_CLIENT_ID: &str = "FAA_ID";

/// Environment variable holding the NOTAM API client secret.
pub const ENV_CLIENT_SECRET: &str = "FAA_KEY";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides and the command-line bind address, then validate.
pub fn load_config(
    path: Option<&Path>,
    bind_address: Option<String>,
) -> Result<ProxyConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };

    let mut config = apply_env_overrides(config, |key| std::env::var(key).ok());
    if let Some(bind_address) = bind_address {
        config.listener.bind_address = bind_address;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document without validating it.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay credentials from the environment. Empty variables are ignored.
pub fn apply_env_overrides<F>(mut config: ProxyConfig, lookup: F) -> ProxyConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup(ENV_CLIENT_ID).filter(|v| !v.is_empty()) {
        config.notam.client_id = id;
    }
    if let Some(secret) = lookup(ENV_CLIENT_SECRET).filter(|v| !v.is_empty()) {
        config.notam.client_secret = secret;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_credentials() {
        let config = parse_config(
            r#"
            [notam]
            client_id = "from-file"
            client_secret = "file-secret"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [("FAA_KEY", "env-secret"), ("FAA_ID", "")].into();
        let config = apply_env_overrides(config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.notam.client_id, "from-file");
        assert_eq!(config.notam.client_secret, "env-secret");
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../aviation-proxy.example.toml")).unwrap();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[timeouts]\nupstream_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/aviation-proxy.toml");
        let err = load_config(Some(path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bind_override_is_validated() {
        let config = load_config(None, Some("127.0.0.1:7070".into())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:7070");

        let err = load_config(None, Some("not-an-address".into())).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(
                errors,
                vec![ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "not-an-address".into(),
                }]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroTimeout {
                field: "timeouts.connect_secs",
            },
            ValidationError::ZeroTimeout {
                field: "timeouts.request_secs",
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.connect_secs: must be greater than zero, \
             timeouts.request_secs: must be greater than zero"
        );
    }
}
