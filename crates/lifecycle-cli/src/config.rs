//! CLI configuration.
//!
//! Layered: built-in defaults, then an optional YAML file (`--config`), then
//! environment variables. Command-line flags are applied last by the
//! subcommands themselves.
//!
//! Variables:
//! - `LIFECYCLE_MAX_INPUT_BYTES` (default: 1048576)
//! - `LIFECYCLE_OUTPUT_FORMAT` (`xml` or `json`, default: `xml`)

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Environment variable overriding [`CliConfig::max_input_bytes`].
pub const ENV_MAX_INPUT_BYTES: &str = "LIFECYCLE_MAX_INPUT_BYTES";
/// Environment variable overriding [`CliConfig::output_format`].
pub const ENV_OUTPUT_FORMAT: &str = "LIFECYCLE_OUTPUT_FORMAT";

const DEFAULT_MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// Output encoding for `normalize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact `<Transition>` markup.
    #[default]
    Xml,
    /// JSON object keyed by element name.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: ENV_OUTPUT_FORMAT.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Inputs larger than this are rejected before decoding.
    pub max_input_bytes: u64,
    /// Default output encoding for `normalize`.
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            output_format: OutputFormat::Xml,
        }
    }
}

impl CliConfig {
    /// Load defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a YAML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_INPUT_BYTES) {
            self.max_input_bytes =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_MAX_INPUT_BYTES.to_string(),
                        value: raw.clone(),
                    })?;
        }
        if let Some(raw) = lookup(ENV_OUTPUT_FORMAT) {
            self.output_format = raw.parse()?;
        }
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.max_input_bytes, 1024 * 1024);
        assert_eq!(cfg.output_format, OutputFormat::Xml);
    }

    #[test]
    fn yaml_partial_keeps_defaults() {
        let cfg = CliConfig::from_yaml("output_format: json\n").unwrap();
        assert_eq!(cfg.output_format, OutputFormat::Json);
        assert_eq!(cfg.max_input_bytes, 1024 * 1024);
    }

    #[test]
    fn yaml_empty_is_default() {
        assert_eq!(CliConfig::from_yaml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn yaml_unknown_key_rejected() {
        assert!(matches!(
            CliConfig::from_yaml("max_bytes: 10\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_overrides_file() {
        let cfg = CliConfig::from_yaml("max_input_bytes: 10\noutput_format: xml\n")
            .unwrap()
            .with_env_overrides(env(&[
                (ENV_MAX_INPUT_BYTES, "2048"),
                (ENV_OUTPUT_FORMAT, "JSON"),
            ]))
            .unwrap();
        assert_eq!(cfg.max_input_bytes, 2048);
        assert_eq!(cfg.output_format, OutputFormat::Json);
    }

    #[test]
    fn env_rejects_bad_values() {
        assert!(matches!(
            CliConfig::default().with_env_overrides(env(&[(ENV_MAX_INPUT_BYTES, "lots")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CliConfig::default().with_env_overrides(env(&[(ENV_OUTPUT_FORMAT, "yaml")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle.yaml");
        std::fs::write(&path, "output_format: [nope]\n").unwrap();
        let err = CliConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("lifecycle.yaml"));
    }

    #[test]
    fn from_file_missing() {
        assert!(matches!(
            CliConfig::from_file(Path::new("/nonexistent/lifecycle.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
