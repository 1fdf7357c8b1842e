//! Application configuration file.
//!
//! ```yaml
//! format: json        # table | json | csv
//! random_seed: 42     # sampling seed
//! row_limit: 1000     # maximum rows printed
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::cli::QueryArgs;
use crate::output::OutputFormat;
use cursor_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Settings loaded from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Settings handed to factories and operators
    #[serde(flatten)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string. Empty input yields defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `query` flags on top of file values. Flags win when given.
    pub fn merge(&self, args: &QueryArgs) -> Self {
        let mut merged = self.clone();
        if let Some(format) = args.format {
            merged.format = format;
        }
        if let Some(seed) = args.seed {
            merged.engine.random_seed = Some(seed);
        }
        if let Some(limit) = args.limit {
            merged.engine.row_limit = Some(limit);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_yaml() {
        let config = AppConfig::from_yaml(
            r#"
format: csv
random_seed: 7
row_limit: 10
"#,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.engine.random_seed, Some(7));
        assert_eq!(config.engine.row_limit, Some(10));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = AppConfig::from_yaml("random_seed: 1\n").unwrap();
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.engine, EngineConfig::default().with_random_seed(1));

        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = AppConfig::from_yaml("format: [json");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));

        let result = AppConfig::from_yaml("format: xml\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    fn query_args(flags: &[&str]) -> QueryArgs {
        use crate::cli::{Cli, Commands};
        use clap::Parser;

        let argv = ["row-source", "query", "long_sequence(10)"]
            .into_iter()
            .chain(flags.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Query(args) => args,
            other => panic!("expected query command, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_flags_override_file() {
        let file = AppConfig::from_yaml("format: csv\nrandom_seed: 7\nrow_limit: 10\n").unwrap();

        let merged = file.merge(&query_args(&[
            "--seed", "42", "--limit", "3", "--format", "json",
        ]));
        assert_eq!(merged.format, OutputFormat::Json);
        assert_eq!(merged.engine.random_seed, Some(42));
        assert_eq!(merged.engine.row_limit, Some(3));
    }

    #[test]
    fn test_merge_falls_back_to_file() {
        let file = AppConfig::from_yaml("format: csv\nrandom_seed: 7\nrow_limit: 10\n").unwrap();

        let merged = file.merge(&query_args(&[]));
        assert_eq!(merged, file);

        let merged = AppConfig::default().merge(&query_args(&["--seed", "5"]));
        assert_eq!(merged.format, OutputFormat::Table);
        assert_eq!(merged.engine.random_seed, Some(5));
        assert_eq!(merged.engine.row_limit, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format: json").unwrap();
        writeln!(file, "row_limit: 3").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.engine.row_limit, Some(3));

        let missing = AppConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
