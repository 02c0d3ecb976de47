//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.quotegrouper.toml` files.

use crate::collector::fetch_loop::DEFAULT_ATTEMPTS;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".quotegrouper.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Quote API settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Quote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning a JSON list of quotes.
    #[serde(default = "default_url")]
    pub url: String,

    /// Number of requests made per run.
    #[serde(default = "default_attempts")]
    pub attempts: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            attempts: default_attempts(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://api.breakingbadquotes.xyz/v1/quotes/".to_string()
}

fn default_attempts() -> usize {
    DEFAULT_ATTEMPTS
}

fn default_timeout() -> u64 {
    100
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the grouped quotes are written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("GroupedQuotes.json")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load `.quotegrouper.toml` from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only arguments that were actually given override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.url {
            self.source.url = url.clone();
        }
        if let Some(attempts) = args.attempts {
            self.source.attempts = attempts;
        }
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }
        if let Some(ref output) = args.output {
            self.output.path = output.clone();
        }
    }

    /// Check the merged settings.
    pub fn validate(&self) -> Result<()> {
        if !self.source.url.starts_with("http://") && !self.source.url.starts_with("https://") {
            bail!("Quote API URL must start with 'http://' or 'https://'");
        }
        if self.source.attempts == 0 {
            bail!("Attempts must be at least 1");
        }
        if self.source.timeout_seconds == 0 {
            bail!("Timeout must be at least 1 second");
        }
        if self.output.path.as_os_str().is_empty() {
            bail!("Output path must not be empty");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.url, "https://api.breakingbadquotes.xyz/v1/quotes/");
        assert_eq!(config.source.attempts, 172);
        assert_eq!(config.output.path, PathBuf::from("GroupedQuotes.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[source]
url = "http://localhost:8080/quotes"
attempts = 5

[output]
path = "out/quotes.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.url, "http://localhost:8080/quotes");
        assert_eq!(config.source.attempts, 5);
        assert_eq!(config.source.timeout_seconds, 100);
        assert_eq!(config.output.path, PathBuf::from("out/quotes.json"));
    }

    #[test]
    fn test_merge_only_overrides_given_args() {
        let mut config = Config::default();
        config.source.attempts = 10;

        let args = Args::parse_from(["quotegrouper", "--output", "custom.json"]);
        config.merge_with_args(&args);

        assert_eq!(config.source.attempts, 10);
        assert_eq!(config.output.path, PathBuf::from("custom.json"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.source.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_round_trips() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[output]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
