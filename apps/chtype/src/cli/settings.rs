//! # Settings
//!
//! Layered configuration: built-in defaults, then `~/.chtype/config.toml` when it
//! exists, then `CHTYPE_`-prefixed environment variables using `__` to separate
//! nested keys:
//!
//! ```toml
//! [logger]
//! level = "Debug"
//! format = "Json"
//!
//! [output]
//! format = "tree"
//! no_ansi = true
//! ```
//!
//! is equivalent to `CHTYPE_LOGGER__LEVEL=Debug CHTYPE_OUTPUT__FORMAT=tree ...`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::logger::LoggerSettings;
use super::routines::render::OutputFormat;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "CHTYPE";
const USER_DIRECTORY: &str = ".chtype";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub no_ansi: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub logger: LoggerSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// `~/.chtype`, or `None` when the home directory cannot be determined
pub fn user_directory() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(USER_DIRECTORY))
}

pub fn config_path() -> Option<PathBuf> {
    user_directory().map(|dir| dir.join(CONFIG_FILE))
}

pub fn read_settings() -> Result<Settings, ConfigError> {
    build_settings(config_path().as_deref())
}

/// Reads the optional file at `path` overlaid with the environment.
/// Without a path only defaults and the environment apply.
fn build_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }

    builder
        .add_source(
            Environment::with_prefix(ENVIRONMENT_VARIABLE_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::logger::{LogFormat, LoggerLevel};
    use assert_fs::prelude::*;
    use serial_test::serial;

    fn clear_env() {
        for (key, _) in std::env::vars() {
            if key.starts_with("CHTYPE_") {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial(settings_env)]
    fn test_defaults_when_file_missing() {
        clear_env();
        let temp = assert_fs::TempDir::new().unwrap();
        let settings = build_settings(Some(&temp.path().join(CONFIG_FILE))).unwrap();

        assert_eq!(settings.output.format, OutputFormat::Canonical);
        assert!(!settings.output.no_ansi);
        assert_eq!(settings.logger.level, LoggerLevel::Warn);
    }

    #[test]
    #[serial(settings_env)]
    fn test_reads_config_file() {
        clear_env();
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child(CONFIG_FILE);
        file.write_str(
            r#"
[logger]
level = "Debug"
format = "Json"

[output]
format = "tree"
no_ansi = true
"#,
        )
        .unwrap();

        let settings = build_settings(Some(file.path())).unwrap();
        assert_eq!(settings.logger.level, LoggerLevel::Debug);
        assert_eq!(settings.logger.format, LogFormat::Json);
        assert_eq!(settings.output.format, OutputFormat::Tree);
        assert!(settings.output.no_ansi);
    }

    #[test]
    #[serial(settings_env)]
    fn test_environment_overrides_file() {
        clear_env();
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child(CONFIG_FILE);
        file.write_str("[output]\nformat = \"tree\"\n").unwrap();

        std::env::set_var("CHTYPE_OUTPUT__FORMAT", "json");
        std::env::set_var("CHTYPE_LOGGER__LEVEL", "error");
        let settings = build_settings(Some(file.path()));
        clear_env();

        let settings = settings.unwrap();
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.logger.level, LoggerLevel::Error);
    }

    #[test]
    #[serial(settings_env)]
    fn test_no_config_file_without_home_directory() {
        clear_env();
        let settings = build_settings(None).unwrap();
        assert_eq!(settings.output.format, OutputFormat::Canonical);
        assert_eq!(settings.logger.level, LoggerLevel::Warn);

        std::env::set_var("CHTYPE_OUTPUT__FORMAT", "tree");
        let settings = build_settings(None);
        clear_env();
        assert_eq!(settings.unwrap().output.format, OutputFormat::Tree);
    }

    #[test]
    #[serial(settings_env)]
    fn test_invalid_value_is_an_error() {
        clear_env();
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child(CONFIG_FILE);
        file.write_str("[output]\nformat = \"yaml\"\n").unwrap();

        assert!(build_settings(Some(file.path())).is_err());
    }
}
