//! Configuration file loading for the CLI
//!
//! This module handles finding, loading, and validating TOML configuration
//! files from various locations (explicit path, local directory, system
//! directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use drawddl::{DrawDdlError, config::AppConfig};

/// Largest accepted column indentation.
const MAX_INDENT: usize = 16;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for DrawDdlError {
    fn from(err: ConfigError) -> Self {
        DrawDdlError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (drawddl/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DrawDdlError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("drawddl/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "drawddl", "drawddl") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - Validation fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, DrawDdlError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;
    debug!(config:?; "Configuration loaded");

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.schema().default_column_type().trim().is_empty() {
        return Err(ConfigError::Validation(
            "schema.default_column_type must not be empty".to_string(),
        ));
    }

    let indent = config.output().indent();
    if indent > MAX_INDENT {
        return Err(ConfigError::Validation(format!(
            "output.indent must be at most {MAX_INDENT}, got {indent}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        (dir, path)
    }

    #[test]
    fn test_load_explicit_config() {
        let (_dir, path) = write_config(
            r#"
            [schema]
            default_column_type = "TEXT"

            [output]
            indent = 2
            "#,
        );

        let config = load_config(Some(&path)).expect("Failed to load config");

        assert_eq!(config.schema().default_column_type(), "TEXT");
        assert_eq!(config.output().indent(), 2);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(&err, DrawDdlError::Config(msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let (_dir, path) = write_config("[output]\nindent = \"wide\"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(&err, DrawDdlError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }

    #[test]
    fn test_indent_out_of_range() {
        let (_dir, path) = write_config("[output]\nindent = 40\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: Validation error: output.indent must be at most 16, got 40"
        );
    }

    #[test]
    fn test_blank_default_type() {
        let (_dir, path) = write_config("[schema]\ndefault_column_type = \"  \"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(&err, DrawDdlError::Config(msg) if msg.contains("default_column_type")));
    }
}
