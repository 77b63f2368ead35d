//! Configuration types for drawddl translation.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining schema and output settings.
//! - [`SchemaConfig`] - Controls how row labels become columns.
//! - [`OutputConfig`] - Controls the layout of the generated SQL.
//!
//! # Example
//!
//! ```
//! # use drawddl::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.schema().default_column_type(), "VARCHAR(255)");
//! assert_eq!(config.output().indent(), 4);
//! ```

use serde::Deserialize;

use drawddl_parser::extract::DEFAULT_COLUMN_TYPE;

/// Column indentation used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Schema extraction section.
    #[serde(default)]
    schema: SchemaConfig,

    /// SQL output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `schema` - Schema extraction settings.
    /// * `output` - SQL output settings.
    pub fn new(schema: SchemaConfig, output: OutputConfig) -> Self {
        Self { schema, output }
    }

    /// Returns the schema configuration.
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// How row labels are turned into columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Type given to columns whose label names no type.
    #[serde(default = "default_column_type")]
    default_column_type: String,
}

impl SchemaConfig {
    pub fn new(default_column_type: impl Into<String>) -> Self {
        Self {
            default_column_type: default_column_type.into(),
        }
    }

    pub fn default_column_type(&self) -> &str {
        &self.default_column_type
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_TYPE)
    }
}

/// Layout of the generated SQL.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of spaces before each column definition.
    #[serde(default = "default_indent")]
    indent: usize,
}

impl OutputConfig {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

fn default_column_type() -> String {
    DEFAULT_COLUMN_TYPE.to_string()
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}
