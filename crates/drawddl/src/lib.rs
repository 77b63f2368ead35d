//! drawddl - Translate draw.io entity-relationship diagrams into SQL DDL.
//!
//! Tables drawn with the draw.io ER shapes become `CREATE TABLE` statements;
//! relationship edges between them become foreign-key constraints.

pub mod config;

mod error;
mod export;

pub use drawddl_core::{identifier, schema};
pub use drawddl_parser::error::ErrorKind;

pub use error::DrawDdlError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use drawddl_core::schema::ErModel;
use drawddl_parser::ExtractConfig;

use config::AppConfig;
use export::{Exporter, sql::SqlExporter};

/// Builder for translating diagrams into SQL.
///
/// A builder holds only configuration, so one instance can translate any
/// number of documents.
///
/// # Examples
///
/// ```rust,no_run
/// use drawddl::{DdlBuilder, config::AppConfig};
///
/// let builder = DdlBuilder::new(AppConfig::default());
///
/// // Parse a document into a model, then render it
/// let source = std::fs::read_to_string("schema.drawio").expect("Failed to read");
/// let model = builder.parse(&source).expect("Failed to parse");
/// let sql = builder.render_sql(&model);
///
/// // Or go straight from a path to SQL
/// let sql = DdlBuilder::default()
///     .translate_file("schema.drawio")
///     .expect("Failed to translate");
/// ```
#[derive(Default)]
pub struct DdlBuilder {
    config: AppConfig,
}

impl DdlBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Schema and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a diagram document into an [`ErModel`].
    ///
    /// Loads the markup, extracts tables and columns, and resolves which
    /// tables each relationship edge connects.
    ///
    /// # Errors
    ///
    /// Returns [`DrawDdlError::Parse`] for malformed markup or table rows
    /// missing their cells. Edges that do not connect two tables are not
    /// errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawddl::DdlBuilder;
    ///
    /// let source = r#"<mxGraphModel><root>
    ///     <mxCell id="t" value="Tag" style="shape=table;" parent="1"/>
    /// </root></mxGraphModel>"#;
    ///
    /// let model = DdlBuilder::default().parse(source).expect("Failed to parse");
    /// assert!(model.schema().contains_table("Tag"));
    /// ```
    pub fn parse(&self, source: &str) -> Result<ErModel, DrawDdlError> {
        info!("Parsing diagram");

        let extract_config = ExtractConfig::new(self.config.schema().default_column_type());

        let model = drawddl_parser::parse(source, &extract_config)
            .map_err(|err| DrawDdlError::new_parse_error(err, source))?;

        debug!("Diagram parsed successfully");
        trace!(model:?; "Parsed model");

        Ok(model)
    }

    /// Render a model as SQL DDL.
    ///
    /// `CREATE TABLE` statements come first in table discovery order, then
    /// the foreign-key constraints, all separated by one blank line.
    pub fn render_sql(&self, model: &ErModel) -> String {
        SqlExporter::new(self.config.output().indent()).export_model(model)
    }

    /// Parse and render in one step.
    ///
    /// # Errors
    ///
    /// See [`DdlBuilder::parse`].
    pub fn translate(&self, source: &str) -> Result<String, DrawDdlError> {
        let model = self.parse(source)?;
        Ok(self.render_sql(&model))
    }

    /// Read a diagram document from `path` and translate it.
    ///
    /// # Errors
    ///
    /// Returns [`DrawDdlError::Io`] when the file cannot be read. A file that
    /// is not UTF-8 is a [`DrawDdlError::Parse`] syntax error pointing at the
    /// first invalid byte. Otherwise see [`DdlBuilder::parse`].
    pub fn translate_file(&self, path: impl AsRef<Path>) -> Result<String, DrawDdlError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Reading diagram");

        let bytes = fs::read(path)?;
        let source = drawddl_parser::loader::decode(&bytes).map_err(|err| {
            DrawDdlError::new_parse_error(err, String::from_utf8_lossy(&bytes))
        })?;
        self.translate(source)
    }
}
