//! Schema extraction: classified diagram nodes to a [`Schema`].
//!
//! Extraction runs in two passes over the document:
//!
//! 1. Register every table shape (by label) and every relationship edge, in
//!    document order.
//! 2. For each registered table, read its rows. A row's first child cell is
//!    the key indicator, its second child cell the `<name> [type...]` label.
//!
//! Rows with missing cells are fatal. All broken rows are collected and
//! reported together.

use log::{debug, info, trace, warn};

use drawddl_core::{
    identifier::Id,
    schema::{Column, KeyRole, Relationship, Schema, Table},
};

use crate::{
    classify::{Classification, ShapeKind},
    document::{DiagramDocument, DiagramNode},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
};

/// Column type used when a row label has no type tokens.
pub const DEFAULT_COLUMN_TYPE: &str = "VARCHAR(255)";

/// Indicator-cell marker for primary-key rows.
const PRIMARY_KEY_MARK: &str = "PK";

/// Configuration for the extraction phase.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    default_column_type: String,
}

impl ExtractConfig {
    pub fn new(default_column_type: impl Into<String>) -> Self {
        Self {
            default_column_type: default_column_type.into(),
        }
    }

    pub fn default_column_type(&self) -> &str {
        &self.default_column_type
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_TYPE)
    }
}

/// Builds a [`Schema`] from a loaded document.
pub struct Extractor<'a> {
    cfg: &'a ExtractConfig,
    document: &'a DiagramDocument,
    classification: Classification,
}

impl<'a> Extractor<'a> {
    pub fn new(cfg: &'a ExtractConfig, document: &'a DiagramDocument) -> Self {
        Self {
            cfg,
            document,
            classification: Classification::new(document),
        }
    }

    /// Runs both extraction passes.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] with one structural diagnostic per broken
    /// row when any row lacks its cells or its label.
    pub fn extract(self) -> Result<Schema, ParseError> {
        let mut schema = self.register_shapes();
        info!(
            tables_count = schema.table_count(),
            relationships_count = schema.relationships().len(),
            row_shapes_count = self.classification.count(ShapeKind::Row);
            "Registered diagram shapes"
        );

        let mut collector = DiagnosticCollector::new();
        let tables: Vec<(String, _)> = schema
            .tables()
            .map(|table| (table.name().to_string(), table.owner()))
            .collect();

        for (name, owner) in tables {
            let columns = self.read_columns(&name, owner, &mut collector);
            if let Some(table) = schema.table_mut(&name) {
                for column in columns {
                    table.push_column(column);
                }
                debug!(table = name.as_str(), columns_count = table.columns().len(); "Extracted table");
            }
        }

        collector.finish()?;
        trace!(schema:?; "Extracted schema");
        Ok(schema)
    }

    fn register_shapes(&self) -> Schema {
        let mut schema = Schema::new();

        for (idx, node) in self.document.nodes().iter().enumerate() {
            match self.classification.kind(idx) {
                Some(ShapeKind::Table) => {
                    let name = node.value().unwrap_or_default();
                    if schema.insert_table(Table::new(name, node.id())).is_some() {
                        warn!(
                            table = name,
                            node:% = node.id();
                            "Duplicate table name; the later definition replaces the earlier one"
                        );
                    }
                }
                Some(ShapeKind::RelationshipEdge) => {
                    schema.push_relationship(Relationship::new(
                        node.id(),
                        node.source(),
                        node.target(),
                    ));
                }
                _ => {}
            }
        }

        schema
    }

    fn read_columns(
        &self,
        table_name: &str,
        owner: Id,
        collector: &mut DiagnosticCollector,
    ) -> Vec<Column> {
        let table_node = self.document.node(owner);
        let mut columns = Vec::new();

        for row in self.rows(owner) {
            match self.read_row(row) {
                Ok(column) => columns.push(column),
                Err(diag) => {
                    let diag = match table_node {
                        Some(table) => {
                            diag.context(table.span(), format!("in table `{table_name}`"))
                        }
                        None => diag,
                    };
                    collector.emit(diag);
                }
            }
        }

        columns
    }

    /// Row-classified children of a table, in document order.
    fn rows(&self, owner: Id) -> Vec<&'a DiagramNode> {
        self.document
            .child_indices(owner)
            .filter(|&idx| self.classification.kind(idx) == Some(ShapeKind::Row))
            .filter_map(|idx| self.document.get(idx))
            .collect()
    }

    fn read_row(&self, row: &DiagramNode) -> Result<Column, Diagnostic> {
        let mut cells = self.document.children(row.id());

        let indicator = cells.next().ok_or_else(|| {
            Diagnostic::new(ErrorCode::E100, format!("table row `{}` has no cells", row.id()))
                .at(row.span(), "row defined here")
                .hint("a row needs a key indicator cell followed by a label cell")
        })?;

        let label = cells.next().ok_or_else(|| {
            Diagnostic::new(
                ErrorCode::E101,
                format!("table row `{}` has no label cell", row.id()),
            )
            .at(row.span(), "row defined here")
            .context(indicator.span(), "only this cell was found")
            .hint("add a second cell holding `<column name> [type]`")
        })?;

        let extra = cells.count();
        if extra > 0 {
            debug!(row:% = row.id(), extra_cells = extra; "Ignoring cells after the label cell");
        }

        let text = label.value().ok_or_else(|| {
            Diagnostic::new(
                ErrorCode::E102,
                format!("label cell `{}` of row `{}` has no value", label.id(), row.id()),
            )
            .at(label.span(), "label cell")
            .hint("set the cell text to `<column name> [type]`")
        })?;

        let (name, data_type) =
            split_label(text, self.cfg.default_column_type()).ok_or_else(|| {
                Diagnostic::new(
                    ErrorCode::E103,
                    format!("label cell `{}` of row `{}` is empty", label.id(), row.id()),
                )
                .at(label.span(), "no column name")
                .hint("set the cell text to `<column name> [type]`")
            })?;

        let key_role = indicator_role(indicator);
        trace!(column = name.as_str(), data_type = data_type.as_str(), key_role:?; "Read column");
        Ok(Column::new(name, data_type, key_role))
    }
}

/// Reads the key marker of a row from its indicator cell.
///
/// Only primary keys are recognized. Indicator cells never mark a column as
/// a foreign key, so extracted tables have no foreign-key columns.
pub fn indicator_role(cell: &DiagramNode) -> KeyRole {
    match cell.value() {
        Some(value) if value.trim().contains(PRIMARY_KEY_MARK) => KeyRole::Primary,
        _ => KeyRole::None,
    }
}

/// Splits a row label into column name and type.
///
/// The first whitespace-delimited token is the name; the remaining tokens,
/// joined by single spaces, are the type. Returns `None` for a blank label.
///
/// # Examples
///
/// ```
/// use drawddl_parser::extract::split_label;
///
/// assert_eq!(
///     split_label("  price   DECIMAL(10,2)  NOT NULL ", "VARCHAR(255)"),
///     Some(("price".to_string(), "DECIMAL(10,2) NOT NULL".to_string()))
/// );
/// assert_eq!(
///     split_label("name", "VARCHAR(255)"),
///     Some(("name".to_string(), "VARCHAR(255)".to_string()))
/// );
/// assert_eq!(split_label("   ", "VARCHAR(255)"), None);
/// ```
pub fn split_label(label: &str, default_type: &str) -> Option<(String, String)> {
    let mut tokens = label.split_whitespace();
    let name = tokens.next()?.to_string();
    let data_type = tokens.collect::<Vec<_>>().join(" ");

    if data_type.is_empty() {
        Some((name, default_type.to_string()))
    } else {
        Some((name, data_type))
    }
}
