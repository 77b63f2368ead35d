//! SQL DDL synthesis.
//!
//! Emits one `CREATE TABLE` statement per table in first-discovery order,
//! followed by the `ALTER TABLE ... FOREIGN KEY` constraints of the resolved
//! relationships. Statements are separated by one blank line.

use log::{debug, info, warn};

use drawddl_core::schema::{Column, ErModel, ResolvedRelationship, Schema, Table};

use super::Exporter;

const STATEMENT_SEPARATOR: &str = "\n\n";

/// Renders an [`ErModel`] as SQL DDL text.
#[derive(Debug, Clone)]
pub struct SqlExporter {
    indent: String,
}

impl SqlExporter {
    /// Creates an exporter indenting column lines by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            indent: " ".repeat(indent),
        }
    }

    /// Renders the `CREATE TABLE` statement of `table`.
    ///
    /// Columns keep their order; every line but the last ends with a comma.
    /// A table without columns has an empty body line.
    pub fn create_table(&self, table: &Table) -> String {
        let body = table
            .columns()
            .iter()
            .map(|column| self.column_definition(column))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("CREATE TABLE {} (\n{body}\n);", table.name())
    }

    /// Renders the foreign-key constraints one relationship contributes.
    ///
    /// The target table receives one constraint per foreign-key column, each
    /// referencing the source table's first primary-key column. Nothing is
    /// emitted when the target has no foreign-key columns.
    pub fn foreign_key_constraints(
        &self,
        schema: &Schema,
        relationship: &ResolvedRelationship,
    ) -> Vec<String> {
        let source = relationship.source_table();
        let target = relationship.target_table();

        let Some(target_table) = schema.table(target) else {
            debug!(table = target; "Relationship target is not in the schema");
            return Vec::new();
        };
        if !target_table.has_foreign_keys() {
            return Vec::new();
        }

        let referenced = match schema.table(source).and_then(Table::first_primary_key) {
            Some(column) => column,
            None => {
                warn!(
                    source_table = source,
                    target_table = target;
                    "Referenced table has no primary key; constraint names no column"
                );
                ""
            }
        };

        target_table
            .foreign_key_columns()
            .map(|column| {
                format!(
                    "ALTER TABLE {target}\n\
                     ADD CONSTRAINT fk_{target}_{source}\n\
                     FOREIGN KEY ({column}) REFERENCES {source}({referenced});"
                )
            })
            .collect()
    }

    fn column_definition(&self, column: &Column) -> String {
        let mut line = format!("{}{} {}", self.indent, column.name(), column.data_type());
        if column.is_primary_key() {
            line.push_str(" PRIMARY KEY");
        }
        line
    }
}

impl Default for SqlExporter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_INDENT)
    }
}

impl Exporter for SqlExporter {
    fn export_model(&self, model: &ErModel) -> String {
        let schema = model.schema();

        let tables = schema.tables().map(|table| self.create_table(table));
        let constraints: Vec<String> = model
            .relationships()
            .iter()
            .flat_map(|relationship| self.foreign_key_constraints(schema, relationship))
            .collect();

        info!(
            tables_count = schema.table_count(),
            constraints_count = constraints.len();
            "SQL synthesized"
        );

        tables
            .chain(constraints)
            .collect::<Vec<_>>()
            .join(STATEMENT_SEPARATOR)
    }
}
