//! Relational schema model extracted from an entity-relationship diagram.
//!
//! These types are the output of the extraction stage and the input of the
//! SQL synthesizer. They carry no diagram styling, only what is needed to
//! emit DDL.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram document
//!     ↓ loader
//! Diagram nodes (arena + id index)
//!     ↓ classify + extract
//! Schema (these types)
//!     ↓ resolve
//! ErModel (schema + resolved relationships)
//!     ↓ export
//! SQL text
//! ```

use indexmap::IndexMap;
use log::debug;

use crate::identifier::Id;

/// Key marker of a column.
///
/// A column is at most one of primary or foreign key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Foreign,
}

/// One field of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    data_type: String,
    key_role: KeyRole,
}

impl Column {
    /// Creates a column.
    ///
    /// # Arguments
    ///
    /// * `name` - Column name as written in the diagram.
    /// * `data_type` - SQL type text, emitted verbatim.
    /// * `key_role` - Primary/foreign key marker.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, key_role: KeyRole) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            key_role,
        }
    }

    /// Get the column name as written in the row label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the SQL type, or the configured default when the label had none.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Get the key role of this column.
    pub fn key_role(&self) -> KeyRole {
        self.key_role
    }

    /// Whether this column is part of the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.key_role == KeyRole::Primary
    }

    /// Whether this column references another table.
    pub fn is_foreign_key(&self) -> bool {
        self.key_role == KeyRole::Foreign
    }
}

/// A schema entity built from one table shape.
///
/// Primary and foreign key column lists are projections of [`Table::columns`]
/// and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    owner: Id,
}

impl Table {
    /// Creates an empty table owned by the diagram node `owner`.
    pub fn new(name: impl Into<String>, owner: Id) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            owner,
        }
    }

    /// Returns the table name (the table shape's label).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the diagram node this table was built from.
    pub fn owner(&self) -> Id {
        self.owner
    }

    /// Returns columns in diagram row order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Appends a column after the existing ones.
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Names of primary-key columns, in column order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|column| column.is_primary_key())
            .map(Column::name)
    }

    /// Names of foreign-key columns, in column order.
    pub fn foreign_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|column| column.is_foreign_key())
            .map(Column::name)
    }

    /// First primary-key column name, if the table has one.
    pub fn first_primary_key(&self) -> Option<&str> {
        self.primary_key_columns().next()
    }

    pub fn has_foreign_keys(&self) -> bool {
        self.foreign_key_columns().next().is_some()
    }
}

/// A directed relationship edge between two diagram nodes, before its
/// endpoints are mapped to tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    edge: Id,
    source: Option<Id>,
    target: Option<Id>,
}

impl Relationship {
    /// Creates a relationship for edge node `edge`.
    ///
    /// Either endpoint may be missing in the diagram; such relationships
    /// never resolve.
    pub fn new(edge: Id, source: Option<Id>, target: Option<Id>) -> Self {
        Self {
            edge,
            source,
            target,
        }
    }

    pub fn edge(&self) -> Id {
        self.edge
    }

    pub fn source(&self) -> Option<Id> {
        self.source
    }

    pub fn target(&self) -> Option<Id> {
        self.target
    }
}

/// A relationship whose endpoints were both mapped to tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelationship {
    source_table: String,
    target_table: String,
}

impl ResolvedRelationship {
    pub fn new(source_table: impl Into<String>, target_table: impl Into<String>) -> Self {
        Self {
            source_table: source_table.into(),
            target_table: target_table.into(),
        }
    }

    /// The referenced table.
    pub fn source_table(&self) -> &str {
        &self.source_table
    }

    /// The referencing table, which receives the constraint.
    pub fn target_table(&self) -> &str {
        &self.target_table
    }
}

/// Tables and relationships accumulated during one translation.
///
/// Tables are keyed by name and kept in first-discovery order. Inserting a
/// table under an existing name replaces the earlier definition but keeps
/// its position.
///
/// # Examples
///
/// ```
/// use drawddl_core::{identifier::Id, schema::{Column, KeyRole, Schema, Table}};
///
/// let mut table = Table::new("Customer", Id::new("t1"));
/// table.push_column(Column::new("id", "INT", KeyRole::Primary));
///
/// let mut schema = Schema::new();
/// schema.insert_table(table);
///
/// assert_eq!(schema.table("Customer").and_then(|t| t.first_primary_key()), Some("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: IndexMap<String, Table>,
    relationships: Vec<Relationship>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table, returning the definition it replaced, if any.
    pub fn insert_table(&mut self, table: Table) -> Option<Table> {
        let replaced = self.tables.insert(table.name().to_string(), table);
        if let Some(previous) = &replaced {
            debug!(table = previous.name(), owner:% = previous.owner(); "Replaced table definition");
        }
        replaced
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns tables in first-discovery order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn push_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    /// Returns relationships in discovery order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

/// Extracted schema together with its resolved relationships; the complete
/// input of SQL synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErModel {
    schema: Schema,
    relationships: Vec<ResolvedRelationship>,
}

impl ErModel {
    pub fn new(schema: Schema, relationships: Vec<ResolvedRelationship>) -> Self {
        Self {
            schema,
            relationships,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Resolved relationships in discovery order.
    pub fn relationships(&self) -> &[ResolvedRelationship] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn customer() -> Table {
        let mut table = Table::new("Customer", Id::new("customer-node"));
        table.push_column(Column::new("id", "INT", KeyRole::Primary));
        table.push_column(Column::new("name", "VARCHAR(100)", KeyRole::None));
        table.push_column(Column::new("region_id", "INT", KeyRole::Foreign));
        table
    }

    #[test]
    fn test_column_key_flags_are_exclusive() {
        let pk = Column::new("id", "INT", KeyRole::Primary);
        let fk = Column::new("ref", "INT", KeyRole::Foreign);
        let plain = Column::new("note", "TEXT", KeyRole::None);

        assert!(pk.is_primary_key() && !pk.is_foreign_key());
        assert!(fk.is_foreign_key() && !fk.is_primary_key());
        assert!(!plain.is_primary_key() && !plain.is_foreign_key());
    }

    #[test]
    fn test_table_key_projections() {
        let table = customer();

        assert_eq!(table.primary_key_columns().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(
            table.foreign_key_columns().collect::<Vec<_>>(),
            vec!["region_id"]
        );
        assert_eq!(table.first_primary_key(), Some("id"));
        assert!(table.has_foreign_keys());
    }

    #[test]
    fn test_table_without_keys() {
        let table = Table::new("Empty", Id::new("empty-node"));

        assert_eq!(table.first_primary_key(), None);
        assert!(!table.has_foreign_keys());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_schema_keeps_first_position_on_overwrite() {
        let mut schema = Schema::new();
        schema.insert_table(Table::new("A", Id::new("a1")));
        schema.insert_table(Table::new("B", Id::new("b1")));

        let replaced = schema.insert_table(Table::new("A", Id::new("a2")));

        assert_eq!(replaced.map(|t| t.owner()), Some(Id::new("a1")));
        let names: Vec<_> = schema.tables().map(Table::name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(schema.table("A").map(Table::owner), Some(Id::new("a2")));
        assert_eq!(schema.table_count(), 2);
    }

    #[test]
    fn test_schema_relationships_keep_order() {
        let mut schema = Schema::new();
        schema.push_relationship(Relationship::new(Id::new("e1"), Some(Id::new("x")), None));
        schema.push_relationship(Relationship::new(
            Id::new("e2"),
            Some(Id::new("y")),
            Some(Id::new("z")),
        ));

        let edges: Vec<_> = schema.relationships().iter().map(|r| r.edge()).collect();
        assert_eq!(edges, vec![Id::new("e1"), Id::new("e2")]);
    }

    fn key_role() -> impl Strategy<Value = KeyRole> {
        prop_oneof![
            Just(KeyRole::None),
            Just(KeyRole::Primary),
            Just(KeyRole::Foreign),
        ]
    }

    proptest! {
        #[test]
        fn prop_key_columns_are_projections(roles in proptest::collection::vec(key_role(), 0..12)) {
            let mut table = Table::new("T", Id::new("t"));
            for (idx, role) in roles.iter().enumerate() {
                table.push_column(Column::new(format!("c{idx}"), "INT", *role));
            }

            let expected_pk: Vec<String> = roles
                .iter()
                .enumerate()
                .filter(|(_, role)| **role == KeyRole::Primary)
                .map(|(idx, _)| format!("c{idx}"))
                .collect();
            let expected_fk: Vec<String> = roles
                .iter()
                .enumerate()
                .filter(|(_, role)| **role == KeyRole::Foreign)
                .map(|(idx, _)| format!("c{idx}"))
                .collect();

            prop_assert_eq!(table.primary_key_columns().collect::<Vec<_>>(), expected_pk);
            prop_assert_eq!(table.foreign_key_columns().collect::<Vec<_>>(), expected_fk);
        }
    }
}
