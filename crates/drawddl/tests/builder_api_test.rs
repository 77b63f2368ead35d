//! Integration tests for the DdlBuilder API

use std::fs;

use drawddl::{
    DdlBuilder, DrawDdlError, ErrorKind,
    config::{AppConfig, OutputConfig, SchemaConfig},
    identifier::Id,
    schema::{Column, ErModel, KeyRole, ResolvedRelationship, Schema, Table},
};

const CUSTOMER_ORDER: &str = include_str!("../../../fixtures/customer_order.drawio");
const DUPLICATE_TABLES: &str = include_str!("../../../fixtures/duplicate_tables.drawio");
const EMPTY_TABLE: &str = include_str!("../../../fixtures/empty_table.drawio");
const MALFORMED: &str = include_str!("../../../fixtures/errors/malformed.drawio");
const MISSING_LABEL_VALUE: &str =
    include_str!("../../../fixtures/errors/missing_label_value.drawio");

#[test]
fn test_customer_order_has_no_constraints() {
    let sql = DdlBuilder::default()
        .translate(CUSTOMER_ORDER)
        .expect("Failed to translate");

    assert_eq!(
        sql,
        "CREATE TABLE Customer (\n    id INT PRIMARY KEY,\n    name VARCHAR(100)\n);\n\n\
         CREATE TABLE Order (\n    id INT PRIMARY KEY,\n    customer_id INT\n);"
    );
    assert!(!sql.contains("ALTER TABLE"));
}

#[test]
fn test_table_without_rows() {
    let sql = DdlBuilder::default()
        .translate(EMPTY_TABLE)
        .expect("Failed to translate");

    assert_eq!(sql, "CREATE TABLE Audit (\n\n);");
}

#[test]
fn test_duplicate_table_labels() {
    let sql = DdlBuilder::default()
        .translate(DUPLICATE_TABLES)
        .expect("Failed to translate");

    assert_eq!(sql.matches("CREATE TABLE Account").count(), 1);
    assert!(sql.starts_with(
        "CREATE TABLE Account (\n    id BIGINT PRIMARY KEY,\n    email VARCHAR(320) NOT NULL\n);"
    ));
    assert!(!sql.contains("legacy_id"));
    assert!(sql.ends_with("CREATE TABLE Product (\n    sku CHAR(12) PRIMARY KEY,\n    title VARCHAR(255)\n);"));
}

#[test]
fn test_missing_label_value_is_structural_error() {
    let err = DdlBuilder::default()
        .translate(MISSING_LABEL_VALUE)
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Structural));
    match err {
        DrawDdlError::Parse { src, .. } => assert_eq!(src, MISSING_LABEL_VALUE),
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_malformed_document_is_syntax_error() {
    let err = DdlBuilder::default().translate(MALFORMED).unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Syntax));
    assert!(err.to_string().starts_with("error[E001]"));
}

#[test]
fn test_translation_is_idempotent() {
    let builder = DdlBuilder::default();

    let first = builder.translate(CUSTOMER_ORDER).expect("Failed to translate");
    let second = builder.translate(CUSTOMER_ORDER).expect("Failed to translate");

    assert_eq!(first, second);
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(SchemaConfig::new("TEXT"), OutputConfig::new(2));
    let sql = DdlBuilder::new(config)
        .translate(DUPLICATE_TABLES)
        .expect("Failed to translate");

    assert!(sql.contains("\n  title TEXT\n"));
}

#[test]
fn test_translate_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("schema.drawio");
    fs::write(&path, CUSTOMER_ORDER).expect("Failed to write diagram");

    let builder = DdlBuilder::default();
    let from_file = builder.translate_file(&path).expect("Failed to translate");

    assert_eq!(
        from_file,
        builder.translate(CUSTOMER_ORDER).expect("Failed to translate")
    );
}

#[test]
fn test_translate_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");

    let err = DdlBuilder::default()
        .translate_file(dir.path().join("missing.drawio"))
        .unwrap_err();

    assert!(matches!(err, DrawDdlError::Io(_)));
    assert_eq!(err.kind(), None);
}

#[test]
fn test_translate_non_utf8_file_is_syntax_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("latin1.drawio");
    let bytes = b"<mxGraphModel><root><mxCell id=\"t\" value=\"Caf\xe9\" style=\"shape=table;\"/></root></mxGraphModel>";
    fs::write(&path, bytes).expect("Failed to write diagram");

    let err = DdlBuilder::default().translate_file(&path).unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Syntax));
    assert!(err.to_string().starts_with("error[E001]"));
    let DrawDdlError::Parse { err, src } = err else {
        panic!("expected a parse error, got {err:?}");
    };
    let invalid_at = bytes.iter().position(|&b| b == 0xe9).expect("invalid byte");
    let label = err.diagnostics()[0].primary_label().expect("primary label");
    assert_eq!(label.span().start(), invalid_at);
    assert!(src.contains('\u{fffd}'));
}

#[test]
fn test_render_programmatic_foreign_keys() {
    let mut customer = Table::new("Customer", Id::new("api-customer"));
    customer.push_column(Column::new("id", "INT", KeyRole::Primary));

    let mut order = Table::new("Order", Id::new("api-order"));
    order.push_column(Column::new("id", "INT", KeyRole::Primary));
    order.push_column(Column::new("customer_id", "INT", KeyRole::Foreign));

    let mut schema = Schema::new();
    schema.insert_table(customer);
    schema.insert_table(order);
    let model = ErModel::new(schema, vec![ResolvedRelationship::new("Customer", "Order")]);

    let sql = DdlBuilder::default().render_sql(&model);

    assert!(sql.ends_with(
        ");\n\nALTER TABLE Order\nADD CONSTRAINT fk_Order_Customer\nFOREIGN KEY (customer_id) REFERENCES Customer(id);"
    ));
}
