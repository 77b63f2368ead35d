//! Relationship resolution: edge endpoints to owning tables.
//!
//! An edge endpoint belongs to a table when the endpoint node's parent is a
//! node whose label names a table in the schema. Relationships with an
//! endpoint that does not resolve are dropped without error.

use log::{debug, info};

use drawddl_core::{
    identifier::Id,
    schema::{Relationship, ResolvedRelationship, Schema},
};

use crate::document::DiagramDocument;

/// Resolves every relationship of `schema`, keeping discovery order.
pub fn resolve(document: &DiagramDocument, schema: &Schema) -> Vec<ResolvedRelationship> {
    let resolved: Vec<_> = schema
        .relationships()
        .iter()
        .filter_map(|relationship| resolve_relationship(document, schema, relationship))
        .collect();

    info!(
        resolved_count = resolved.len(),
        dropped_count = schema.relationships().len() - resolved.len();
        "Resolved relationships"
    );
    resolved
}

fn resolve_relationship(
    document: &DiagramDocument,
    schema: &Schema,
    relationship: &Relationship,
) -> Option<ResolvedRelationship> {
    let source = owning_table(document, schema, relationship.source());
    let target = owning_table(document, schema, relationship.target());

    match (source, target) {
        (Some(source), Some(target)) => {
            debug!(
                edge:% = relationship.edge(),
                source_table = source,
                target_table = target;
                "Resolved relationship"
            );
            Some(ResolvedRelationship::new(source, target))
        }
        _ => {
            debug!(
                edge:% = relationship.edge(),
                source_resolved = source.is_some(),
                target_resolved = target.is_some();
                "Dropping unresolved relationship"
            );
            None
        }
    }
}

/// Name of the table containing `endpoint`, if any.
pub fn owning_table<'s>(
    document: &DiagramDocument,
    schema: &'s Schema,
    endpoint: Option<Id>,
) -> Option<&'s str> {
    let node = document.node(endpoint?)?;
    let parent = document.node(node.parent()?)?;
    let table = schema.table(parent.value()?)?;
    Some(table.name())
}

#[cfg(test)]
mod tests {
    use drawddl_core::schema::Table;

    use super::*;
    use crate::{document::DiagramNode, span::Span};

    fn node(id: &str, parent: &str, value: Option<&str>) -> DiagramNode {
        let node = DiagramNode::new(Id::new(id), Span::default()).with_parent(Id::new(parent));
        match value {
            Some(value) => node.with_value(value),
            None => node,
        }
    }

    fn fixture() -> (DiagramDocument, Schema) {
        let document = DiagramDocument::new(vec![
            node("res-cust", "1", Some("Customer")),
            node("res-cust-r1", "res-cust", Some("")),
            node("res-ord", "1", Some("Order")),
            node("res-ord-r1", "res-ord", Some("")),
            node("res-loose", "1", Some("Loose")),
            node("res-loose-child", "res-loose", None),
        ]);

        let mut schema = Schema::new();
        schema.insert_table(Table::new("Customer", Id::new("res-cust")));
        schema.insert_table(Table::new("Order", Id::new("res-ord")));

        (document, schema)
    }

    #[test]
    fn test_owning_table_via_parent() {
        let (document, schema) = fixture();

        assert_eq!(
            owning_table(&document, &schema, Some(Id::new("res-ord-r1"))),
            Some("Order")
        );
        // The table node itself sits in the layer, not in a table.
        assert_eq!(owning_table(&document, &schema, Some(Id::new("res-cust"))), None);
        assert_eq!(
            owning_table(&document, &schema, Some(Id::new("res-loose-child"))),
            None
        );
        assert_eq!(owning_table(&document, &schema, Some(Id::new("res-nowhere"))), None);
        assert_eq!(owning_table(&document, &schema, None), None);
    }

    #[test]
    fn test_resolve_keeps_order_and_drops_unresolved() {
        let (document, mut schema) = fixture();
        schema.push_relationship(Relationship::new(
            Id::new("res-e1"),
            Some(Id::new("res-ord-r1")),
            Some(Id::new("res-cust-r1")),
        ));
        schema.push_relationship(Relationship::new(
            Id::new("res-e2"),
            Some(Id::new("res-ord-r1")),
            None,
        ));
        schema.push_relationship(Relationship::new(
            Id::new("res-e3"),
            Some(Id::new("res-cust-r1")),
            Some(Id::new("res-ord-r1")),
        ));

        let resolved = resolve(&document, &schema);

        assert_eq!(
            resolved,
            vec![
                ResolvedRelationship::new("Order", "Customer"),
                ResolvedRelationship::new("Customer", "Order"),
            ]
        );
    }
}
