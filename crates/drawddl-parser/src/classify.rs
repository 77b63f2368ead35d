//! Shape classification by style tags.
//!
//! The diagram editor encodes shape types in the free-form `style`
//! attribute. Classification happens once per node; later stages match on
//! [`ShapeKind`] and never look at style strings again.

use crate::document::{DiagramDocument, DiagramNode};

const TABLE_TAG: &str = "shape=table";
const RELATIONSHIP_TAG: &str = "entityRelationEdgeStyle";
const ROW_TAG: &str = "shape=partialRectangle";

/// Role of a diagram node in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Table,
    /// A table row, or one of its cells; only children of a table count as
    /// rows.
    Row,
    RelationshipEdge,
    Other,
}

/// Classifies a style string. Case-sensitive; the first matching tag wins.
///
/// # Examples
///
/// ```
/// use drawddl_parser::classify::{ShapeKind, classify_style};
///
/// assert_eq!(classify_style("shape=table;startSize=30;"), ShapeKind::Table);
/// assert_eq!(classify_style("edgeStyle=entityRelationEdgeStyle;"), ShapeKind::RelationshipEdge);
/// assert_eq!(classify_style("rounded=1;"), ShapeKind::Other);
/// ```
pub fn classify_style(style: &str) -> ShapeKind {
    if style.contains(TABLE_TAG) {
        ShapeKind::Table
    } else if style.contains(RELATIONSHIP_TAG) {
        ShapeKind::RelationshipEdge
    } else if style.contains(ROW_TAG) {
        ShapeKind::Row
    } else {
        ShapeKind::Other
    }
}

/// Classifies a node. Nodes without a `value` attribute are not classified
/// at all.
pub fn classify(node: &DiagramNode) -> Option<ShapeKind> {
    node.value()?;
    Some(classify_style(node.style()))
}

/// Per-node classification of a whole document, indexed like
/// [`DiagramDocument::nodes`].
#[derive(Debug)]
pub struct Classification {
    kinds: Vec<Option<ShapeKind>>,
}

impl Classification {
    pub fn new(document: &DiagramDocument) -> Self {
        Self {
            kinds: document.nodes().iter().map(classify).collect(),
        }
    }

    /// Kind of the node at `idx`; `None` for unclassified nodes.
    pub fn kind(&self, idx: usize) -> Option<ShapeKind> {
        self.kinds.get(idx).copied().flatten()
    }

    pub fn count(&self, kind: ShapeKind) -> usize {
        self.kinds.iter().filter(|k| **k == Some(kind)).count()
    }
}
