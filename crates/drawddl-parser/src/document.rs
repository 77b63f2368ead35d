//! Loaded diagram nodes and their id index.
//!
//! A [`DiagramDocument`] is an arena of [`DiagramNode`]s in document order.
//! Id and parent lookups go through maps built once at load time, so later
//! stages never rescan the node list.

use std::collections::HashMap;

use drawddl_core::identifier::Id;

use crate::span::Span;

/// One `mxCell` element of the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    id: Id,
    parent: Option<Id>,
    style: String,
    value: Option<String>,
    source: Option<Id>,
    target: Option<Id>,
    span: Span,
}

impl DiagramNode {
    pub fn new(id: Id, span: Span) -> Self {
        Self {
            id,
            parent: None,
            style: String::new(),
            value: None,
            source: None,
            target: None,
            span,
        }
    }

    pub fn with_parent(mut self, parent: Id) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_source(mut self, source: Id) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: Id) -> Self {
        self.target = Some(target);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Style tag soup; empty when the element had no `style` attribute.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Display label. `None` when the attribute is absent, which is distinct
    /// from an empty label.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn source(&self) -> Option<Id> {
        self.source
    }

    pub fn target(&self) -> Option<Id> {
        self.target
    }

    /// Span of the element's start tag in the source document.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// All nodes of one diagram document.
#[derive(Debug, Default)]
pub struct DiagramDocument {
    nodes: Vec<DiagramNode>,
    by_id: HashMap<Id, usize>,
    children: HashMap<Id, Vec<usize>>,
}

impl DiagramDocument {
    /// Builds the document and its indexes from nodes in document order.
    ///
    /// When several nodes share an id, lookups by id return the first.
    pub fn new(nodes: Vec<DiagramNode>) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<Id, Vec<usize>> = HashMap::new();

        for (idx, node) in nodes.iter().enumerate() {
            by_id.entry(node.id()).or_insert(idx);
            if let Some(parent) = node.parent() {
                children.entry(parent).or_default().push(idx);
            }
        }

        Self {
            nodes,
            by_id,
            children,
        }
    }

    pub fn node(&self, id: Id) -> Option<&DiagramNode> {
        self.by_id.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn get(&self, idx: usize) -> Option<&DiagramNode> {
        self.nodes.get(idx)
    }

    /// Returns all nodes in document order.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Returns nodes whose `parent` is `id`, in document order.
    pub fn children(&self, id: Id) -> impl Iterator<Item = &DiagramNode> {
        self.child_indices(id).map(|idx| &self.nodes[idx])
    }

    /// Arena indices of the nodes whose `parent` is `id`, in document order.
    pub fn child_indices(&self, id: Id) -> impl Iterator<Item = usize> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
