//! Source annotations attached to diagnostics.

use crate::span::Span;

/// A message anchored to a byte range of the diagram document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the annotated range of the document.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the text shown next to the annotated range.
    pub fn message(&self) -> &str {
        &self.message
    }
}
