//! A single fatal finding about a diagram document.

use std::fmt;

use crate::{
    error::{ErrorCode, ErrorKind, Label},
    span::Span,
};

/// One reason a document cannot be translated.
///
/// Every diagnostic carries an [`ErrorCode`]. It points at the offending
/// element with at most one primary label; context labels mark related
/// elements such as the table that owns a broken row.
///
/// # Examples
///
/// ```
/// # use drawddl_parser::{Span, error::{Diagnostic, ErrorCode, ErrorKind}};
/// let diag = Diagnostic::new(ErrorCode::E102, "label cell `r1-l` of row `r1` has no value")
///     .at(Span::new(210..260), "label cell")
///     .context(Span::new(40..120), "in table `Customer`")
///     .hint("set the cell text to `<column name> [type]`");
///
/// assert_eq!(diag.kind(), ErrorKind::Structural);
/// assert_eq!(diag.to_string(), "error[E102]: label cell `r1-l` of row `r1` has no value");
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    primary: Option<Label>,
    context: Vec<Label>,
    hint: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            primary: None,
            context: Vec::new(),
            hint: None,
        }
    }

    /// Points the diagnostic at `span`, replacing any earlier primary label.
    pub fn at(mut self, span: Span, message: impl Into<String>) -> Self {
        self.primary = Some(Label::new(span, message));
        self
    }

    /// Adds a label marking a related element.
    pub fn context(mut self, span: Span, message: impl Into<String>) -> Self {
        self.context.push(Label::new(span, message));
        self
    }

    /// Sets the suggestion shown below the source snippet.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code of this diagnostic.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the failure category, derived from the code.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Get the one-line description of the problem.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the label on the offending element, if the diagnostic has one.
    pub fn primary_label(&self) -> Option<&Label> {
        self.primary.as_ref()
    }

    /// Get the labels on related elements, in the order they were added.
    pub fn context_labels(&self) -> &[Label] {
        &self.context
    }

    /// Get the suggested fix, if any.
    pub fn hint_text(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_diagnostic_labels() {
        let diag = Diagnostic::new(ErrorCode::E101, "table row `r1` has no label cell")
            .at(Span::new(40..90), "row defined here")
            .context(Span::new(95..140), "only this cell was found")
            .context(Span::new(0..30), "in table `Customer`");

        let primary = diag.primary_label().expect("primary label");
        assert_eq!(primary.span(), Span::new(40..90));
        assert_eq!(primary.message(), "row defined here");

        let context: Vec<_> = diag.context_labels().iter().map(Label::message).collect();
        assert_eq!(context, vec!["only this cell was found", "in table `Customer`"]);
    }

    #[test]
    fn test_primary_label_is_replaced() {
        let diag = Diagnostic::new(ErrorCode::E001, "malformed diagram document")
            .at(Span::point(3), "first guess")
            .at(Span::point(9), "parsing failed here");

        assert_eq!(diag.primary_label().map(Label::span), Some(Span::point(9)));
        assert!(diag.context_labels().is_empty());
    }

    #[test]
    fn test_kind_follows_code() {
        let syntax = Diagnostic::new(ErrorCode::E002, "diagram document has no root element");
        let structural = Diagnostic::new(ErrorCode::E100, "table row `r1` has no cells");

        assert_eq!(syntax.kind(), ErrorKind::Syntax);
        assert_eq!(structural.kind(), ErrorKind::Structural);
        assert_eq!(syntax.hint_text(), None);
        assert_eq!(syntax.to_string(), "error[E002]: diagram document has no root element");
    }
}
