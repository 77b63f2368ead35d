//! Diagnostics for the diagram translation pipeline.
//!
//! Every fatal condition found while loading or extracting a diagram is
//! reported as a [`Diagnostic`]: an [`ErrorCode`], a message, labeled byte
//! spans into the source document, and an optional hint. One or more
//! diagnostics are wrapped in [`ParseError`] when a stage fails.
//!
//! Error codes fall into two [`ErrorKind`]s:
//! - [`ErrorKind::Syntax`] - the document is not well-formed markup
//! - [`ErrorKind::Structural`] - a table row is missing its expected cells
//!
//! # Example
//!
//! ```
//! # use drawddl_parser::error::{Diagnostic, ErrorCode, ErrorKind, ParseError};
//! # use drawddl_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E101, "table row `r1` has no label cell")
//!     .at(Span::new(120..180), "row defined here")
//!     .hint("add a second cell holding `<column name> [type]`");
//!
//! let err = ParseError::from(diag);
//! assert_eq!(err.kind(), Some(ErrorKind::Structural));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
