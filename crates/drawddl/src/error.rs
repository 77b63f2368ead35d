//! Error types for drawddl operations.
//!
//! This module provides the main error type [`DrawDdlError`] which wraps
//! the error conditions of a translation.

use std::io;

use thiserror::Error;

use drawddl_parser::error::{ErrorKind, ParseError};

/// The main error type for drawddl operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document text next to the structured
/// diagnostics, so callers can render source snippets for each span.
#[derive(Debug, Error)]
pub enum DrawDdlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DrawDdlError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Whether a parse failure was a syntax or a structural error.
    ///
    /// Returns `None` for I/O and configuration errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Parse { err, .. } => err.kind(),
            Self::Io(_) | Self::Config(_) => None,
        }
    }
}
