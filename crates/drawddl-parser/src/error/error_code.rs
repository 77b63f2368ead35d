//! Error codes for the drawddl diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document syntax errors (loader)
//! - `E1xx` - Structural errors (schema extraction)

use std::fmt;

/// The fatal failure categories of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input cannot be parsed as markup at all.
    Syntax,
    /// The markup parsed but a table row lacks its expected cells.
    Structural,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::Structural => write!(f, "structural"),
        }
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Syntax Errors (E0xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The document is not well-formed UTF-8 XML: a broken or mismatched
    /// tag, a second root, text outside the root, an unknown entity, or an
    /// invalid attribute.
    E001,

    /// Incomplete document.
    ///
    /// The document has no root element, or ended while elements were
    /// still open.
    E002,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Row without cells.
    ///
    /// A table row has no child cells, so neither its key indicator nor its
    /// label can be read.
    E100,

    /// Row without label cell.
    ///
    /// A table row has only one child cell; the second cell holds the
    /// column name and type.
    E101,

    /// Label cell without value.
    ///
    /// The row's label cell has no `value` attribute.
    E102,

    /// Empty column label.
    ///
    /// The row's label cell is blank, so there is no column name.
    E103,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }

    /// Returns the failure category this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E001 | ErrorCode::E002 => ErrorKind::Syntax,
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103 => {
                ErrorKind::Structural
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
