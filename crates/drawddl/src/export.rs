//! Export functionality for drawddl models.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning an extracted model into output text. It is the final stage of the
//! drawddl pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram document
//!     ↓ parse (load, classify, extract, resolve)
//! ErModel
//!     ↓ export (this module)
//! Output text
//! ```
//!
//! # Available Backends
//!
//! - [`sql`] - SQL DDL output via [`sql::SqlExporter`]

/// SQL DDL export backend.
pub mod sql;

use drawddl_core::schema::ErModel;

/// Abstraction for model export backends.
pub trait Exporter {
    /// Renders the complete model.
    ///
    /// Rendering cannot fail: every well-formed [`ErModel`] has a textual
    /// form, including models with no tables.
    fn export_model(&self, model: &ErModel) -> String;
}
