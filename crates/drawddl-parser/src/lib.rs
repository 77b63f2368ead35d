//! # drawddl Parser
//!
//! Turns a draw.io entity-relationship diagram into an [`ErModel`]: the
//! tables drawn in the diagram and the relationships between them.
//!
//! ## Usage
//!
//! ```
//! # use drawddl_parser::{parse, ExtractConfig, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <mxGraphModel><root>
//!           <mxCell id="0"/>
//!           <mxCell id="1" parent="0"/>
//!           <mxCell id="t" value="Customer" style="shape=table;" parent="1"/>
//!           <mxCell id="r" value="" style="shape=partialRectangle;" parent="t"/>
//!           <mxCell id="k" value="PK" style="shape=partialRectangle;" parent="r"/>
//!           <mxCell id="l" value="id INT" style="shape=partialRectangle;" parent="r"/>
//!         </root></mxGraphModel>
//!     "#;
//!
//!     let model = parse(source, &ExtractConfig::default())?;
//!     assert_eq!(model.schema().table_count(), 1);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod document;
pub mod error;
pub mod extract;
pub mod loader;
pub mod resolve;
mod span;

pub use extract::ExtractConfig;
pub use span::Span;

use log::info;

use drawddl_core::schema::ErModel;

use error::ParseError;
use extract::Extractor;

/// Parse a diagram document into an [`ErModel`].
///
/// This is the main entry point of the crate. It runs the pipeline:
///
/// 1. **Load** - Parse the markup into an indexed node arena
/// 2. **Classify** - Tag each node as table, row, relationship edge, or other
/// 3. **Extract** - Build tables and columns from tables and their rows
/// 4. **Resolve** - Map relationship endpoints to their owning tables
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup (syntax) or for table rows
/// missing their cells (structural). Unresolvable relationships are not
/// errors; they are left out of the model.
pub fn parse(source: &str, config: &ExtractConfig) -> Result<ErModel, ParseError> {
    let document = loader::load(source)?;

    let schema = Extractor::new(config, &document).extract()?;

    let relationships = resolve::resolve(&document, &schema);

    info!(
        tables_count = schema.table_count(),
        relationships_count = relationships.len();
        "Diagram parsed"
    );
    Ok(ErModel::new(schema, relationships))
}
