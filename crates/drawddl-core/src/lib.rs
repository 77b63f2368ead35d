//! drawddl Core Types and Definitions
//!
//! This crate provides the foundational types shared by the drawddl
//! pipeline. It includes:
//!
//! - **Identifiers**: String-interned diagram node identifiers ([`identifier::Id`])
//! - **Schema**: The relational model extracted from a diagram ([`schema`] module)

pub mod identifier;
pub mod schema;
