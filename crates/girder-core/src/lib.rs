//! # Girder Core
//!
//! Core types shared across the girder workspace: source spans, the markup
//! document tree produced by the reader, and the declarative schema rules
//! that drive structural validation of MSBuild project files.
//!
//! This crate carries no parsing logic. The schema catalog in particular is
//! pure data: rule records describing which attributes and children every
//! element kind accepts, consumed by the single generic validator in
//! `girder-parser`.

pub mod dom;
pub mod schema;
pub mod span;
pub mod tasks;

pub use schema::{AttributeRule, ChildRule, ElementKind, ElementRule, SchemaCatalog};
pub use span::Span;
