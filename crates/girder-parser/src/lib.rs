//! # Girder Parser
//!
//! Parser and structural validator for MSBuild-style project files. This
//! crate provides the pipeline from source text to a validated document
//! tree: the markup reader, the expression parser for attribute and text
//! values, and the schema-driven structural validator.
//!
//! ## Usage
//!
//! ```
//! use girder_core::SchemaCatalog;
//! use girder_parser::ProjectDocument;
//!
//! let source = r#"
//! <Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
//!   <PropertyGroup>
//!     <Configuration Condition="'$(Configuration)'==''">Debug</Configuration>
//!   </PropertyGroup>
//! </Project>
//! "#;
//!
//! let catalog = SchemaCatalog::builtin();
//! let (document, diagnostics) = ProjectDocument::parse(source, &catalog);
//! assert!(diagnostics.is_empty());
//! assert!(document.project().is_some());
//! ```

mod document;
pub mod error;
mod expr;
mod parser;
mod reader;
mod tokens;
mod validator;

pub use document::{ProjectDocument, validate_project_document};
pub use expr::{Expression, Operator, OperatorKind};
pub use parser::{parse_condition, parse_value};
pub use reader::read_document;
pub use tokens::{Token, TokenCursor, TokenKind, tokenize, tokenize_at};
pub use validator::validate_element;

pub use girder_core::Span;
