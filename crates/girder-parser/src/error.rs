//! Error and diagnostic system for the girder parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - A diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type: a single message with
//! an error code, one or more source locations, and optional help text.
//! Parsing and validation never abort on a defect; every defect becomes a
//! diagnostic appended to a [`DiagnosticCollector`], and the whole collection
//! is wrapped in [`ParseError`] only at the API boundary.
//!
//! # Example
//!
//! ```
//! # use girder_parser::error::{Diagnostic, ErrorCode};
//! # use girder_parser::Span;
//!
//! let span = Span::new(42..49);
//!
//! let diag = Diagnostic::error("unknown attribute `Includee`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(span, "not a valid attribute here")
//!     .with_help("did you mean `Include`?");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
