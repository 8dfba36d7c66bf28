//! Error types for girder operations.
//!
//! This module provides the main error type [`GirderError`] which wraps the
//! error conditions that can occur while checking a project file.

use std::io;

use thiserror::Error;

use girder_parser::error::ParseError;

/// The main error type for girder operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics with source spans,
/// together with the source text they point into, so callers can render rich
/// reports.
#[derive(Debug, Error)]
pub enum GirderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },
}

impl GirderError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
