//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Every structural and expression defect in this crate is a hard error;
/// warnings exist for API completeness and for downstream tools layering
/// advisory checks on top of the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A defect the document must not contain.
    Error,

    /// An advisory issue that does not make the document invalid.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
