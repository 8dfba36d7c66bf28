//! Collector for accumulating diagnostics during a processing pass.
//!
//! The [`DiagnosticCollector`] is the append-only diagnostics sink: every
//! pass (reading, expression parsing, validation) reports its defects
//! here and keeps going. Nothing in the core ever aborts on a diagnostic;
//! conversion to `Result` happens once, at the API boundary, via
//! [`DiagnosticCollector::finish`].

use crate::error::{Diagnostic, ParseError};

/// An append-only collector of diagnostics.
///
/// Owned by the caller of a pass and threaded `&mut` down the recursion, so
/// one document reports all of its independent problems in a single run.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The diagnostics collected so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return every diagnostic in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use girder_core::Span;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.has_errors());
        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_emit_warning_finish_ok() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("test warning"));

        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_preserves_emission_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("first")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::error("second").with_code(ErrorCode::E204));

        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "first");
        assert_eq!(diagnostics[1].message(), "second");
    }

    #[test]
    fn test_collector_finish_carries_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error").with_code(ErrorCode::E203));
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }
}
