//! Top-level document orchestration.
//!
//! Ties the reader, the structural validator, and the expression parser
//! together for one source file: read the tree, confirm the document element
//! is a `Project`, and validate every project root found.

use log::debug;

use girder_core::{ElementKind, SchemaCatalog, dom::{XmlDocument, XmlElement}};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    reader::read_document,
    validator::validate_element,
};

/// A parsed project file: the document tree plus the project view.
#[derive(Debug)]
pub struct ProjectDocument<'src> {
    document: XmlDocument<'src>,
}

impl<'src> ProjectDocument<'src> {
    /// Read and validate `source` against `catalog`.
    ///
    /// Always returns a document; every defect found along the way is in the
    /// returned diagnostics list, in emission order.
    pub fn parse(
        source: &'src str,
        catalog: &SchemaCatalog,
    ) -> (ProjectDocument<'src>, Vec<Diagnostic>) {
        let mut diagnostics = DiagnosticCollector::new();
        let document = read_document(source, &mut diagnostics);
        validate_project_document(&document, catalog, &mut diagnostics);
        debug!(issues = diagnostics.len(); "Project document checked");
        (ProjectDocument { document }, diagnostics.into_diagnostics())
    }

    /// The underlying document tree.
    pub fn document(&self) -> &XmlDocument<'src> {
        &self.document
    }

    /// The project view: the first top-level `<Project>` element.
    pub fn project(&self) -> Option<&XmlElement<'src>> {
        self.document
            .elements()
            .find(|element| is_project(element))
    }

    /// The innermost element containing `offset`, for tooling.
    pub fn element_at_offset(&self, offset: usize) -> Option<&XmlElement<'src>> {
        self.document.element_at_offset(offset)
    }
}

fn is_project(element: &XmlElement<'_>) -> bool {
    element.name().eq_ignore_ascii_case("Project")
}

/// Validate the top level of a document.
///
/// A first element that is not `<Project>` is reported once; every top-level
/// `<Project>` element is validated regardless of position.
pub fn validate_project_document(
    document: &XmlDocument<'_>,
    catalog: &SchemaCatalog,
    diagnostics: &mut DiagnosticCollector,
) {
    if let Some(first) = document.first_element() {
        if !is_project(first) {
            diagnostics.emit(
                Diagnostic::error(format!(
                    "expected `<Project>` as the document element, found `<{}>`",
                    first.name()
                ))
                .with_code(ErrorCode::E208)
                .with_label(first.name_span(), "not a project root"),
            );
        }
    }

    for element in document.elements() {
        if is_project(element) {
            validate_element(ElementKind::Project, element, None, catalog, diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<'a>(source: &'a str) -> (ProjectDocument<'a>, Vec<Diagnostic>) {
        let catalog = SchemaCatalog::builtin();
        ProjectDocument::parse(source, &catalog)
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
        diagnostics.iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_minimal_project_is_clean() {
        let (document, diagnostics) =
            parse(r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003" />"#);
        assert_eq!(codes(&diagnostics), vec![]);
        assert!(document.project().is_some());
    }

    #[test]
    fn test_non_project_root() {
        let (document, diagnostics) = parse("<Html></Html>");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E208]);
        assert!(document.project().is_none());
    }

    #[test]
    fn test_root_reported_once_despite_later_elements() {
        let (_, diagnostics) = parse("<Html></Html><Body></Body>");
        let reported = codes(&diagnostics);
        assert_eq!(
            reported.iter().filter(|c| **c == ErrorCode::E208).count(),
            1
        );
    }

    #[test]
    fn test_later_project_roots_are_still_validated() {
        // The second Project is missing xmlns; it is validated even though
        // only the first becomes the project view.
        let (document, diagnostics) =
            parse(r#"<Project xmlns="x"></Project><Project></Project>"#);
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E201]);
        let project = document.project().unwrap();
        assert!(project.find_attribute("xmlns").is_some());
    }

    #[test]
    fn test_project_case_insensitive() {
        let (document, diagnostics) = parse(r#"<project xmlns="x"></project>"#);
        assert_eq!(codes(&diagnostics), vec![]);
        assert!(document.project().is_some());
    }

    #[test]
    fn test_issues_merge_markup_and_validation() {
        // A markup defect and a structural defect surface in one list.
        let (_, diagnostics) = parse("<Project xmlns=\"x\"><Bogus /></Project><!-- oops");
        let reported = codes(&diagnostics);
        assert!(reported.contains(&ErrorCode::E203));
        assert!(reported.contains(&ErrorCode::E005));
    }

    #[test]
    fn test_empty_source() {
        let (document, diagnostics) = parse("");
        assert!(diagnostics.is_empty());
        assert!(document.project().is_none());
    }
}
