//! Girder - a static checker for MSBuild-style project files
//!
//! This library ties the parser and the schema catalog together behind one
//! entry point: read a project file, validate its structure and every
//! embedded expression, and report all defects in a single pass.

pub mod config;

mod error;

pub use girder_core::{
    AttributeRule, ChildRule, ElementKind, ElementRule, SchemaCatalog, Span,
};
pub use girder_parser::{Expression, ProjectDocument, error::Diagnostic};

pub use error::GirderError;

use std::{fs, path::Path};

use log::{debug, info};

use girder_parser::error::ParseError;

use config::AppConfig;

/// Checker for project files.
///
/// Holds the schema catalog (built-in rules plus any tasks registered
/// through configuration) and validates sources against it.
///
/// # Examples
///
/// ```
/// use girder::{ProjectChecker, config::AppConfig};
///
/// let source = r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003" />"#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let checker = ProjectChecker::new(config);
/// checker.check(source).expect("project should be valid");
///
/// // Or use the built-in catalog directly
/// let checker = ProjectChecker::default();
/// let (document, diagnostics) = checker.inspect(source);
/// assert!(diagnostics.is_empty());
/// assert!(document.project().is_some());
/// ```
pub struct ProjectChecker {
    catalog: SchemaCatalog,
}

impl Default for ProjectChecker {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl ProjectChecker {
    /// Create a checker with the given configuration.
    ///
    /// Task rules from the configuration are merged into the built-in
    /// catalog, replacing built-in rules with the same name.
    pub fn new(config: AppConfig) -> Self {
        let mut catalog = SchemaCatalog::builtin();
        for rule in config.schema.tasks {
            debug!(task = rule.name(); "Registering task rule from configuration");
            catalog.add_task(rule);
        }
        Self { catalog }
    }

    /// The catalog this checker validates against.
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Parse and validate `source`, returning the document and every
    /// diagnostic found, in emission order.
    pub fn inspect<'src>(&self, source: &'src str) -> (ProjectDocument<'src>, Vec<Diagnostic>) {
        ProjectDocument::parse(source, &self.catalog)
    }

    /// Check `source`, failing if any defect was found.
    pub fn check(&self, source: &str) -> Result<(), GirderError> {
        let (_, diagnostics) = self.inspect(source);
        debug!(count = diagnostics.len(); "Validation finished");
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(GirderError::new_parse_error(
                ParseError::new(diagnostics),
                source,
            ))
        }
    }

    /// Check a project file on disk.
    pub fn check_file(&self, path: &Path) -> Result<(), GirderError> {
        info!(path = path.display().to_string(); "Checking project file");
        let source = fs::read_to_string(path)?;
        self.check(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::SchemaConfig;

    const MINIMAL: &str =
        r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003" />"#;

    #[test]
    fn test_check_minimal_project() {
        let checker = ProjectChecker::default();
        assert!(checker.check(MINIMAL).is_ok());
    }

    #[test]
    fn test_check_reports_all_defects() {
        let checker = ProjectChecker::default();
        let source = r#"<Project xmlns="x"><Target></Target><Bogus /></Project>"#;

        let err = checker.check(source).unwrap_err();
        match err {
            GirderError::Parse { err, src } => {
                // Missing Target Name plus the invalid child.
                assert_eq!(err.diagnostics().len(), 2);
                assert_eq!(src, source);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_configured_task_rule_is_enforced() {
        let config = AppConfig {
            schema: SchemaConfig {
                tasks: vec![
                    ElementRule::new("NuGetPush")
                        .attribute(AttributeRule::new("PackagePath").required())
                        .attribute(AttributeRule::new("Condition")),
                ],
            },
        };
        let checker = ProjectChecker::new(config);

        let source = r#"<Project xmlns="x">
  <Target Name="Push">
    <NuGetPush />
  </Target>
</Project>"#;

        let err = checker.check(source).unwrap_err();
        match err {
            GirderError::Parse { err, .. } => {
                assert!(err.diagnostics()[0].message().contains("PackagePath"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
