//! The structural validator.
//!
//! One generic recursive walk over the document tree, driven entirely by the
//! rule records in the [`SchemaCatalog`]: attributes are checked against
//! [`AttributeRule`]s, children against [`ChildRule`]s, and every attribute
//! value and text run is handed to the expression parser. The validator never
//! fails; it only appends diagnostics.
//!
//! [`AttributeRule`]: girder_core::AttributeRule
//! [`ChildRule`]: girder_core::ChildRule

use log::trace;

use girder_core::{ChildRule, ElementKind, ElementRule, SchemaCatalog, dom::XmlElement};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parser,
    tokens::TokenCursor,
};

/// Validate `element` as an instance of `kind`, recursively.
///
/// `task_name` selects the task rule when `kind` is [`ElementKind::Task`];
/// unknown task names resolve to the catalog's permissive fallback rule.
pub fn validate_element(
    kind: ElementKind,
    element: &XmlElement<'_>,
    task_name: Option<&str>,
    catalog: &SchemaCatalog,
    diagnostics: &mut DiagnosticCollector,
) {
    trace!(element = element.name(), kind = kind.name(); "Validating element");

    let rule = match kind {
        ElementKind::Task => catalog.task_rule(task_name.unwrap_or(element.name())),
        _ => match catalog.rule(kind) {
            Some(rule) => rule,
            None => return,
        },
    };

    check_attributes(rule, element, diagnostics);
    check_required_attributes(rule, element, diagnostics);

    if !rule.skips_child_validation() {
        check_content(rule, element, catalog, diagnostics);
    }
}

/// Check the attributes present on the element and parse their values.
fn check_attributes(
    rule: &ElementRule,
    element: &XmlElement<'_>,
    diagnostics: &mut DiagnosticCollector,
) {
    for (index, attribute) in element.attributes().iter().enumerate() {
        match rule.find_attribute(attribute.name()) {
            Some(attribute_rule) => {
                if let Some(other) = attribute_rule.exclusive_with_name() {
                    // Report the pair once, on whichever attribute comes
                    // second in source order.
                    let conflict = element.attributes()[..index]
                        .iter()
                        .find(|earlier| earlier.name().eq_ignore_ascii_case(other));
                    if let Some(conflict) = conflict {
                        diagnostics.emit(
                            Diagnostic::error(format!(
                                "`{}` cannot be combined with `{}`",
                                attribute.name(),
                                conflict.name()
                            ))
                            .with_code(ErrorCode::E202)
                            .with_label(attribute.name_span(), "conflicting attribute")
                            .with_secondary_label(conflict.name_span(), "already set here"),
                        );
                    }
                }
            }
            None => {
                if !rule.allows_any_attribute() {
                    diagnostics.emit(
                        Diagnostic::error(format!(
                            "unknown attribute `{}` on `<{}>`",
                            attribute.name(),
                            element.name()
                        ))
                        .with_code(ErrorCode::E200)
                        .with_label(attribute.name_span(), "not valid on this element"),
                    );
                    continue;
                }
            }
        }

        parse_attribute_value(attribute, diagnostics);
    }
}

/// Parse an attribute value through the expression parser, choosing the
/// condition grammar for `Condition` attributes.
fn parse_attribute_value(
    attribute: &girder_core::dom::XmlAttribute<'_>,
    diagnostics: &mut DiagnosticCollector,
) {
    let (Some(value), Some(value_span)) = (attribute.value(), attribute.value_span()) else {
        // The reader already reported the malformed attribute.
        return;
    };

    let mut cursor = TokenCursor::for_text(value, value_span.start());
    if attribute.name().eq_ignore_ascii_case("Condition") {
        parser::parse_condition(&mut cursor, diagnostics);
    } else {
        parser::parse_value(&mut cursor, diagnostics);
    }
}

/// Report required attributes that are absent, honoring the
/// required-unless-other-present escape.
fn check_required_attributes(
    rule: &ElementRule,
    element: &XmlElement<'_>,
    diagnostics: &mut DiagnosticCollector,
) {
    for attribute_rule in rule.attributes() {
        if element.find_attribute(attribute_rule.name()).is_some() {
            continue;
        }

        let required = if let Some(other) = attribute_rule.required_unless_present() {
            element.find_attribute(other).is_none()
        } else {
            attribute_rule.is_required()
        };

        if required {
            let mut diagnostic = Diagnostic::error(format!(
                "`<{}>` is missing required attribute `{}`",
                element.name(),
                attribute_rule.name()
            ))
            .with_code(ErrorCode::E201)
            .with_label(element.name_span(), "required attribute is absent");
            if let Some(other) = attribute_rule.required_unless_present() {
                diagnostic = diagnostic.with_help(format!(
                    "provide either `{}` or `{}`",
                    attribute_rule.name(),
                    other
                ));
            }
            diagnostics.emit(diagnostic);
        }
    }
}

/// Check text runs and child elements against the rule's content model.
fn check_content(
    rule: &ElementRule,
    element: &XmlElement<'_>,
    catalog: &SchemaCatalog,
    diagnostics: &mut DiagnosticCollector,
) {
    // With no content at all, only the required-child checks apply.
    if !element.has_children() {
        for child_rule in rule.children() {
            if child_rule.is_required() {
                report_missing_child(rule, child_rule, element, diagnostics);
            }
        }
        return;
    }

    for text in element.text_runs() {
        if text.is_whitespace() {
            continue;
        }
        if rule.allows_text_content() {
            let mut cursor = TokenCursor::for_text(text.text(), text.span().start());
            parser::parse_value(&mut cursor, diagnostics);
        } else {
            diagnostics.emit(
                Diagnostic::error(format!(
                    "text content is not allowed inside `<{}>`",
                    element.name()
                ))
                .with_code(ErrorCode::E207)
                .with_label(text.span(), "unexpected text"),
            );
        }
    }

    let child_rules = rule.children();
    let mut match_counts = vec![0usize; child_rules.len()];

    for child in element.child_elements() {
        match child_rules.iter().position(|r| r.matches(child.name())) {
            Some(index) => {
                let child_rule = &child_rules[index];
                match_counts[index] += 1;
                if child_rule.is_at_most_one() && match_counts[index] > 1 {
                    diagnostics.emit(
                        Diagnostic::error(format!(
                            "`<{}>` may appear at most once inside `<{}>`",
                            child.name(),
                            element.name()
                        ))
                        .with_code(ErrorCode::E206)
                        .with_label(child.name_span(), "extra occurrence"),
                    );
                }
                recurse(child_rule.kind(), child, catalog, diagnostics);
            }
            None => match rule.fallback_child_kind() {
                Some(fallback) => recurse(fallback, child, catalog, diagnostics),
                None => {
                    diagnostics.emit(
                        Diagnostic::error(format!(
                            "`<{}>` is not a valid child of `<{}>`",
                            child.name(),
                            element.name()
                        ))
                        .with_code(ErrorCode::E203)
                        .with_label(child.name_span(), "not allowed here"),
                    );
                }
            },
        }
    }

    for (index, child_rule) in child_rules.iter().enumerate() {
        if child_rule.is_required() && match_counts[index] == 0 {
            report_missing_child(rule, child_rule, element, diagnostics);
        }
    }

    // Ordering: a must-be-last child has to be the final child element.
    let elements: Vec<&XmlElement<'_>> = element.child_elements().collect();
    for child_rule in child_rules.iter().filter(|r| r.is_must_be_last()) {
        if let Some(position) = elements.iter().position(|c| child_rule.matches(c.name())) {
            if position + 1 != elements.len() {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "`<{}>` must be the last child of `<{}>`",
                        elements[position].name(),
                        element.name()
                    ))
                    .with_code(ErrorCode::E205)
                    .with_label(elements[position].name_span(), "must come last"),
                );
            }
        }
    }
}

fn recurse(
    kind: ElementKind,
    child: &XmlElement<'_>,
    catalog: &SchemaCatalog,
    diagnostics: &mut DiagnosticCollector,
) {
    let task_name = (kind == ElementKind::Task).then(|| child.name());
    validate_element(kind, child, task_name, catalog, diagnostics);
}

fn report_missing_child(
    rule: &ElementRule,
    child_rule: &ChildRule,
    element: &XmlElement<'_>,
    diagnostics: &mut DiagnosticCollector,
) {
    diagnostics.emit(
        Diagnostic::error(format!(
            "`<{}>` requires a `<{}>` child",
            rule.name(),
            child_rule.kind()
        ))
        .with_code(ErrorCode::E204)
        .with_label(element.name_span(), "missing required child"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_document;

    /// Read `source`, validate its first element as `kind`, and return the
    /// diagnostic codes in emission order.
    fn validate_str(kind: ElementKind, source: &str) -> Vec<ErrorCode> {
        let catalog = SchemaCatalog::builtin();
        let mut diagnostics = DiagnosticCollector::new();
        let document = read_document(source, &mut diagnostics);
        assert!(
            !diagnostics.has_errors(),
            "test markup should be well-formed: {:?}",
            diagnostics.diagnostics()
        );
        let element = document.first_element().expect("one element");

        let mut diagnostics = DiagnosticCollector::new();
        validate_element(kind, element, None, &catalog, &mut diagnostics);
        diagnostics
            .into_diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_unknown_attribute() {
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build" Frobnicate="yes"></Target>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E200]);
    }

    #[test]
    fn test_missing_required_attribute() {
        let codes = validate_str(ElementKind::Target, "<Target></Target>");
        assert_eq!(codes, vec![ErrorCode::E201]);
    }

    #[test]
    fn test_required_unless_escape() {
        // `Include` is required on an item unless `Remove` is present.
        let codes = validate_str(ElementKind::Item, r#"<Compile Remove="a.cs" />"#);
        assert_eq!(codes, vec![]);

        let codes = validate_str(ElementKind::Item, "<Compile />");
        assert_eq!(codes, vec![ErrorCode::E201]);
    }

    #[test]
    fn test_mutually_exclusive_attributes_reported_once() {
        let codes = validate_str(
            ElementKind::Output,
            r#"<Output TaskParameter="Out" ItemName="A" PropertyName="B" />"#,
        );
        assert_eq!(codes, vec![ErrorCode::E202]);
    }

    #[test]
    fn test_condition_attribute_uses_condition_grammar() {
        // A lone `=` is only a defect under the condition grammar.
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build" Condition="'$(A)'='1'"></Target>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E107]);
    }

    #[test]
    fn test_attribute_value_expressions_are_parsed() {
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="$(  )"></Target>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E101]);
    }

    #[test]
    fn test_invalid_child() {
        let codes = validate_str(
            ElementKind::Project,
            r#"<Project xmlns="x"><Unrelated /></Project>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E203]);
    }

    #[test]
    fn test_at_most_one_child_reports_second_only() {
        let codes = validate_str(
            ElementKind::Choose,
            r#"<Choose>
                 <When Condition="'a'=='b'"></When>
                 <Otherwise></Otherwise>
                 <Otherwise></Otherwise>
               </Choose>"#,
        );
        // One extra-occurrence issue for the second Otherwise, plus the
        // must-be-last issue for the first one.
        assert_eq!(codes, vec![ErrorCode::E206, ErrorCode::E205]);
    }

    #[test]
    fn test_must_be_last() {
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build">
                 <OnError ExecuteTargets="Clean" />
                 <Message Text="hi" />
               </Target>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E205]);
    }

    #[test]
    fn test_text_not_allowed() {
        let codes = validate_str(
            ElementKind::ItemGroup,
            "<ItemGroup>free text</ItemGroup>",
        );
        assert_eq!(codes, vec![ErrorCode::E207]);
    }

    #[test]
    fn test_property_text_is_parsed_as_expression() {
        let codes = validate_str(
            ElementKind::Property,
            "<OutputPath>$(BaseOutputPath)\\$(Configuration)</OutputPath>",
        );
        assert_eq!(codes, vec![]);
    }

    #[test]
    fn test_target_fallback_resolves_tasks() {
        // `Message` is a built-in task reached through Target's fallback.
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build">
                 <Message Text="building" Importance="high" />
               </Target>"#,
        );
        assert_eq!(codes, vec![]);

        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build">
                 <Message Nonsense="x" />
               </Target>"#,
        );
        assert_eq!(codes, vec![ErrorCode::E200]);
    }

    #[test]
    fn test_unknown_task_is_permissive() {
        let codes = validate_str(
            ElementKind::Target,
            r#"<Target Name="Build">
                 <MyCustomTask Whatever="1" AnythingGoes="2" />
               </Target>"#,
        );
        assert_eq!(codes, vec![]);
    }

    #[test]
    fn test_empty_element_reports_required_children() {
        let codes = validate_str(ElementKind::Choose, "<Choose></Choose>");
        assert_eq!(codes, vec![ErrorCode::E204]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let catalog = SchemaCatalog::builtin();
        let mut reader_diags = DiagnosticCollector::new();
        let source = r#"<Target Condition="'$(A)'=='1'">
                          <OnError ExecuteTargets="Clean" />
                          <Message Text="hi" />
                        </Target>"#;
        let document = read_document(source, &mut reader_diags);
        let element = document.first_element().unwrap();

        let mut first = DiagnosticCollector::new();
        validate_element(ElementKind::Target, element, None, &catalog, &mut first);
        let mut second = DiagnosticCollector::new();
        validate_element(ElementKind::Target, element, None, &catalog, &mut second);

        let first: Vec<_> = first
            .into_diagnostics()
            .iter()
            .map(|d| (d.code(), d.primary_span()))
            .collect();
        let second: Vec<_> = second
            .into_diagnostics()
            .iter()
            .map(|d| (d.code(), d.primary_span()))
            .collect();
        assert_eq!(first, second);
    }
}
