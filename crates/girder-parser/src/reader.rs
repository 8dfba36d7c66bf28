//! The markup reader.
//!
//! A hand-written cursor over the source bytes that builds the
//! [`XmlDocument`] tree. It reads the small XML subset project files actually
//! use: elements, attributes, text, comments, CDATA, and processing
//! instructions. Comments and processing instructions are dropped; CDATA
//! becomes an ordinary text run; entities are never decoded, since the
//! expression parser works on raw source slices.
//!
//! Like the expression parser, the reader never aborts. Malformed markup is
//! reported to the diagnostics sink and reading continues from the nearest
//! safe point, so the validator always receives a tree to walk.

use girder_core::{Span, dom::{XmlAttribute, XmlDocument, XmlElement, XmlNode, XmlText}};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// Read a document tree from `source`, reporting markup defects.
pub fn read_document<'src>(
    source: &'src str,
    diagnostics: &mut DiagnosticCollector,
) -> XmlDocument<'src> {
    let mut reader = Reader {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        diagnostics,
    };
    reader.read_document()
}

struct Reader<'src, 'diag> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
    diagnostics: &'diag mut DiagnosticCollector,
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.' | b':')
}

impl<'src> Reader<'src, '_> {
    fn read_document(&mut self) -> XmlDocument<'src> {
        let mut document = XmlDocument::new();

        if self.source.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
        }

        while let Some(byte) = self.peek() {
            if byte == b'<' {
                if self.try_skip_non_element_markup() {
                    continue;
                }
                if self.starts_with("</") {
                    let start = self.pos;
                    self.skip_closing_tag();
                    self.diagnostics.emit(
                        Diagnostic::error("closing tag without an open element")
                            .with_code(ErrorCode::E003)
                            .with_label(Span::new(start..self.pos), "no element is open here"),
                    );
                } else if self.peek_at(1).is_some_and(is_name_start) {
                    let element = self.read_element();
                    document.push_child(XmlNode::Element(element));
                } else {
                    self.report_unexpected_markup();
                }
            } else {
                let text = self.read_text_run();
                if !text.is_whitespace() {
                    self.diagnostics.emit(
                        Diagnostic::error("content outside the document element")
                            .with_code(ErrorCode::E006)
                            .with_label(text.span(), "text is not allowed at the top level"),
                    );
                }
                document.push_child(XmlNode::Text(text));
            }
        }

        document
    }

    /// Read one element starting at `<`.
    fn read_element(&mut self) -> XmlElement<'src> {
        let start = self.pos;
        self.pos += 1; // `<`

        let name_start = self.pos;
        self.skip_while(is_name_byte);
        let name_span = Span::new(name_start..self.pos);
        let mut element = XmlElement::new(&self.source[name_span.range()], name_span);

        // Attributes until the tag ends one way or another.
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'>') => {
                    self.pos += 1;
                    self.read_children(&mut element, start);
                    return element;
                }
                Some(b'/') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    element.set_span(Span::new(start..self.pos));
                    return element;
                }
                Some(b'<') => {
                    // A new tag opened inside this one. Treat the tag as
                    // implicitly closed and let the caller continue.
                    self.diagnostics.emit(
                        Diagnostic::error(format!("`<{}>` tag is never closed", element.name()))
                            .with_code(ErrorCode::E001)
                            .with_label(name_span, "this tag has no `>`"),
                    );
                    element.set_span(Span::new(start..self.pos));
                    return element;
                }
                Some(byte) if is_name_start(byte) => {
                    let attribute = self.read_attribute();
                    element.push_attribute(attribute);
                }
                Some(_) => {
                    self.report_unexpected_markup();
                }
                None => {
                    self.diagnostics.emit(
                        Diagnostic::error(format!("`<{}>` tag is never closed", element.name()))
                            .with_code(ErrorCode::E001)
                            .with_label(name_span, "document ends inside this tag"),
                    );
                    element.set_span(Span::new(start..self.pos));
                    return element;
                }
            }
        }
    }

    /// Read one attribute: `Name="value"`.
    fn read_attribute(&mut self) -> XmlAttribute<'src> {
        let name_start = self.pos;
        self.skip_while(is_name_byte);
        let name_span = Span::new(name_start..self.pos);
        let name = &self.source[name_span.range()];

        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            self.diagnostics.emit(
                Diagnostic::error(format!("attribute `{name}` is missing `=`"))
                    .with_code(ErrorCode::E004)
                    .with_label(name_span, "expected `=\"...\"` after this name"),
            );
            return XmlAttribute::new(name, name_span, None, None);
        }
        self.pos += 1;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(byte @ (b'"' | b'\'')) => byte,
            _ => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("attribute `{name}` value is not quoted"))
                        .with_code(ErrorCode::E004)
                        .with_label(name_span, "expected a quoted value"),
                );
                // Skip a bare token so reading can continue.
                self.skip_while(|b| !b.is_ascii_whitespace() && b != b'>' && b != b'/');
                return XmlAttribute::new(name, name_span, None, None);
            }
        };
        self.pos += 1;

        let value_start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == quote || byte == b'>' {
                break;
            }
            self.pos += 1;
        }
        let value_span = Span::new(value_start..self.pos);
        let value = &self.source[value_span.range()];

        if self.peek() == Some(quote) {
            self.pos += 1;
        } else {
            self.diagnostics.emit(
                Diagnostic::error(format!("attribute `{name}` value is missing its end quote"))
                    .with_code(ErrorCode::E004)
                    .with_label(
                        Span::new(value_start.saturating_sub(1)..value_start),
                        "value starts here",
                    ),
            );
        }

        XmlAttribute::new(name, name_span, Some(value), Some(value_span))
    }

    /// Read the content of `element` up to its closing tag.
    fn read_children(&mut self, element: &mut XmlElement<'src>, open_start: usize) {
        loop {
            match self.peek() {
                None => {
                    self.diagnostics.emit(
                        Diagnostic::error(format!(
                            "missing closing tag `</{}>`",
                            element.name()
                        ))
                        .with_code(ErrorCode::E001)
                        .with_label(element.name_span(), "element opened here"),
                    );
                    element.set_span(Span::new(open_start..self.pos));
                    return;
                }
                Some(b'<') => {
                    if self.starts_with("<![CDATA[") {
                        if let Some(text) = self.read_cdata() {
                            element.push_child(XmlNode::Text(text));
                        }
                        continue;
                    }
                    if self.try_skip_non_element_markup() {
                        continue;
                    }
                    if self.starts_with("</") {
                        let closing_start = self.pos;
                        let closing_name = self.skip_closing_tag();
                        if closing_name != element.name() {
                            self.diagnostics.emit(
                                Diagnostic::error(format!(
                                    "expected `</{}>`, found `</{}>`",
                                    element.name(),
                                    closing_name
                                ))
                                .with_code(ErrorCode::E003)
                                .with_label(
                                    Span::new(closing_start..self.pos),
                                    "mismatched closing tag",
                                )
                                .with_secondary_label(element.name_span(), "element opened here"),
                            );
                        }
                        element.set_span(Span::new(open_start..self.pos));
                        return;
                    }
                    if self.peek_at(1).is_some_and(is_name_start) {
                        let child = self.read_element();
                        element.push_child(XmlNode::Element(child));
                    } else {
                        self.report_unexpected_markup();
                    }
                }
                Some(_) => {
                    let text = self.read_text_run();
                    element.push_child(XmlNode::Text(text));
                }
            }
        }
    }

    /// Skip a `</Name>` tag and return the name.
    fn skip_closing_tag(&mut self) -> &'src str {
        self.pos += 2; // `</`
        let name_start = self.pos;
        self.skip_while(is_name_byte);
        let name = &self.source[name_start..self.pos];
        self.skip_whitespace();
        if self.peek() == Some(b'>') {
            self.pos += 1;
        }
        name
    }

    /// Skip comments, processing instructions, and declarations.
    ///
    /// Returns whether anything was consumed. CDATA is not handled here; it
    /// produces content and only makes sense inside an element.
    fn try_skip_non_element_markup(&mut self) -> bool {
        if self.starts_with("<!--") {
            let start = self.pos;
            self.pos += 4;
            match self.find_str("-->") {
                Some(end) => self.pos = end + 3,
                None => {
                    self.pos = self.bytes.len();
                    self.diagnostics.emit(
                        Diagnostic::error("unterminated comment")
                            .with_code(ErrorCode::E005)
                            .with_label(Span::new(start..start + 4), "comment opened here"),
                    );
                }
            }
            return true;
        }
        if self.starts_with("<?") {
            let start = self.pos;
            self.pos += 2;
            match self.find_str("?>") {
                Some(end) => self.pos = end + 2,
                None => {
                    self.pos = self.bytes.len();
                    self.diagnostics.emit(
                        Diagnostic::error("unterminated processing instruction")
                            .with_code(ErrorCode::E005)
                            .with_label(Span::new(start..start + 2), "opened here"),
                    );
                }
            }
            return true;
        }
        if self.starts_with("<!") && !self.starts_with("<![CDATA[") {
            // DOCTYPE and other declarations: skip to the end of the tag.
            self.pos += 2;
            while let Some(byte) = self.peek() {
                self.pos += 1;
                if byte == b'>' {
                    break;
                }
            }
            return true;
        }
        false
    }

    /// Read a `<![CDATA[...]]>` section as a text run.
    fn read_cdata(&mut self) -> Option<XmlText<'src>> {
        let start = self.pos;
        self.pos += 9; // `<![CDATA[`
        let content_start = self.pos;
        match self.find_str("]]>") {
            Some(end) => {
                self.pos = end + 3;
                let span = Span::new(content_start..end);
                Some(XmlText::new(&self.source[span.range()], span))
            }
            None => {
                self.pos = self.bytes.len();
                self.diagnostics.emit(
                    Diagnostic::error("unterminated CDATA section")
                        .with_code(ErrorCode::E005)
                        .with_label(Span::new(start..start + 9), "section opened here"),
                );
                let span = Span::new(content_start..self.pos);
                Some(XmlText::new(&self.source[span.range()], span))
            }
        }
    }

    /// Read a run of character data up to the next `<`.
    fn read_text_run(&mut self) -> XmlText<'src> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == b'<' {
                break;
            }
            self.pos += 1;
        }
        let span = Span::new(start..self.pos);
        XmlText::new(&self.source[span.range()], span)
    }

    fn report_unexpected_markup(&mut self) {
        let start = self.pos;
        self.pos += 1;
        // Stay on a character boundary for multi-byte input.
        while !self.source.is_char_boundary(self.pos) {
            self.pos += 1;
        }
        self.diagnostics.emit(
            Diagnostic::error("unexpected character in markup")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(start..self.pos), "not valid here"),
        );
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    fn find_str(&self, needle: &str) -> Option<usize> {
        self.source[self.pos..]
            .find(needle)
            .map(|offset| self.pos + offset)
    }

    fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(|byte| byte.is_ascii_whitespace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<'a>(
        source: &'a str,
    ) -> (XmlDocument<'a>, Vec<crate::error::Diagnostic>) {
        let mut diagnostics = DiagnosticCollector::new();
        let document = read_document(source, &mut diagnostics);
        (document, diagnostics.into_diagnostics())
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
        diagnostics.iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_reads_minimal_project() {
        let (document, diagnostics) = read(
            r#"<?xml version="1.0"?>
<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <Configuration>Debug</Configuration>
  </PropertyGroup>
</Project>"#,
        );
        assert!(diagnostics.is_empty());

        let project = document.first_element().unwrap();
        assert_eq!(project.name(), "Project");
        assert_eq!(project.attributes().len(), 1);

        let group = project.child_elements().next().unwrap();
        assert_eq!(group.name(), "PropertyGroup");
        let property = group.child_elements().next().unwrap();
        assert_eq!(property.name(), "Configuration");
        assert_eq!(property.text_runs().next().unwrap().text(), "Debug");
    }

    #[test]
    fn test_self_closing_and_attribute_spans() {
        let source = r#"<Import Project="common.props" />"#;
        let (document, diagnostics) = read(source);
        assert!(diagnostics.is_empty());

        let import = document.first_element().unwrap();
        let attribute = &import.attributes()[0];
        assert_eq!(attribute.name(), "Project");
        assert_eq!(attribute.value(), Some("common.props"));
        let value_span = attribute.value_span().unwrap();
        assert_eq!(&source[value_span.range()], "common.props");
        assert_eq!(import.span(), Span::new(0..source.len()));
    }

    #[test]
    fn test_comments_and_pis_are_dropped() {
        let (document, diagnostics) =
            read("<!-- header --><Project><!-- inner --><?note hi?></Project>");
        assert!(diagnostics.is_empty());

        let project = document.first_element().unwrap();
        assert_eq!(project.children().len(), 0);
    }

    #[test]
    fn test_cdata_is_text() {
        let (document, diagnostics) =
            read("<TaskBody><![CDATA[<raw & text>]]></TaskBody>");
        assert!(diagnostics.is_empty());

        let body = document.first_element().unwrap();
        assert_eq!(body.text_runs().next().unwrap().text(), "<raw & text>");
    }

    #[test]
    fn test_entities_are_not_decoded() {
        let (document, _) = read("<P>a &amp; b</P>");
        let p = document.first_element().unwrap();
        assert_eq!(p.text_runs().next().unwrap().text(), "a &amp; b");
    }

    #[test]
    fn test_unterminated_element() {
        let (document, diagnostics) = read("<Project><Target Name=\"Build\">");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E001, ErrorCode::E001]);

        // The partial tree is still produced.
        let project = document.first_element().unwrap();
        assert_eq!(project.child_elements().next().unwrap().name(), "Target");
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let (document, diagnostics) = read("<Project><ItemGroup></Project>");
        let reported = codes(&diagnostics);
        assert!(reported.contains(&ErrorCode::E003));
        assert!(document.first_element().is_some());
    }

    #[test]
    fn test_malformed_attribute_missing_equals() {
        let (document, diagnostics) = read("<Item Include/>");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E004]);

        let item = document.first_element().unwrap();
        let attribute = &item.attributes()[0];
        assert_eq!(attribute.name(), "Include");
        assert_eq!(attribute.value(), None);
    }

    #[test]
    fn test_attribute_missing_end_quote() {
        let (document, diagnostics) = read("<Item Include=\"a.cs>");
        assert!(codes(&diagnostics).contains(&ErrorCode::E004));
        let item = document.first_element().unwrap();
        assert_eq!(item.attributes()[0].value(), Some("a.cs"));
    }

    #[test]
    fn test_text_outside_document_element() {
        let (_, diagnostics) = read("stray<Project></Project>");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E006]);
    }

    #[test]
    fn test_stray_closing_tag_at_top_level() {
        let (_, diagnostics) = read("</Project>");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E003]);
    }

    #[test]
    fn test_unterminated_comment() {
        let (_, diagnostics) = read("<Project></Project><!-- oops");
        assert_eq!(codes(&diagnostics), vec![ErrorCode::E005]);
    }

    #[test]
    fn test_bom_is_skipped() {
        let (document, diagnostics) = read("\u{feff}<Project></Project>");
        assert!(diagnostics.is_empty());
        assert!(document.first_element().is_some());
    }
}
