//! The markup document tree.
//!
//! The reader in `girder-parser` produces this tree; the structural validator
//! walks it. Nodes borrow their names and text from the source string so that
//! spans and text always agree, and nothing is ever copied or decoded — the
//! expression parser operates on the raw source slices.
//!
//! Comments and processing instructions are dropped by the reader and never
//! appear here; a node is either an element or a text run.

use crate::span::Span;

/// A parsed markup document: the ordered list of top-level nodes.
#[derive(Debug, Default)]
pub struct XmlDocument<'src> {
    children: Vec<XmlNode<'src>>,
}

impl<'src> XmlDocument<'src> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node.
    pub fn push_child(&mut self, node: XmlNode<'src>) {
        self.children.push(node);
    }

    /// All top-level nodes in document order.
    pub fn children(&self) -> &[XmlNode<'src>] {
        &self.children
    }

    /// Top-level elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement<'src>> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// The first top-level element, if any.
    pub fn first_element(&self) -> Option<&XmlElement<'src>> {
        self.elements().next()
    }

    /// The innermost element whose span contains `offset`.
    ///
    /// Used by downstream tooling (hover, completion); not used by parsing or
    /// validation.
    pub fn element_at_offset(&self, offset: usize) -> Option<&XmlElement<'src>> {
        self.elements()
            .find(|element| element.span().contains(offset))
            .map(|element| element.innermost_at_offset(offset))
    }
}

/// One node of the tree: an element or a run of character data.
#[derive(Debug)]
pub enum XmlNode<'src> {
    Element(XmlElement<'src>),
    Text(XmlText<'src>),
}

impl<'src> XmlNode<'src> {
    /// This node as an element, if it is one.
    pub fn as_element(&self) -> Option<&XmlElement<'src>> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    /// This node as a text run, if it is one.
    pub fn as_text(&self) -> Option<&XmlText<'src>> {
        match self {
            XmlNode::Element(_) => None,
            XmlNode::Text(text) => Some(text),
        }
    }

    /// The source span of the node.
    pub fn span(&self) -> Span {
        match self {
            XmlNode::Element(element) => element.span(),
            XmlNode::Text(text) => text.span(),
        }
    }
}

/// A run of character data between markup.
#[derive(Debug, Clone, Copy)]
pub struct XmlText<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> XmlText<'src> {
    pub fn new(text: &'src str, span: Span) -> Self {
        Self { text, span }
    }

    /// The raw source text of the run, entities undecoded.
    pub fn text(&self) -> &'src str {
        self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether the run contains only whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// An attribute of an element: a name and an optional quoted value.
///
/// The value is absent when the markup was malformed (missing `=` or missing
/// quotes); the reader has already reported that defect, so consumers simply
/// skip value handling.
#[derive(Debug, Clone, Copy)]
pub struct XmlAttribute<'src> {
    name: &'src str,
    name_span: Span,
    value: Option<&'src str>,
    value_span: Option<Span>,
}

impl<'src> XmlAttribute<'src> {
    pub fn new(
        name: &'src str,
        name_span: Span,
        value: Option<&'src str>,
        value_span: Option<Span>,
    ) -> Self {
        Self {
            name,
            name_span,
            value,
            value_span,
        }
    }

    pub fn name(&self) -> &'src str {
        self.name
    }

    pub fn name_span(&self) -> Span {
        self.name_span
    }

    /// The value text between the quotes, if the attribute had a value.
    pub fn value(&self) -> Option<&'src str> {
        self.value
    }

    /// The span of the value text (quotes excluded).
    pub fn value_span(&self) -> Option<Span> {
        self.value_span
    }

    /// The span of the whole attribute.
    pub fn span(&self) -> Span {
        match self.value_span {
            Some(value_span) => self.name_span.to(value_span),
            None => self.name_span,
        }
    }
}

/// A markup element: tag name, ordered attributes, ordered children.
#[derive(Debug)]
pub struct XmlElement<'src> {
    name: &'src str,
    name_span: Span,
    attributes: Vec<XmlAttribute<'src>>,
    children: Vec<XmlNode<'src>>,
    span: Span,
}

impl<'src> XmlElement<'src> {
    pub fn new(name: &'src str, name_span: Span) -> Self {
        Self {
            name,
            name_span,
            attributes: Vec::new(),
            children: Vec::new(),
            span: name_span,
        }
    }

    pub fn push_attribute(&mut self, attribute: XmlAttribute<'src>) {
        self.attributes.push(attribute);
    }

    pub fn push_child(&mut self, node: XmlNode<'src>) {
        self.children.push(node);
    }

    /// Set the final span once the closing tag (or recovery point) is known.
    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn name(&self) -> &'src str {
        self.name
    }

    pub fn name_span(&self) -> Span {
        self.name_span
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Ordered attributes as written in the source.
    pub fn attributes(&self) -> &[XmlAttribute<'src>] {
        &self.attributes
    }

    /// Look up an attribute by name, case-insensitively.
    pub fn find_attribute(&self, name: &str) -> Option<&XmlAttribute<'src>> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }

    /// All child nodes, elements and text runs interleaved in source order.
    pub fn children(&self) -> &[XmlNode<'src>] {
        &self.children
    }

    /// Child elements only, in source order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement<'src>> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Child text runs only, in source order.
    pub fn text_runs(&self) -> impl Iterator<Item = &XmlText<'src>> {
        self.children.iter().filter_map(XmlNode::as_text)
    }

    /// Whether the element has any content nodes at all.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Descend to the innermost descendant (including `self`) whose span
    /// contains `offset`.
    pub fn innermost_at_offset(&self, offset: usize) -> &XmlElement<'src> {
        for child in self.child_elements() {
            if child.span().contains(offset) {
                return child.innermost_at_offset(offset);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element<'src>(name: &'src str, start: usize) -> XmlElement<'src> {
        XmlElement::new(name, Span::new(start..start + name.len()))
    }

    #[test]
    fn test_find_attribute_case_insensitive() {
        let mut item = element("Compile", 1);
        item.push_attribute(XmlAttribute::new(
            "Include",
            Span::new(9..16),
            Some("a.cs"),
            Some(Span::new(18..22)),
        ));

        assert!(item.find_attribute("include").is_some());
        assert!(item.find_attribute("INCLUDE").is_some());
        assert!(item.find_attribute("Exclude").is_none());
    }

    #[test]
    fn test_attribute_span_covers_name_and_value() {
        let attribute = XmlAttribute::new(
            "Include",
            Span::new(9..16),
            Some("a.cs"),
            Some(Span::new(18..22)),
        );
        assert_eq!(attribute.span(), Span::new(9..22));

        let bare = XmlAttribute::new("Include", Span::new(9..16), None, None);
        assert_eq!(bare.span(), Span::new(9..16));
    }

    #[test]
    fn test_children_partition() {
        let mut group = element("PropertyGroup", 1);
        group.push_child(XmlNode::Text(XmlText::new("\n  ", Span::new(20..23))));
        group.push_child(XmlNode::Element(element("Configuration", 24)));

        assert_eq!(group.child_elements().count(), 1);
        assert_eq!(group.text_runs().count(), 1);
        assert!(group.text_runs().next().unwrap().is_whitespace());
    }

    #[test]
    fn test_innermost_at_offset() {
        let mut outer = element("Project", 1);
        outer.set_span(Span::new(0..100));
        let mut inner = element("ItemGroup", 12);
        inner.set_span(Span::new(10..60));
        outer.push_child(XmlNode::Element(inner));

        let hit = outer.innermost_at_offset(30);
        assert_eq!(hit.name(), "ItemGroup");
        let miss = outer.innermost_at_offset(80);
        assert_eq!(miss.name(), "Project");
    }
}
