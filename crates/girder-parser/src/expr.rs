//! Expression trees for attribute and text values.
//!
//! Every node keeps the tokens it was built from, so a tree can always
//! reproduce the exact source text it covers, including malformed input the
//! parser recovered from. Nothing here evaluates anything; property and item
//! references stay symbolic.

use std::fmt;

use girder_core::Span;

use crate::tokens::Token;

/// The canonical form of a condition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// `==`
    Equality,
    /// `!=`
    Inequality,
    /// Prefix `!`
    Negation,
}

impl OperatorKind {
    /// The canonical operator text.
    pub fn text(&self) -> &'static str {
        match self {
            OperatorKind::Equality => "==",
            OperatorKind::Inequality => "!=",
            OperatorKind::Negation => "!",
        }
    }

    /// Binding strength. Negation binds tighter than the comparisons.
    pub fn precedence(&self) -> u8 {
        match self {
            OperatorKind::Equality | OperatorKind::Inequality => 0,
            OperatorKind::Negation => 1,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A condition operator together with the tokens it was read from.
///
/// The token list may be shorter than the canonical text when the source was
/// malformed (a lone `=` accepted as equality); rendering goes through the
/// tokens so reconstruction stays faithful to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator<'src> {
    kind: OperatorKind,
    tokens: Vec<Token<'src>>,
}

impl<'src> Operator<'src> {
    pub fn new(kind: OperatorKind, tokens: Vec<Token<'src>>) -> Self {
        Self { kind, tokens }
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn precedence(&self) -> u8 {
        self.kind.precedence()
    }

    /// The source span covered by the operator's tokens.
    pub fn span(&self) -> Span {
        union_spans(&self.tokens).unwrap_or(Span::new(0..0))
    }

    fn write_source(&self, out: &mut String) {
        for token in &self.tokens {
            out.push_str(token.text);
        }
    }
}

/// A parsed value or condition expression.
///
/// Trees are immutable once built. Malformed input still produces a node
/// wherever possible; the corresponding defect lives in the diagnostics, not
/// in the tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'src> {
    /// A literal run of tokens outside any quote.
    UnquotedText(Vec<Token<'src>>),

    /// A quoted string in a condition. `close` is absent when the quote was
    /// never terminated.
    QuotedText {
        open: Token<'src>,
        inner: Option<Box<Expression<'src>>>,
        close: Option<Token<'src>>,
    },

    /// A `$(Name)` property reference, carrying every token from `$` through
    /// the closing `)` (or as far as the source got).
    PropertyRef(Vec<Token<'src>>),

    /// An `@(Name)` item reference, same token policy as `PropertyRef`.
    ItemRef(Vec<Token<'src>>),

    /// Implicit adjacency concatenation.
    Concat(Box<Expression<'src>>, Box<Expression<'src>>),

    /// An equality or inequality comparison. Either operand may be absent
    /// when the source was malformed.
    Binary {
        left: Option<Box<Expression<'src>>>,
        operator: Operator<'src>,
        right: Option<Box<Expression<'src>>>,
    },

    /// Prefix negation. The operand may be absent when the source was
    /// malformed.
    Prefix {
        operator: Operator<'src>,
        operand: Option<Box<Expression<'src>>>,
    },
}

impl<'src> Expression<'src> {
    /// Concatenate two expressions.
    pub fn concat(left: Expression<'src>, right: Expression<'src>) -> Self {
        Expression::Concat(Box::new(left), Box::new(right))
    }

    /// The source span covered by this expression: the union of its
    /// children's and its own token spans.
    pub fn span(&self) -> Span {
        match self {
            Expression::UnquotedText(tokens)
            | Expression::PropertyRef(tokens)
            | Expression::ItemRef(tokens) => union_spans(tokens).unwrap_or(Span::new(0..0)),
            Expression::QuotedText { open, inner, close } => {
                let mut span = open.span();
                if let Some(inner) = inner {
                    span = span.to(inner.span());
                }
                if let Some(close) = close {
                    span = span.to(close.span());
                }
                span
            }
            Expression::Concat(left, right) => left.span().to(right.span()),
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let mut span = operator.span();
                if let Some(left) = left {
                    span = span.to(left.span());
                }
                if let Some(right) = right {
                    span = span.to(right.span());
                }
                span
            }
            Expression::Prefix { operator, operand } => {
                let mut span = operator.span();
                if let Some(operand) = operand {
                    span = span.to(operand.span());
                }
                span
            }
        }
    }

    /// Reconstruct the source text this expression was parsed from.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Expression::UnquotedText(tokens)
            | Expression::PropertyRef(tokens)
            | Expression::ItemRef(tokens) => {
                for token in tokens {
                    out.push_str(token.text);
                }
            }
            Expression::QuotedText { open, inner, close } => {
                out.push_str(open.text);
                if let Some(inner) = inner {
                    inner.write_source(out);
                }
                if let Some(close) = close {
                    out.push_str(close.text);
                }
            }
            Expression::Concat(left, right) => {
                left.write_source(out);
                right.write_source(out);
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                if let Some(left) = left {
                    left.write_source(out);
                }
                operator.write_source(out);
                if let Some(right) = right {
                    right.write_source(out);
                }
            }
            Expression::Prefix { operator, operand } => {
                operator.write_source(out);
                if let Some(operand) = operand {
                    operand.write_source(out);
                }
            }
        }
    }

    /// Whether the expression consists entirely of whitespace.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Expression::UnquotedText(tokens) => tokens.iter().all(Token::is_whitespace),
            Expression::Concat(left, right) => left.is_whitespace() && right.is_whitespace(),
            _ => false,
        }
    }

    /// The referenced name, for `PropertyRef` and `ItemRef` nodes.
    ///
    /// Collects the name-class tokens between the parentheses; whitespace and
    /// recovered-from junk are skipped.
    pub fn reference_name(&self) -> Option<String> {
        match self {
            Expression::PropertyRef(tokens) | Expression::ItemRef(tokens) => Some(
                tokens
                    .iter()
                    .filter(|t| t.kind.is_reference_name())
                    .map(|t| t.text)
                    .collect(),
            ),
            _ => None,
        }
    }
}

fn union_spans(tokens: &[Token<'_>]) -> Option<Span> {
    let mut iter = tokens.iter();
    let first = iter.next()?.span();
    Some(iter.fold(first, |span, token| span.to(token.span())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;

    #[test]
    fn test_operator_kind_properties() {
        assert_eq!(OperatorKind::Equality.text(), "==");
        assert_eq!(OperatorKind::Inequality.text(), "!=");
        assert_eq!(OperatorKind::Negation.text(), "!");

        assert_eq!(OperatorKind::Equality.precedence(), 0);
        assert_eq!(OperatorKind::Inequality.precedence(), 0);
        assert_eq!(OperatorKind::Negation.precedence(), 1);
    }

    #[test]
    fn test_property_ref_span_and_source() {
        let tokens = tokenize("$(Config)");
        let expr = Expression::PropertyRef(tokens);

        assert_eq!(expr.span(), Span::new(0..9));
        assert_eq!(expr.source_text(), "$(Config)");
        assert_eq!(expr.reference_name(), Some("Config".to_string()));
    }

    #[test]
    fn test_malformed_operator_renders_from_tokens() {
        // A lone `=` accepted as equality still renders as `=`.
        let tokens = tokenize("=");
        let operator = Operator::new(OperatorKind::Equality, tokens);
        let expr = Expression::Binary {
            left: None,
            operator,
            right: None,
        };

        assert_eq!(expr.source_text(), "=");
        assert_eq!(expr.span(), Span::new(0..1));
    }

    #[test]
    fn test_concat_span_is_union() {
        let tokens = tokenize("ab$(P)");
        let text = Expression::UnquotedText(tokens[..1].to_vec());
        let prop = Expression::PropertyRef(tokens[1..].to_vec());
        let expr = Expression::concat(text, prop);

        assert_eq!(expr.span(), Span::new(0..6));
        assert_eq!(expr.source_text(), "ab$(P)");
    }

    #[test]
    fn test_is_whitespace() {
        let ws = Expression::UnquotedText(tokenize("  \t"));
        assert!(ws.is_whitespace());

        let text = Expression::UnquotedText(tokenize(" a "));
        assert!(!text.is_whitespace());

        let both = Expression::concat(
            Expression::UnquotedText(tokenize(" ")),
            Expression::UnquotedText(tokenize("\t")),
        );
        assert!(both.is_whitespace());
    }
}
