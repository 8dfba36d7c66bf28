//! Expression parsing for values and conditions.
//!
//! Two entry points share one scanning core. [`parse_value`] handles the
//! plain value grammar: property and item references, implicit concatenation,
//! everything else literal text. [`parse_condition`] layers the condition
//! grammar on top: quoted strings, `==`/`!=` comparisons, and prefix `!`,
//! driven by an explicit stack of completed expressions and pending operator
//! builders.
//!
//! Recovery is non-fatal throughout. Every defect becomes a diagnostic and
//! parsing continues with a best-effort partial tree, so one document can
//! report many independent problems in a single pass.

use girder_core::Span;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    expr::{Expression, Operator, OperatorKind},
    tokens::{TokenCursor, TokenKind},
};

/// Parse a value expression: references, concatenation, literal text.
///
/// Quotes, `=`, and `!` have no special meaning in value position. Returns
/// `None` for empty input.
pub fn parse_value<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Expression<'src>> {
    parse_value_expression(cursor, diagnostics, false, None)
}

/// Parse a condition expression: the value grammar plus quoted strings,
/// `==`/`!=`, and prefix `!`.
///
/// Returns `None` for empty input.
pub fn parse_condition<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Expression<'src>> {
    let mut stack: Vec<StackEntry<'src>> = Vec::new();

    while let Some(token) = cursor.current() {
        let before = cursor.position();

        match token.kind {
            TokenKind::Equals => {
                let operator = parse_equality_operator(cursor, diagnostics);
                push_binary(&mut stack, operator, diagnostics);
            }
            TokenKind::Bang => {
                if peek_kind(cursor, 1) == Some(TokenKind::Equals) {
                    let operator = parse_inequality_operator(cursor);
                    push_binary(&mut stack, operator, diagnostics);
                } else if let Some(bang) = cursor.advance() {
                    // Prefix negation: no left operand to resolve.
                    let operator = Operator::new(OperatorKind::Negation, vec![bang]);
                    stack.push(StackEntry::Prefix { operator });
                }
            }
            _ => {
                if let Some(expr) = parse_value_expression(cursor, diagnostics, true, None) {
                    stack.push(StackEntry::Expr(expr));
                }
            }
        }

        if cursor.position() == before {
            break;
        }
    }

    unwind(stack, diagnostics)
}

/// An entry on the condition parser's working stack: either a completed
/// expression or a pending operator still waiting for an operand.
#[derive(Debug)]
enum StackEntry<'src> {
    Expr(Expression<'src>),
    Binary {
        left: Option<Expression<'src>>,
        operator: Operator<'src>,
    },
    Prefix {
        operator: Operator<'src>,
    },
}

impl StackEntry<'_> {
    /// The precedence of a pending builder; `None` for completed expressions.
    fn precedence(&self) -> Option<u8> {
        match self {
            StackEntry::Expr(_) => None,
            StackEntry::Binary { operator, .. } | StackEntry::Prefix { operator } => {
                Some(operator.precedence())
            }
        }
    }
}

/// Consume `==`, accepting a lone `=` with a diagnostic.
fn parse_equality_operator<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
) -> Operator<'src> {
    let mut tokens = Vec::new();
    if let Some(first) = cursor.advance() {
        tokens.push(first);
        match cursor.current() {
            Some(second) if second.kind == TokenKind::Equals => {
                cursor.advance();
                tokens.push(second);
            }
            _ => {
                diagnostics.emit(
                    Diagnostic::error("expected a second `=`")
                        .with_code(ErrorCode::E107)
                        .with_label(first.span(), "equality is written `==`")
                        .with_help("use `==` to compare for equality"),
                );
            }
        }
    }
    Operator::new(OperatorKind::Equality, tokens)
}

/// Consume `!=`. The caller has already seen both tokens.
fn parse_inequality_operator<'src>(cursor: &mut TokenCursor<'src>) -> Operator<'src> {
    let mut tokens = Vec::new();
    if let Some(bang) = cursor.advance() {
        tokens.push(bang);
    }
    if let Some(equals) = cursor.advance() {
        tokens.push(equals);
    }
    Operator::new(OperatorKind::Inequality, tokens)
}

/// Resolve the left operand for a new binary operator and push its builder.
///
/// A completed expression on top of the stack becomes the left operand, but
/// first any pending builder beneath it with precedence at or above the new
/// operator's is completed using that expression as its operand. This is the
/// reduction that keeps equal-precedence operators left-associative and lets
/// prefix negation bind tighter than the comparisons.
fn push_binary<'src>(
    stack: &mut Vec<StackEntry<'src>>,
    operator: Operator<'src>,
    diagnostics: &mut DiagnosticCollector,
) {
    let precedence = operator.precedence();

    let left = match stack.pop() {
        Some(StackEntry::Expr(expr)) => {
            let mut expr = expr;
            while matches!(
                stack.last().and_then(StackEntry::precedence),
                Some(p) if p >= precedence
            ) {
                if let Some(builder) = stack.pop() {
                    expr = complete_entry(builder, Some(expr), diagnostics, false);
                }
            }
            Some(expr)
        }
        Some(entry) => {
            stack.push(entry);
            None
        }
        None => None,
    };

    if left.as_ref().is_none_or(Expression::is_whitespace) {
        diagnostics.emit(
            Diagnostic::error(format!("`{}` is missing its left operand", operator.kind()))
                .with_code(ErrorCode::E108)
                .with_label(operator.span(), "expected an expression before this operator"),
        );
    }

    stack.push(StackEntry::Binary { left, operator });
}

/// Fold one stack entry into the running result.
///
/// Used both for precedence reduction while parsing (where the operand is
/// known present, so `report_missing` is off) and for the end-of-input unwind
/// (where an absent or whitespace-only operand is a defect).
fn complete_entry<'src>(
    entry: StackEntry<'src>,
    running: Option<Expression<'src>>,
    diagnostics: &mut DiagnosticCollector,
    report_missing: bool,
) -> Expression<'src> {
    match entry {
        StackEntry::Expr(expr) => match running {
            Some(rest) => Expression::concat(expr, rest),
            None => expr,
        },
        StackEntry::Binary { left, operator } => {
            if report_missing && running.as_ref().is_none_or(Expression::is_whitespace) {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "`{}` is missing its right operand",
                        operator.kind()
                    ))
                    .with_code(ErrorCode::E109)
                    .with_label(operator.span(), "expected an expression after this operator"),
                );
            }
            Expression::Binary {
                left: left.map(Box::new),
                operator,
                right: running.map(Box::new),
            }
        }
        StackEntry::Prefix { operator } => {
            if report_missing && running.as_ref().is_none_or(Expression::is_whitespace) {
                diagnostics.emit(
                    Diagnostic::error("missing expression after `!`")
                        .with_code(ErrorCode::E110)
                        .with_label(operator.span(), "`!` needs an expression to negate"),
                );
            }
            Expression::Prefix {
                operator,
                operand: running.map(Box::new),
            }
        }
    }
}

/// Unwind the stack at end of input, newest entry first.
fn unwind<'src>(
    mut stack: Vec<StackEntry<'src>>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Expression<'src>> {
    let mut result: Option<Expression<'src>> = None;
    while let Some(entry) = stack.pop() {
        result = Some(complete_entry(entry, result, diagnostics, true));
    }
    result
}

/// The shared scanning core.
///
/// `inside_condition` enables the quote/`=`/`!` significance of the condition
/// grammar. `closing_quote` is bound while scanning the interior of a quoted
/// string, so the matching quote terminates the scan instead of opening a
/// nested string.
fn parse_value_expression<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
    inside_condition: bool,
    closing_quote: Option<char>,
) -> Option<Expression<'src>> {
    let mut result: Option<Expression<'src>> = None;

    while let Some(token) = cursor.current() {
        let before = cursor.position();

        let current = match token.kind {
            TokenKind::Dollar if peek_kind(cursor, 1) == Some(TokenKind::LeftParen) => {
                Some(parse_reference(cursor, diagnostics, ReferenceKind::Property))
            }
            TokenKind::At if peek_kind(cursor, 1) == Some(TokenKind::LeftParen) => {
                Some(parse_reference(cursor, diagnostics, ReferenceKind::Item))
            }
            TokenKind::Quote if inside_condition => {
                if closing_quote.is_some() && token.quote_char() == closing_quote {
                    // Terminator of the string being scanned; the caller
                    // consumes it.
                    break;
                }
                Some(parse_quoted(cursor, diagnostics))
            }
            // The condition grammar owns this position.
            TokenKind::Equals if inside_condition => break,
            TokenKind::Bang if inside_condition => {
                if closing_quote.is_some() {
                    Some(parse_negation(cursor, diagnostics, closing_quote))
                } else {
                    break;
                }
            }
            _ => Some(parse_text_run(cursor, inside_condition)),
        };

        if cursor.position() == before {
            break;
        }

        if let Some(current) = current {
            result = Some(match result {
                Some(acc) => Expression::concat(acc, current),
                None => current,
            });
        }
    }

    result
}

#[derive(Debug, Clone, Copy)]
enum ReferenceKind {
    Property,
    Item,
}

impl ReferenceKind {
    fn noun(&self) -> &'static str {
        match self {
            ReferenceKind::Property => "property",
            ReferenceKind::Item => "item",
        }
    }

    fn invalid_char_code(&self) -> ErrorCode {
        match self {
            ReferenceKind::Property => ErrorCode::E100,
            ReferenceKind::Item => ErrorCode::E103,
        }
    }

    fn missing_name_code(&self) -> ErrorCode {
        match self {
            ReferenceKind::Property => ErrorCode::E101,
            ReferenceKind::Item => ErrorCode::E104,
        }
    }

    fn unclosed_code(&self) -> ErrorCode {
        match self {
            ReferenceKind::Property => ErrorCode::E102,
            ReferenceKind::Item => ErrorCode::E105,
        }
    }
}

/// Scan `$(Name)` or `@(Name)`, tolerating malformed interiors.
///
/// Every consumed token lands in the node, so the node's span and rendered
/// source cover exactly what was read. Whitespace between the parentheses is
/// accepted silently; any other non-name class is reported and skipped.
fn parse_reference<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
    kind: ReferenceKind,
) -> Expression<'src> {
    let mut tokens = Vec::new();

    // Sigil and `(`, both guaranteed by the caller's dispatch.
    if let Some(sigil) = cursor.advance() {
        tokens.push(sigil);
    }
    if let Some(open) = cursor.advance() {
        tokens.push(open);
    }

    let mut has_name = false;
    let mut closed = false;

    while let Some(token) = cursor.current() {
        match token.kind {
            TokenKind::RightParen => {
                cursor.advance();
                tokens.push(token);
                closed = true;
                break;
            }
            TokenKind::Whitespace => {
                cursor.advance();
                tokens.push(token);
            }
            k if k.is_reference_name() => {
                cursor.advance();
                tokens.push(token);
                has_name = true;
            }
            _ => {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "invalid character `{}` in {} name",
                        token.text,
                        kind.noun()
                    ))
                    .with_code(kind.invalid_char_code())
                    .with_label(token.span(), "not allowed in a name")
                    .with_help("names may contain letters, digits, `_`, `-`, and `.`"),
                );
                cursor.advance();
                tokens.push(token);
            }
        }
    }

    let span = tokens
        .first()
        .map(|first| {
            tokens
                .iter()
                .fold(first.span(), |span, token| span.to(token.span()))
        })
        .unwrap_or(Span::new(0..0));

    if !has_name {
        diagnostics.emit(
            Diagnostic::error(format!("missing {} name", kind.noun()))
                .with_code(kind.missing_name_code())
                .with_label(span, "expected a name between the parentheses"),
        );
    }
    if !closed {
        diagnostics.emit(
            Diagnostic::error(format!("unclosed {} reference", kind.noun()))
                .with_code(kind.unclosed_code())
                .with_label(span, "missing `)`"),
        );
    }

    match kind {
        ReferenceKind::Property => Expression::PropertyRef(tokens),
        ReferenceKind::Item => Expression::ItemRef(tokens),
    }
}

/// Scan a quoted string in condition position.
fn parse_quoted<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
) -> Expression<'src> {
    let Some(open) = cursor.advance() else {
        return Expression::UnquotedText(Vec::new());
    };
    let quote = open.quote_char();

    let inner = parse_value_expression(cursor, diagnostics, true, quote);

    let close = match cursor.current() {
        Some(token) if token.kind == TokenKind::Quote && token.quote_char() == quote => {
            cursor.advance()
        }
        _ => {
            diagnostics.emit(
                Diagnostic::error("missing end quote")
                    .with_code(ErrorCode::E106)
                    .with_label(open.span(), "this string is never closed"),
            );
            None
        }
    };

    Expression::QuotedText {
        open,
        inner: inner.map(Box::new),
        close,
    }
}

/// Prefix negation inside a quoted string.
fn parse_negation<'src>(
    cursor: &mut TokenCursor<'src>,
    diagnostics: &mut DiagnosticCollector,
    closing_quote: Option<char>,
) -> Expression<'src> {
    let Some(bang) = cursor.advance() else {
        return Expression::UnquotedText(Vec::new());
    };
    let operator = Operator::new(OperatorKind::Negation, vec![bang]);

    let operand = parse_value_expression(cursor, diagnostics, true, closing_quote);

    if operand.as_ref().is_none_or(Expression::is_whitespace) {
        diagnostics.emit(
            Diagnostic::error("missing expression after `!`")
                .with_code(ErrorCode::E110)
                .with_label(operator.span(), "`!` needs an expression to negate"),
        );
    }

    Expression::Prefix {
        operator,
        operand: operand.map(Box::new),
    }
}

/// Consume a maximal run of ordinary text.
///
/// The run stops before the next reference opener and, in condition mode,
/// before any quote, `=`, or `!`. A `$` or `@` not followed by `(` is
/// ordinary text.
fn parse_text_run<'src>(
    cursor: &mut TokenCursor<'src>,
    inside_condition: bool,
) -> Expression<'src> {
    let mut tokens = Vec::new();

    while let Some(token) = cursor.current() {
        let boundary = match token.kind {
            TokenKind::Dollar | TokenKind::At => {
                peek_kind(cursor, 1) == Some(TokenKind::LeftParen)
            }
            TokenKind::Quote | TokenKind::Equals | TokenKind::Bang => inside_condition,
            _ => false,
        };
        if boundary {
            break;
        }
        cursor.advance();
        tokens.push(token);
    }

    Expression::UnquotedText(tokens)
}

fn peek_kind(cursor: &TokenCursor<'_>, n: usize) -> Option<TokenKind> {
    cursor.peek(n).map(|token| token.kind)
}
