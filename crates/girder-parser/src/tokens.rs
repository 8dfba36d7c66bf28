//! Tokenizer for expression text.
//!
//! Attribute values and text content are tokenized into coarse
//! character-class runs before expression parsing. The classifier is total:
//! every character belongs to exactly one class (unrecognized characters fall
//! into [`TokenKind::Symbol`]), so tokenization itself can never fail and
//! emits no diagnostics.
//!
//! The public entry points are [`tokenize`] and [`tokenize_at`]; the parser
//! consumes the result through the forward-only [`TokenCursor`].

use winnow::{
    Parser as _,
    combinator::alt,
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{any, one_of, take_while},
};

use girder_core::Span;

/// The coarse character class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of alphabetic characters.
    Letters,
    /// A maximal run of ASCII digits.
    Digits,
    Period,
    Dash,
    Underscore,
    Colon,
    Dollar,
    At,
    LeftParen,
    RightParen,
    Equals,
    Bang,
    /// A single quote character: `'`, `"`, or `` ` ``.
    Quote,
    /// A maximal run of whitespace.
    Whitespace,
    /// Any other single character.
    Symbol,
}

impl TokenKind {
    /// Whether tokens of this class may appear in a property or item name.
    pub fn is_reference_name(&self) -> bool {
        matches!(
            self,
            TokenKind::Letters
                | TokenKind::Digits
                | TokenKind::Underscore
                | TokenKind::Dash
                | TokenKind::Period
        )
    }
}

/// One token of expression text: class, source slice, and start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: usize,
}

impl<'src> Token<'src> {
    /// The source span of this token.
    pub fn span(&self) -> Span {
        Span::new(self.start..self.start + self.text.len())
    }

    /// The quote character, for [`TokenKind::Quote`] tokens.
    pub fn quote_char(&self) -> Option<char> {
        match self.kind {
            TokenKind::Quote => self.text.chars().next(),
            _ => None,
        }
    }

    /// Whether the token is a whitespace run.
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

type Input<'src> = LocatingSlice<&'src str>;

/// Classify the next run of input.
///
/// Run classes (letters, digits, whitespace) are maximal; everything else is
/// a single character. The trailing `any` alternative makes the classifier
/// total.
fn token_kind(input: &mut Input<'_>) -> Result<TokenKind, ErrMode<ContextError>> {
    alt((
        take_while(1.., |c: char| c.is_alphabetic()).value(TokenKind::Letters),
        take_while(1.., |c: char| c.is_ascii_digit()).value(TokenKind::Digits),
        take_while(1.., |c: char| c.is_whitespace()).value(TokenKind::Whitespace),
        '.'.value(TokenKind::Period),
        '-'.value(TokenKind::Dash),
        '_'.value(TokenKind::Underscore),
        ':'.value(TokenKind::Colon),
        '$'.value(TokenKind::Dollar),
        '@'.value(TokenKind::At),
        '('.value(TokenKind::LeftParen),
        ')'.value(TokenKind::RightParen),
        '='.value(TokenKind::Equals),
        '!'.value(TokenKind::Bang),
        one_of(['\'', '"', '`']).value(TokenKind::Quote),
        any.value(TokenKind::Symbol),
    ))
    .parse_next(input)
}

/// Parse a single token with position tracking.
fn token<'src>(input: &mut Input<'src>) -> Result<Token<'src>, ErrMode<ContextError>> {
    let start = input.current_token_start();
    let (kind, text) = token_kind.with_taken().parse_next(input)?;
    Ok(Token { kind, text, start })
}

/// Tokenize expression text into character-class runs.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    tokenize_at(text, 0)
}

/// Tokenize expression text whose first byte sits at `base_offset` in the
/// containing document, so token spans point into the document.
pub fn tokenize_at(text: &str, base_offset: usize) -> Vec<Token<'_>> {
    let mut input = LocatingSlice::new(text);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        match token(&mut input) {
            Ok(mut tok) => {
                tok.start += base_offset;
                tokens.push(tok);
            }
            // The classifier is total; only exhausted input fails.
            Err(_) => break,
        }
    }

    tokens
}

/// A forward-only cursor over a token list.
///
/// The parser advances the cursor and reads the current token; tokens are
/// never mutated and the cursor never moves backwards.
#[derive(Debug)]
pub struct TokenCursor<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
}

impl<'src> TokenCursor<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Tokenize `text` (at `base_offset` in the document) and position a
    /// cursor at its first token.
    pub fn for_text(text: &'src str, base_offset: usize) -> Self {
        Self::new(tokenize_at(text, base_offset))
    }

    /// Whether a current token exists.
    pub fn has_current(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// The current token, if any.
    pub fn current(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    /// The token `n` positions ahead of the current one.
    pub fn peek(&self, n: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + n).copied()
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Option<Token<'src>> {
        let tok = self.current();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// The cursor's position, for progress checks.
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            kinds("$(Config)"),
            vec![
                TokenKind::Dollar,
                TokenKind::LeftParen,
                TokenKind::Letters,
                TokenKind::RightParen,
            ]
        );
        assert_eq!(
            kinds("a1_b-c.d:e"),
            vec![
                TokenKind::Letters,
                TokenKind::Digits,
                TokenKind::Underscore,
                TokenKind::Letters,
                TokenKind::Dash,
                TokenKind::Letters,
                TokenKind::Period,
                TokenKind::Letters,
                TokenKind::Colon,
                TokenKind::Letters,
            ]
        );
        assert_eq!(
            kinds("'!='"),
            vec![
                TokenKind::Quote,
                TokenKind::Bang,
                TokenKind::Equals,
                TokenKind::Quote,
            ]
        );
        assert_eq!(kinds("#"), vec![TokenKind::Symbol]);
    }

    #[test]
    fn test_runs_are_maximal() {
        let tokens = tokenize("abc  123");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[1].text, "  ");
        assert_eq!(tokens[2].text, "123");
    }

    #[test]
    fn test_spans_with_base_offset() {
        let tokens = tokenize_at("$(P)", 100);
        assert_eq!(tokens[0].span(), Span::new(100..101));
        assert_eq!(tokens[3].span(), Span::new(103..104));
    }

    #[test]
    fn test_quote_char() {
        let tokens = tokenize("'\"`");
        assert_eq!(tokens[0].quote_char(), Some('\''));
        assert_eq!(tokens[1].quote_char(), Some('"'));
        assert_eq!(tokens[2].quote_char(), Some('`'));
    }

    #[test]
    fn test_cursor_forward_only() {
        let mut cursor = TokenCursor::for_text("a=b", 0);
        assert!(cursor.has_current());
        assert_eq!(cursor.peek(1).unwrap().kind, TokenKind::Equals);

        assert_eq!(cursor.advance().unwrap().text, "a");
        assert_eq!(cursor.advance().unwrap().text, "=");
        assert_eq!(cursor.advance().unwrap().text, "b");
        assert_eq!(cursor.advance(), None);
        assert!(!cursor.has_current());
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            /// Concatenating token text reproduces the input exactly.
            #[test]
            fn tokenize_is_lossless(text in ".*") {
                let rebuilt: String =
                    tokenize(&text).iter().map(|t| t.text).collect();
                prop_assert_eq!(rebuilt, text);
            }

            /// Token spans tile the input without gaps or overlap.
            #[test]
            fn tokens_are_contiguous(text in ".*") {
                let mut offset = 0;
                for tok in tokenize(&text) {
                    prop_assert_eq!(tok.start, offset);
                    offset += tok.text.len();
                }
                prop_assert_eq!(offset, text.len());
            }
        }
    }
}
