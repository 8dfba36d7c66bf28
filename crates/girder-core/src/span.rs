//! Byte spans into source text.
//!
//! A [`Span`] identifies a half-open byte range in the original document.
//! Every node of the markup tree and every parsed expression carries one, so
//! diagnostics can point back at the exact source text without re-scanning.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A half-open byte range `start..end` into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end);
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Byte offset of the first character covered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character covered.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether `offset` falls inside this span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The covered range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(10..25);
        assert_eq!(span.start(), 10);
        assert_eq!(span.end(), 25);
        assert_eq!(span.len(), 15);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_union() {
        let a = Span::new(5..10);
        let b = Span::new(8..20);
        assert_eq!(a.to(b), Span::new(5..20));
        assert_eq!(b.to(a), Span::new(5..20));
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(3..6);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(4..4);
        assert!(span.is_empty());
        assert!(!span.contains(4));
    }
}
