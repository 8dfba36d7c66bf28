//! Error codes for the girder diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Markup reader errors
//! - `E1xx` - Expression syntax errors
//! - `E2xx` - Structural validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Markup reader errors (E0xx)
    // =========================================================================
    /// Unterminated element.
    ///
    /// An element was opened but the document ended before its closing tag.
    E001,

    /// Unexpected markup character.
    ///
    /// A character was encountered where markup was expected.
    E002,

    /// Mismatched closing tag.
    ///
    /// A closing tag does not match the innermost open element.
    E003,

    /// Malformed attribute.
    ///
    /// An attribute is missing its `=`, its quotes, or its closing quote.
    E004,

    /// Unterminated comment or CDATA section.
    E005,

    /// Content after the document element.
    ///
    /// Non-whitespace text appeared at the top level of the document.
    E006,

    // =========================================================================
    // Expression syntax errors (E1xx)
    // =========================================================================
    /// Invalid character in a property name.
    ///
    /// Property names inside `$()` may use letters, digits, `_`, `-`, and `.`.
    E100,

    /// Missing property name.
    ///
    /// A `$()` reference contains no name.
    E101,

    /// Unclosed property reference.
    ///
    /// A `$(` reference has no closing `)`.
    E102,

    /// Invalid character in an item name.
    ///
    /// Item names inside `@()` may use letters, digits, `_`, `-`, and `.`.
    E103,

    /// Missing item name.
    ///
    /// An `@()` reference contains no name.
    E104,

    /// Unclosed item reference.
    ///
    /// An `@(` reference has no closing `)`.
    E105,

    /// Missing end quote.
    ///
    /// A quoted string in a condition was never closed.
    E106,

    /// Expected a second `=`.
    ///
    /// Equality comparison is written `==`; a single `=` was found.
    E107,

    /// Missing left operand.
    ///
    /// A binary operator has nothing to its left.
    E108,

    /// Missing right operand.
    ///
    /// A binary operator has nothing to its right.
    E109,

    /// Missing operand after `!`.
    ///
    /// Logical negation has no expression to negate.
    E110,

    // =========================================================================
    // Structural validation errors (E2xx)
    // =========================================================================
    /// Unknown attribute.
    ///
    /// The attribute is not valid on this element.
    E200,

    /// Missing required attribute.
    E201,

    /// Mutually exclusive attributes.
    ///
    /// Two attributes that cannot be combined are both present.
    E202,

    /// Invalid child element.
    ///
    /// The child element is not valid inside this element.
    E203,

    /// Missing required child element.
    E204,

    /// Child element must be last.
    ///
    /// An element that must be the final child is followed by a sibling.
    E205,

    /// More than one child of a kind allowed at most once.
    E206,

    /// Text content not allowed.
    ///
    /// This element does not permit free text content.
    E207,

    /// Expected a Project root element.
    ///
    /// The first top-level element of a project file must be `Project`.
    E208,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Markup reader errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            // Expression syntax errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E108 => "E108",
            ErrorCode::E109 => "E109",
            ErrorCode::E110 => "E110",
            // Structural validation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Markup reader errors
            ErrorCode::E001 => "unterminated element",
            ErrorCode::E002 => "unexpected markup character",
            ErrorCode::E003 => "mismatched closing tag",
            ErrorCode::E004 => "malformed attribute",
            ErrorCode::E005 => "unterminated comment or CDATA",
            ErrorCode::E006 => "content outside document element",
            // Expression syntax errors
            ErrorCode::E100 => "invalid property name character",
            ErrorCode::E101 => "missing property name",
            ErrorCode::E102 => "unclosed property reference",
            ErrorCode::E103 => "invalid item name character",
            ErrorCode::E104 => "missing item name",
            ErrorCode::E105 => "unclosed item reference",
            ErrorCode::E106 => "missing end quote",
            ErrorCode::E107 => "expected second `=`",
            ErrorCode::E108 => "missing left operand",
            ErrorCode::E109 => "missing right operand",
            ErrorCode::E110 => "missing operand after `!`",
            // Structural validation errors
            ErrorCode::E200 => "unknown attribute",
            ErrorCode::E201 => "missing required attribute",
            ErrorCode::E202 => "mutually exclusive attributes",
            ErrorCode::E203 => "invalid child element",
            ErrorCode::E204 => "missing required child element",
            ErrorCode::E205 => "child element must be last",
            ErrorCode::E206 => "more than one child of this kind",
            ErrorCode::E207 => "text content not allowed",
            ErrorCode::E208 => "expected Project root element",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E208.to_string(), "E208");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "missing property name");
        assert_eq!(ErrorCode::E200.description(), "unknown attribute");
        assert_eq!(
            ErrorCode::E206.description(),
            "more than one child of this kind"
        );
    }
}
