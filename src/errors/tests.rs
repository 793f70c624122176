//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::{Position, Span};

fn span_at(offset: u32, line: u32, column: u32) -> Span {
    let position = Position::new(offset, line, column);
    Span::new(position, position)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(10, 1, 11),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.kind(), ErrorKind::Lex);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
            expected: "`;`".to_string(),
        },
        span_at(42, 3, 7),
    );

    assert_eq!(error.get_span().start.offset, 42);
    assert_eq!(error.get_span().start.line, 3);
    assert_eq!(error.get_span().start.column, 7);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: "expression".to_string(),
        },
        span_at(0, 1, 1),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_tip().to_string(), "found `}`, expected expression");
}

#[test]
fn test_lexical_error_kinds() {
    for inner in [
        ErrorImpl::UnterminatedString,
        ErrorImpl::NewlineInString,
        ErrorImpl::UnterminatedBlockComment,
        ErrorImpl::InvalidEscape {
            escape: "\\xZ".to_string(),
        },
    ] {
        assert_eq!(Error::new(inner, span_at(0, 1, 1)).kind(), ErrorKind::Lex);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(0, 1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: "#".to_string(),
            message: "attributes are not allowed on use declarations".to_string(),
        },
        span_at(0, 1, 1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(ErrorImpl::UnterminatedString, span_at(5, 2, 4));
    assert_eq!(error.to_string(), "2:4: unterminated string literal");
}
