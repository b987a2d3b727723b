//! Unit tests for error handling.
//!
//! This module contains tests for error types, tips and diagnostics.

use crate::errors::errors::{DiagnosticKind, Error, ErrorImpl, ErrorTip, Severity};
use crate::{Position, Span};

fn span_at(offset: u32, line: u32, column: u32, len: u32) -> Span {
    let start = Position {
        offset,
        line,
        column,
    };
    let end = Position {
        offset: offset + len,
        line,
        column: column + len,
    };
    Span::new(start, end)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(10, 2, 4, 1),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().offset, 10);
    assert!(error.is_lexical());
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "'int'".to_string(),
        },
        span_at(6, 2, 1, 3),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "Parser error at line 2:1 expected ';', found 'int'"
    );
}

#[test]
fn test_missing_semicolon_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "'}'".to_string(),
        },
        span_at(0, 1, 1, 1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Did you miss a semicolon?"),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        span_at(0, 1, 1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_lexer_diagnostic() {
    let error = Error::new(
        ErrorImpl::MalformedDouble {
            token: "-12.".to_string(),
        },
        span_at(4, 1, 5, 4),
    );
    let diagnostic = error.to_diagnostic();

    assert_eq!(diagnostic.kind, DiagnosticKind::Lexer);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!((diagnostic.line, diagnostic.column), (1, 5));
    assert_eq!(diagnostic.length, 4);
    assert_eq!(diagnostic.offset, 4);
    assert_eq!(
        diagnostic.to_string(),
        "Lexer error at line 1:5 malformed double literal: \"-12.\""
    );
}

#[test]
fn test_loose_separator_is_a_warning() {
    let error = Error::new(
        ErrorImpl::LooseDoubleSeparator {
            token: "1x2".to_string(),
            separator: 'x',
        },
        span_at(0, 1, 1, 3),
    );

    assert_eq!(error.severity(), Severity::Warning);
    assert!(error.to_string().starts_with("Lexer warning at line 1:1"));
}

#[test]
fn test_eof_diagnostic_has_length_one() {
    let error = Error::new(
        ErrorImpl::UnexpectedEof {
            expected: "'}'".to_string(),
        },
        span_at(20, 3, 1, 0),
    );

    let diagnostic = error.to_diagnostic();
    assert_eq!(diagnostic.length, 1);
    assert_eq!(diagnostic.kind, DiagnosticKind::Parser);
    assert_eq!(
        diagnostic.message,
        "unexpected end of input, expected '}'"
    );
}

#[test]
fn test_severity_order() {
    assert!(Severity::Error > Severity::Warning);
}

#[test]
fn test_main_return_type_error() {
    let error = Error::new(
        ErrorImpl::InvalidMainReturnType {
            found: "string".to_string(),
        },
        span_at(2, 1, 3, 6),
    );

    assert_eq!(error.get_error_name(), "InvalidMainReturnType");
    assert!(!error.is_lexical());
    assert_eq!(error.get_span().len(), 6);
}

#[test]
fn test_diagnostic_carries_name_and_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "'int'".to_string(),
        },
        span_at(6, 2, 1, 3),
    );
    let diagnostic = error.to_diagnostic();

    assert_eq!(diagnostic.name, "UnexpectedToken");
    assert_eq!(diagnostic.tip.as_deref(), Some("Did you miss a semicolon?"));

    let untipped = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(0, 1, 1, 1),
    )
    .to_diagnostic();
    assert_eq!(untipped.name, "UnrecognisedToken");
    assert!(untipped.tip.is_none());
}
