use std::fmt::Display;

use thiserror::Error;

use crate::{Position, Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &'static str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::MalformedDouble { .. } => "MalformedDouble",
            ErrorImpl::LooseDoubleSeparator { .. } => "LooseDoubleSeparator",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::NoViableAlternative { .. } => "NoViableAlternative",
            ErrorImpl::InvalidMainReturnType { .. } => "InvalidMainReturnType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String literals must be closed with `\"` before the end of the line",
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comments must be closed with `*/`"))
            }
            ErrorImpl::MalformedDouble { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a double needs digits after the decimal point",
                token
            )),
            ErrorImpl::LooseDoubleSeparator { separator, .. } => ErrorTip::Suggestion(format!(
                "`{}` is read as a decimal separator, did you mean `.`?",
                separator
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { expected, .. } => {
                if expected == "';'" {
                    ErrorTip::Suggestion(String::from("Did you miss a semicolon?"))
                } else {
                    ErrorTip::Suggestion(format!("Expected {} here", expected))
                }
            }
            ErrorImpl::UnexpectedEof { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::NoViableAlternative { rule, .. } => {
                ErrorTip::Suggestion(format!("This token cannot start {}", rule))
            }
            ErrorImpl::InvalidMainReturnType { .. } => {
                ErrorTip::Suggestion(String::from("The main function is declared as `f<int> main()`"))
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::LooseDoubleSeparator { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::UnterminatedComment
                | ErrorImpl::MalformedDouble { .. }
                | ErrorImpl::LooseDoubleSeparator { .. }
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: self.severity(),
            kind: if self.is_lexical() {
                DiagnosticKind::Lexer
            } else {
                DiagnosticKind::Parser
            },
            message: self.internal_error.to_string(),
            line: self.span.start.line,
            column: self.span.start.column,
            length: self.span.len().max(1),
            offset: self.span.start.offset,
            name: self.get_error_name(),
            tip: match self.get_tip() {
                ErrorTip::None => None,
                ErrorTip::Suggestion(tip) => Some(tip),
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_diagnostic())
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("token recognition error at: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("malformed double literal: {token:?}")]
    MalformedDouble { token: String },
    #[error("double literal {token:?} uses {separator:?} as its separator")]
    LooseDoubleSeparator { token: String, separator: char },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("no viable alternative at {found} while parsing {rule}")]
    NoViableAlternative { rule: &'static str, found: String },
    #[error("main function must return int, found {found}")]
    InvalidMainReturnType { found: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
}

/// A syntax diagnostic as handed to downstream phases.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub length: usize,
    /// Byte offset of the anchor, for snippet rendering.
    pub offset: u32,
    /// `ErrorImpl` variant name, e.g. `UnexpectedToken`.
    pub name: &'static str,
    pub tip: Option<String>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.kind {
            DiagnosticKind::Lexer => "Lexer",
            DiagnosticKind::Parser => "Parser",
        };
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{} {} at line {}:{} {}",
            phase, level, self.line, self.column, self.message
        )
    }
}
