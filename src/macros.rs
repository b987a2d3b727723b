//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer and the AST:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-spelling tokens
//! - `IMPL_NODE!` - Implements the `Node` trait for a syntax node
//!
//! These macros reduce boilerplate in the lexer pattern table and the AST.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The exact source text of the token
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for fixed-spelling tokens.
///
/// The generated handler emits a token of the given kind covering exactly
/// the text the pattern matched.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |_lexer: &Lexer, matched: &str| Scan::Emit($kind, matched.len())
    };
}

/// Implements `Node` for a struct with a `span` field.
///
/// # Arguments
///
/// * `$node` - The node struct
/// * `$variant` - The `NodeType` variant it reports
///
/// # Example
///
/// ```ignore
/// IMPL_NODE!(ReturnStmt, ReturnStmt);
/// ```
#[macro_export]
macro_rules! IMPL_NODE {
    ($node:ty, $variant:ident) => {
        impl $crate::ast::ast::Node for $node {
            fn get_node_type(&self) -> $crate::ast::ast::NodeType {
                $crate::ast::ast::NodeType::$variant
            }
            fn get_span(&self) -> &$crate::Span {
                &self.span
            }
        }
    };
}
