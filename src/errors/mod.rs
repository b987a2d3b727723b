//! Error types and diagnostics for the front end.
//!
//! This module defines the errors produced while lexing and parsing.
//! It includes:
//!
//! - Error structures anchored at a source span
//! - Specific error variants for the lexer and the parser
//! - The `Diagnostic` records handed to downstream phases
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
