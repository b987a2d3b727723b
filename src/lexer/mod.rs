//! Lexical analysis module for the front end.
//!
//! This module turns source text into tokens for the parser. It handles:
//!
//! - Tokenization using an anchored regex pattern table (longest match wins)
//! - Recognition of keywords, identifiers, literals and operators
//! - Line and column tracking for every token
//! - Comments and whitespace
//! - The buffered token stream with lookahead and rewind used by the parser

pub mod lexer;
pub mod stream;
pub mod tokens;
