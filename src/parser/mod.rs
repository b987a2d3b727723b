//! Parser module for building the syntax tree.
//!
//! This module turns the token stream into an `Entry` tree. It is a
//! hand-written recursive-descent parser and handles:
//!
//! - Top-level items (statements, main/function/procedure/struct definitions)
//! - Blocks and control flow (`if`/`else`, `for`, `while`)
//! - Statements (declarations, assignments, calls, import, return, printf, ...)
//! - Expressions by precedence climbing over a flat table of binary levels
//! - Error recovery, so one pass reports every syntax error it can
//!
//! Rules that cannot decide on one token use the bounded-lookahead helpers
//! in `predict` before committing to an alternative.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod predict;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
