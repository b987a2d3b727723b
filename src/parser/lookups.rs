use std::collections::HashMap;

use crate::{
    ast::{expressions::Value, statements::StmtKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Precedence levels from loosest to tightest.
///
/// The binary levels `LogicalOr` through `Multiplicative` are folded by one
/// generic routine, see `parse_binary`.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Ternary,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
}

impl BindingPower {
    /// The next tighter level.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Assignment,
            BindingPower::Assignment => BindingPower::Ternary,
            BindingPower::Ternary => BindingPower::LogicalOr,
            BindingPower::LogicalOr => BindingPower::LogicalAnd,
            BindingPower::LogicalAnd => BindingPower::BitwiseOr,
            BindingPower::BitwiseOr => BindingPower::BitwiseAnd,
            BindingPower::BitwiseAnd => BindingPower::Equality,
            BindingPower::Equality => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative | BindingPower::Unary => BindingPower::Unary,
        }
    }

    /// Equality and relational operators apply at most once per level.
    pub fn is_chaining(self) -> bool {
        !matches!(self, BindingPower::Equality | BindingPower::Relational)
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<StmtKind, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Value, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical and bitwise
    parser.led(TokenKind::Or, BindingPower::LogicalOr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd);
    parser.led(TokenKind::BitOr, BindingPower::BitwiseOr);
    parser.led(TokenKind::BitAnd, BindingPower::BitwiseAnd);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality);
    parser.led(TokenKind::NotEquals, BindingPower::Equality);
    parser.led(TokenKind::Less, BindingPower::Relational);
    parser.led(TokenKind::LessEquals, BindingPower::Relational);
    parser.led(TokenKind::Greater, BindingPower::Relational);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive);
    parser.led(TokenKind::Dash, BindingPower::Additive);
    parser.led(TokenKind::Star, BindingPower::Multiplicative);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative);

    // Literals and symbols
    parser.nud(TokenKind::String, parse_string_value);
    parser.nud(TokenKind::Integer, parse_integer_value);
    parser.nud(TokenKind::Double, parse_double_value);
    parser.nud(TokenKind::True, parse_bool_value);
    parser.nud(TokenKind::False, parse_bool_value);
    parser.nud(TokenKind::Identifier, parse_identifier_value);

    // Keyword statements
    parser.stmt(TokenKind::Import, parse_import_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Printf, parse_printf_stmt);
}

// Lookup tables inside parser struct, so each parse owns its own
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
