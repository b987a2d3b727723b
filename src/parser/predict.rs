//! Alternative selection for the rules that need more than one token.
//!
//! Each helper looks ahead with `peek` only and returns which alternative
//! to commit to. Nothing here consumes tokens.

use crate::lexer::tokens::TokenKind;

use super::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAlt {
    Stmt,
    MainFunctionDef,
    FunctionDef,
    ProcedureDef,
    StructDef,
}

/// Picks the top-level rule, `None` when no item starts here.
///
/// `f < T > main` goes to the main rule for any `T` so a wrong return type
/// is reported there.
pub fn predict_entry(parser: &mut Parser) -> Option<EntryAlt> {
    match parser.current_token_kind() {
        TokenKind::F => {
            if parser.peek_kind(1) == TokenKind::Less
                && parser.peek_kind(3) == TokenKind::Greater
                && parser.peek_kind(4) == TokenKind::Main
            {
                Some(EntryAlt::MainFunctionDef)
            } else {
                Some(EntryAlt::FunctionDef)
            }
        }
        TokenKind::P => Some(EntryAlt::ProcedureDef),
        TokenKind::Type => Some(EntryAlt::StructDef),
        kind if starts_stmt(kind) => Some(EntryAlt::Stmt),
        _ => None,
    }
}

/// Tokens that can begin a `stmt`.
pub fn starts_stmt(kind: TokenKind) -> bool {
    kind.is_data_type()
        || matches!(
            kind,
            TokenKind::Const
                | TokenKind::Import
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Printf
                | TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Integer
                | TokenKind::Double
                | TokenKind::True
                | TokenKind::False
                | TokenKind::OpenParen
                | TokenKind::Not
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
}

/// Tokens that can begin an item of a block.
pub fn starts_stmt_list_item(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::For | TokenKind::While | TokenKind::If) || starts_stmt(kind)
}

/// Statement shapes not handled by a keyword handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtAlt {
    Decl,
    /// A call, to be confirmed by a `;` right after it.
    FunctionCall,
    Assignment,
}

pub fn predict_stmt(parser: &mut Parser) -> StmtAlt {
    let decl = decl_prefix_len(parser, 0);
    if decl > 0 {
        return if parser.peek_kind(decl).is_assign_op() {
            StmtAlt::Assignment
        } else {
            StmtAlt::Decl
        };
    }

    match parser.current_token_kind() {
        TokenKind::Const => StmtAlt::Decl,
        kind if kind.is_data_type() => StmtAlt::Decl,
        _ if is_call_ahead(parser, 0) => StmtAlt::FunctionCall,
        _ => StmtAlt::Assignment,
    }
}

/// Left-hand side shapes of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShape {
    Decl,
    Path,
}

/// `Some` when a left-hand side followed by an assignment operator is ahead.
pub fn predict_assignment_target(parser: &mut Parser) -> Option<TargetShape> {
    let decl = decl_prefix_len(parser, 0);
    if decl > 0 {
        return parser
            .peek_kind(decl)
            .is_assign_op()
            .then_some(TargetShape::Decl);
    }

    let chain = dotted_chain_len(parser, 0);
    if chain > 0 && parser.peek_kind(chain).is_assign_op() {
        Some(TargetShape::Path)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAlt {
    Identifier,
    FunctionCall,
}

/// Distinguishes `a.b.c(` from a bare identifier.
pub fn predict_value(parser: &mut Parser) -> ValueAlt {
    if is_call_ahead(parser, 0) {
        ValueAlt::FunctionCall
    } else {
        ValueAlt::Identifier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElseAlt {
    If,
    Block,
}

/// Called with `else` as the current token.
pub fn predict_else(parser: &mut Parser) -> ElseAlt {
    if parser.peek_kind(1) == TokenKind::If {
        ElseAlt::If
    } else {
        ElseAlt::Block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamAlt {
    Decl,
    /// A parameter with a default value.
    Assignment,
}

pub fn predict_param(parser: &mut Parser) -> ParamAlt {
    let decl = decl_prefix_len(parser, 0);
    if decl > 0 && !parser.peek_kind(decl).is_assign_op() {
        ParamAlt::Decl
    } else {
        ParamAlt::Assignment
    }
}

/// Length of `identifier ('.' identifier)*` at `k`, 0 if there is none.
pub fn dotted_chain_len(parser: &mut Parser, k: usize) -> usize {
    if parser.peek_kind(k) != TokenKind::Identifier {
        return 0;
    }

    let mut len = 1;
    while parser.peek_kind(k + len) == TokenKind::Dot
        && parser.peek_kind(k + len + 1) == TokenKind::Identifier
    {
        len += 2;
    }
    len
}

/// Length of `const? dataType identifier` at `k`, 0 if there is none.
pub fn decl_prefix_len(parser: &mut Parser, k: usize) -> usize {
    let skip = usize::from(parser.peek_kind(k) == TokenKind::Const);
    if parser.peek_kind(k + skip).is_data_type()
        && parser.peek_kind(k + skip + 1) == TokenKind::Identifier
    {
        skip + 2
    } else {
        0
    }
}

fn is_call_ahead(parser: &mut Parser, k: usize) -> bool {
    let chain = dotted_chain_len(parser, k);
    chain > 0 && parser.peek_kind(k + chain) == TokenKind::OpenParen
}
