use log::trace;

use crate::{
    ast::{
        statements::{
            BreakStmt, ContinueStmt, DeclStmt, ElseBranch, ElseStmt, FieldList, ForLoop,
            FunctionCall, FunctionDef, IfStmt, ImportStmt, MainFunctionDef, ParamDef,
            ParamListCall, ParamListDef, PrintfStmt, ProcedureDef, ReturnStmt, Stmt, StmtKind,
            StmtList, StmtListItem, StructDef, WhileLoop,
        },
        types::DataType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_assignment, parse_ident, parse_integer_literal, parse_string_literal},
    parser::{Parser, SyncScope},
    predict::{
        predict_else, predict_param, predict_stmt, starts_stmt_list_item, ElseAlt, ParamAlt,
        StmtAlt,
    },
    types::parse_data_type,
};

// DEFINITIONS

/// `f<int> main(params?) { ... }`
pub fn parse_main_function_def(parser: &mut Parser) -> Result<MainFunctionDef, Error> {
    let start = parser.expect(TokenKind::F)?.start();
    parser.expect(TokenKind::Less)?;

    // Reported in place; the rest of the definition still parses.
    let (return_type, type_span) = parse_data_type(parser)?;
    if return_type != DataType::Int {
        parser.report(Error::new(
            ErrorImpl::InvalidMainReturnType {
                found: return_type.to_string(),
            },
            type_span,
        ));
    }

    parser.expect(TokenKind::Greater)?;
    parser.expect(TokenKind::Main)?;
    let params = parse_param_parens(parser)?;
    let body = parse_block(parser)?;

    Ok(MainFunctionDef {
        params,
        body,
        span: parser.span_from(start),
    })
}

/// `f<type> name(params?) { ... }`
pub fn parse_function_def(parser: &mut Parser) -> Result<FunctionDef, Error> {
    let start = parser.expect(TokenKind::F)?.start();
    parser.expect(TokenKind::Less)?;
    let (return_type, _) = parse_data_type(parser)?;
    parser.expect(TokenKind::Greater)?;

    let name = parse_ident(parser)?;
    let params = parse_param_parens(parser)?;
    let body = parse_block(parser)?;

    Ok(FunctionDef {
        return_type,
        name,
        params,
        body,
        span: parser.span_from(start),
    })
}

/// `p name(params?) { ... }`
pub fn parse_procedure_def(parser: &mut Parser) -> Result<ProcedureDef, Error> {
    let start = parser.expect(TokenKind::P)?.start();
    let name = parse_ident(parser)?;
    let params = parse_param_parens(parser)?;
    let body = parse_block(parser)?;

    Ok(ProcedureDef {
        name,
        params,
        body,
        span: parser.span_from(start),
    })
}

/// `type name struct { fields }`
pub fn parse_struct_def(parser: &mut Parser) -> Result<StructDef, Error> {
    let start = parser.expect(TokenKind::Type)?.start();
    let name = parse_ident(parser)?;
    parser.expect(TokenKind::Struct)?;
    parser.expect(TokenKind::OpenCurly)?;
    let fields = parse_field_list(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(StructDef {
        name,
        fields,
        span: parser.span_from(start),
    })
}

/// Bare `type name` pairs, no separators.
pub fn parse_field_list(parser: &mut Parser) -> Result<FieldList, Error> {
    let start = parser.get_position();
    let mut fields = vec![];

    loop {
        let kind = parser.current_token_kind();
        if kind != TokenKind::Const && !kind.is_data_type() {
            break;
        }
        fields.push(parse_decl_stmt(parser)?);
    }

    Ok(FieldList {
        fields,
        span: parser.span_from(start),
    })
}

/// `( params? )`
fn parse_param_parens(parser: &mut Parser) -> Result<Option<ParamListDef>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let params = match parser.current_token_kind() {
        TokenKind::CloseParen => None,
        _ => Some(parse_param_list_def(parser)?),
    };
    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

pub fn parse_param_list_def(parser: &mut Parser) -> Result<ParamListDef, Error> {
    let start = parser.get_position();
    let mut params = vec![];

    loop {
        let param = match predict_param(parser) {
            ParamAlt::Decl => ParamDef::Decl(parse_decl_stmt(parser)?),
            ParamAlt::Assignment => ParamDef::Default(parse_assignment(parser)?),
        };
        params.push(param);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(ParamListDef {
        params,
        span: parser.span_from(start),
    })
}

pub fn parse_param_list_call(parser: &mut Parser) -> Result<ParamListCall, Error> {
    let start = parser.get_position();
    let mut args = vec![parse_assignment(parser)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        args.push(parse_assignment(parser)?);
    }

    Ok(ParamListCall {
        args,
        span: parser.span_from(start),
    })
}

// BLOCKS AND CONTROL FLOW

/// `{ items }`. Errors in items are recorded here and parsing continues
/// with the next item. A block left open at end of input is reported and
/// returned with the items parsed so far.
pub fn parse_block(parser: &mut Parser) -> Result<StmtList, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.start();
    let mut items = vec![];

    loop {
        let kind = parser.current_token_kind();
        match kind {
            TokenKind::CloseCurly | TokenKind::EOF => break,
            _ if starts_stmt_list_item(kind) => {
                let item_start = parser.mark();
                match parse_stmt_list_item(parser) {
                    Ok(item) => items.push(item),
                    Err(error) => parser.recover(error, item_start, SyncScope::Block),
                }
            }
            _ => {
                let item_start = parser.mark();
                let error = parser.unexpected(&TokenKind::CloseCurly.to_string());
                parser.recover(error, item_start, SyncScope::Block);
            }
        }
    }

    if let Err(error) = parser.expect(TokenKind::CloseCurly) {
        parser.report(error);
    }

    Ok(StmtList {
        items,
        span: parser.span_from(start),
    })
}

pub fn parse_stmt_list_item(parser: &mut Parser) -> Result<StmtListItem, Error> {
    match parser.current_token_kind() {
        TokenKind::For => Ok(StmtListItem::ForLoop(parse_for_loop(parser)?)),
        TokenKind::While => Ok(StmtListItem::WhileLoop(parse_while_loop(parser)?)),
        TokenKind::If => Ok(StmtListItem::IfStmt(parse_if_stmt(parser)?)),
        _ => Ok(StmtListItem::Stmt(parse_stmt(parser)?)),
    }
}

/// `for init; condition; step { ... }`
pub fn parse_for_loop(parser: &mut Parser) -> Result<ForLoop, Error> {
    let start = parser.expect(TokenKind::For)?.start();

    let init = parse_assignment(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    let condition = parse_assignment(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    let step = parse_assignment(parser)?;
    let body = parse_block(parser)?;

    Ok(ForLoop {
        init,
        condition,
        step,
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_while_loop(parser: &mut Parser) -> Result<WhileLoop, Error> {
    let start = parser.expect(TokenKind::While)?.start();
    let condition = parse_assignment(parser)?;
    let body = parse_block(parser)?;

    Ok(WhileLoop {
        condition,
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.start();
    let condition = parse_assignment(parser)?;
    let body = parse_block(parser)?;

    let else_stmt = match parser.current_token_kind() {
        TokenKind::Else => Some(Box::new(parse_else_stmt(parser)?)),
        _ => None,
    };

    Ok(IfStmt {
        condition,
        body,
        else_stmt,
        span: parser.span_from(start),
    })
}

/// `else if ...` chains; any other `else` takes a block.
pub fn parse_else_stmt(parser: &mut Parser) -> Result<ElseStmt, Error> {
    let alternative = predict_else(parser);
    let start = parser.expect(TokenKind::Else)?.start();

    let branch = match alternative {
        ElseAlt::If => ElseBranch::If(parse_if_stmt(parser)?),
        ElseAlt::Block => ElseBranch::Block(parse_block(parser)?),
    };

    Ok(ElseStmt {
        branch,
        span: parser.span_from(start),
    })
}

// STATEMENTS

/// One simple statement and its `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let kind = parser.current_token_kind();

    let stmt = match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser)?,
        None => match predict_stmt(parser) {
            StmtAlt::Decl => StmtKind::Decl(parse_decl_stmt(parser)?),
            StmtAlt::FunctionCall => parse_call_or_assignment(parser)?,
            StmtAlt::Assignment => StmtKind::Assignment(parse_assignment(parser)?),
        },
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        kind: stmt,
        span: parser.span_from(start),
    })
}

/// A call statement is a call directly followed by `;`. Anything else,
/// such as `f() + 1;`, is reparsed as an expression.
fn parse_call_or_assignment(parser: &mut Parser) -> Result<StmtKind, Error> {
    let mark = parser.mark();

    if let Ok(call) = parse_function_call(parser) {
        if parser.current_token_kind() == TokenKind::Semicolon {
            return Ok(StmtKind::FunctionCall(call));
        }
    }

    trace!("call is part of a larger expression, reparsing");
    parser.reset(mark);
    Ok(StmtKind::Assignment(parse_assignment(parser)?))
}

/// `const? type name`
pub fn parse_decl_stmt(parser: &mut Parser) -> Result<DeclStmt, Error> {
    let start = parser.get_position();

    let is_const = parser.current_token_kind() == TokenKind::Const;
    if is_const {
        parser.advance();
    }

    let (data_type, _) = parse_data_type(parser)?;
    let identifier = parse_ident(parser)?;

    Ok(DeclStmt {
        is_const,
        data_type,
        identifier,
        span: parser.span_from(start),
    })
}

/// `(identifier '.')* identifier ( args? )`
pub fn parse_function_call(parser: &mut Parser) -> Result<FunctionCall, Error> {
    let start = parser.get_position();
    let mut qualifiers = vec![];
    let mut name = parse_ident(parser)?;

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        qualifiers.push(name);
        name = parse_ident(parser)?;
    }

    parser.expect(TokenKind::OpenParen)?;
    let args = match parser.current_token_kind() {
        TokenKind::CloseParen => None,
        _ => Some(parse_param_list_call(parser)?),
    };
    parser.expect(TokenKind::CloseParen)?;

    Ok(FunctionCall {
        qualifiers,
        name,
        args,
        span: parser.span_from(start),
    })
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<StmtKind, Error> {
    let start = parser.expect(TokenKind::Import)?.start();
    let path = parse_string_literal(parser)?;
    parser.expect(TokenKind::As)?;
    let alias = parse_ident(parser)?;

    Ok(StmtKind::Import(ImportStmt {
        path,
        alias,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtKind, Error> {
    let start = parser.expect(TokenKind::Return)?.start();
    let value = parse_assignment(parser)?;

    Ok(StmtKind::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<StmtKind, Error> {
    let start = parser.expect(TokenKind::Break)?.start();
    let levels = match parser.current_token_kind() {
        TokenKind::Integer => Some(parse_integer_literal(parser)?),
        _ => None,
    };

    Ok(StmtKind::Break(BreakStmt {
        levels,
        span: parser.span_from(start),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<StmtKind, Error> {
    let start = parser.expect(TokenKind::Continue)?.start();
    let levels = match parser.current_token_kind() {
        TokenKind::Integer => Some(parse_integer_literal(parser)?),
        _ => None,
    };

    Ok(StmtKind::Continue(ContinueStmt {
        levels,
        span: parser.span_from(start),
    }))
}

/// `printf("format", args...)`
pub fn parse_printf_stmt(parser: &mut Parser) -> Result<StmtKind, Error> {
    let start = parser.expect(TokenKind::Printf)?.start();
    parser.expect(TokenKind::OpenParen)?;
    let format = parse_string_literal(parser)?;

    let mut args = vec![];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        args.push(parse_assignment(parser)?);
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(StmtKind::Printf(PrintfStmt {
        format,
        args,
        span: parser.span_from(start),
    }))
}
