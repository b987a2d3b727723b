use crate::{
    ast::{
        ast::Ident,
        expressions::{
            AssignExpr, AssignOp, AssignTarget, BinaryExpr, BinaryOp, BoolLiteral, DoubleLiteral,
            Expr, IntegerLiteral, ParenExpr, PostfixExpr, PostfixOp, PrefixExpr, PrefixOp,
            StringLiteral, TernaryExpr, Value,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::unescape, tokens::TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    predict::{predict_assignment_target, predict_value, TargetShape, ValueAlt},
    stmt::{parse_decl_stmt, parse_function_call},
};

/// `[declStmt | a.b.c] assignOp ternary`, or just a ternary.
pub fn parse_assignment(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();

    let target = match predict_assignment_target(parser) {
        Some(TargetShape::Decl) => AssignTarget::Decl(parse_decl_stmt(parser)?),
        Some(TargetShape::Path) => AssignTarget::Path(parse_ident_chain(parser)?),
        None => return parse_ternary(parser),
    };

    let operator = match AssignOp::from_token(parser.current_token_kind()) {
        Some(operator) => {
            parser.advance();
            operator
        }
        None => return Err(parser.unexpected("an assignment operator")),
    };
    let value = parse_ternary(parser)?;

    Ok(Expr::Assignment(AssignExpr {
        target,
        operator,
        value: Box::new(value),
        span: parser.span_from(start),
    }))
}

/// Both branches are parsed at logical-or level; nesting needs parentheses.
pub fn parse_ternary(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();
    let condition = parse_binary(parser, BindingPower::LogicalOr)?;

    if parser.current_token_kind() != TokenKind::Question {
        return Ok(condition);
    }
    parser.advance();

    let then_expr = parse_binary(parser, BindingPower::LogicalOr)?;
    parser.expect(TokenKind::Colon)?;
    let else_expr = parse_binary(parser, BindingPower::LogicalOr)?;

    Ok(Expr::Ternary(TernaryExpr {
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
        span: parser.span_from(start),
    }))
}

/// Left fold of the operators registered at `level`, with operands from
/// the next tighter level.
pub fn parse_binary(parser: &mut Parser, level: BindingPower) -> Result<Expr, Error> {
    if level >= BindingPower::Unary {
        return parse_prefix_unary(parser);
    }

    let start = parser.get_position();
    let next = level.next();
    let mut left = parse_binary(parser, next)?;

    loop {
        // `i -1` lexes as `i` and `-1`; here it means `i - 1`.
        if level == BindingPower::Additive {
            parser.split_negative_literal();
        }

        let kind = parser.current_token_kind();
        let Some(operator) = BinaryOp::from_token(kind) else {
            break;
        };
        if parser.get_bp_lookup().get(&kind) != Some(&level) {
            break;
        }

        parser.advance();
        let right = parse_binary(parser, next)?;

        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span: parser.span_from(start),
        });

        if !level.is_chaining() {
            break;
        }
    }

    Ok(left)
}

pub fn parse_prefix_unary(parser: &mut Parser) -> Result<Expr, Error> {
    let Some(operator) = PrefixOp::from_token(parser.current_token_kind()) else {
        return parse_postfix_unary(parser);
    };

    let start = parser.advance().start();
    let operand = parse_postfix_unary(parser)?;

    Ok(Expr::PrefixUnary(PrefixExpr {
        operator,
        operand: Box::new(operand),
        span: parser.span_from(start),
    }))
}

pub fn parse_postfix_unary(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();
    let operand = parse_atomic(parser)?;

    let Some(operator) = PostfixOp::from_token(parser.current_token_kind()) else {
        return Ok(operand);
    };
    parser.advance();

    Ok(Expr::PostfixUnary(PostfixExpr {
        operand: Box::new(operand),
        operator,
        span: parser.span_from(start),
    }))
}

/// A value, or a full assignment in parentheses.
pub fn parse_atomic(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.current_token_kind() != TokenKind::OpenParen {
        return parse_value(parser).map(Expr::Value);
    }

    let start = parser.advance().start();
    let inner = parse_assignment(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Atomic(ParenExpr {
        inner: Box::new(inner),
        span: parser.span_from(start),
    }))
}

pub fn parse_value(parser: &mut Parser) -> Result<Value, Error> {
    let kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("an expression")),
    }
}

// VALUE HANDLERS

pub fn parse_string_value(parser: &mut Parser) -> Result<Value, Error> {
    Ok(Value::String(parse_string_literal(parser)?))
}

pub fn parse_integer_value(parser: &mut Parser) -> Result<Value, Error> {
    Ok(Value::Integer(parse_integer_literal(parser)?))
}

pub fn parse_double_value(parser: &mut Parser) -> Result<Value, Error> {
    let token = parser.expect(TokenKind::Double)?;
    Ok(Value::Double(DoubleLiteral {
        lexeme: token.lexeme,
        span: token.span,
    }))
}

pub fn parse_bool_value(parser: &mut Parser) -> Result<Value, Error> {
    let token = parser.advance();
    Ok(Value::Bool(BoolLiteral {
        value: token.kind == TokenKind::True,
        span: token.span,
    }))
}

pub fn parse_identifier_value(parser: &mut Parser) -> Result<Value, Error> {
    match predict_value(parser) {
        ValueAlt::FunctionCall => Ok(Value::FunctionCall(parse_function_call(parser)?)),
        ValueAlt::Identifier => Ok(Value::Identifier(parse_ident(parser)?)),
    }
}

// TERMINALS

pub fn parse_ident(parser: &mut Parser) -> Result<Ident, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Ident {
        name: token.lexeme,
        span: token.span,
    })
}

/// `identifier ('.' identifier)*`
pub fn parse_ident_chain(parser: &mut Parser) -> Result<Vec<Ident>, Error> {
    let mut chain = vec![parse_ident(parser)?];

    while parser.current_token_kind() == TokenKind::Dot
        && parser.peek_kind(1) == TokenKind::Identifier
    {
        parser.advance();
        chain.push(parse_ident(parser)?);
    }

    Ok(chain)
}

pub fn parse_string_literal(parser: &mut Parser) -> Result<StringLiteral, Error> {
    let token = parser.expect(TokenKind::String)?;
    Ok(StringLiteral {
        value: unescape(&token.lexeme),
        lexeme: token.lexeme,
        span: token.span,
    })
}

pub fn parse_integer_literal(parser: &mut Parser) -> Result<IntegerLiteral, Error> {
    let token = parser.expect(TokenKind::Integer)?;

    match token.lexeme.parse::<i64>() {
        Ok(value) => Ok(IntegerLiteral {
            lexeme: token.lexeme,
            value,
            span: token.span,
        }),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.lexeme,
            },
            token.span,
        )),
    }
}
