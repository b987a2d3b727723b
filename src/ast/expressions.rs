use crate::{lexer::tokens::TokenKind, Span, IMPL_NODE};

use super::{
    ast::{Ident, Node, NodeType},
    statements::{DeclStmt, FunctionCall},
};

/// Expression Enum
///
/// One variant per expression rule that can survive collapsing. A rule
/// that matched only its next-higher rule is represented by that rule's
/// node, so `1` is a `Value`, never a one-armed `Binary`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment(AssignExpr),
    Ternary(TernaryExpr),
    Binary(BinaryExpr),
    PrefixUnary(PrefixExpr),
    PostfixUnary(PostfixExpr),
    Atomic(ParenExpr),
    Value(Value),
}

impl Node for Expr {
    fn get_node_type(&self) -> NodeType {
        match self {
            Expr::Assignment(node) => node.get_node_type(),
            Expr::Ternary(node) => node.get_node_type(),
            Expr::Binary(node) => node.get_node_type(),
            Expr::PrefixUnary(node) => node.get_node_type(),
            Expr::PostfixUnary(node) => node.get_node_type(),
            Expr::Atomic(node) => node.get_node_type(),
            Expr::Value(node) => node.get_node_type(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Expr::Assignment(node) => node.get_span(),
            Expr::Ternary(node) => node.get_span(),
            Expr::Binary(node) => node.get_span(),
            Expr::PrefixUnary(node) => node.get_span(),
            Expr::PostfixUnary(node) => node.get_span(),
            Expr::Atomic(node) => node.get_span(),
            Expr::Value(node) => node.get_span(),
        }
    }
}

// ASSIGNMENT

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: AssignTarget,
    pub operator: AssignOp,
    pub value: Box<Expr>,
    pub span: Span,
}

IMPL_NODE!(AssignExpr, Assignment);

#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `int x = ...`
    Decl(DeclStmt),
    /// `a.b.c = ...`, at least one identifier.
    Path(Vec<Ident>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    pub fn from_token(kind: TokenKind) -> Option<AssignOp> {
        match kind {
            TokenKind::Assignment => Some(AssignOp::Assign),
            TokenKind::PlusEquals => Some(AssignOp::AddAssign),
            TokenKind::MinusEquals => Some(AssignOp::SubAssign),
            TokenKind::StarEquals => Some(AssignOp::MulAssign),
            TokenKind::SlashEquals => Some(AssignOp::DivAssign),
            _ => None,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}

// TERNARY AND BINARY

#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub span: Span,
}

IMPL_NODE!(TernaryExpr, Ternary);

/// A binary operation. The rule it came from follows from the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Node for BinaryExpr {
    fn get_node_type(&self) -> NodeType {
        self.operator.node_type()
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitAnd,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::BitOr => Some(BinaryOp::BitOr),
            TokenKind::BitAnd => Some(BinaryOp::BitAnd),
            TokenKind::Equals => Some(BinaryOp::Equal),
            TokenKind::NotEquals => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::LessEquals => Some(BinaryOp::LessEqual),
            TokenKind::GreaterEquals => Some(BinaryOp::GreaterEqual),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Dash => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            BinaryOp::Or => NodeType::LogicalOr,
            BinaryOp::And => NodeType::LogicalAnd,
            BinaryOp::BitOr => NodeType::BitwiseOr,
            BinaryOp::BitAnd => NodeType::BitwiseAnd,
            BinaryOp::Equal | BinaryOp::NotEqual => NodeType::Equality,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
                NodeType::Relational
            }
            BinaryOp::Add | BinaryOp::Sub => NodeType::Additive,
            BinaryOp::Mul | BinaryOp::Div => NodeType::Multiplicative,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

// UNARY

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: PrefixOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

IMPL_NODE!(PrefixExpr, PrefixUnary);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Increment,
    Decrement,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<PrefixOp> {
        match kind {
            TokenKind::Not => Some(PrefixOp::Not),
            TokenKind::PlusPlus => Some(PrefixOp::Increment),
            TokenKind::MinusMinus => Some(PrefixOp::Decrement),
            _ => None,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            PrefixOp::Not => "!",
            PrefixOp::Increment => "++",
            PrefixOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub operand: Box<Expr>,
    pub operator: PostfixOp,
    pub span: Span,
}

IMPL_NODE!(PostfixExpr, PostfixUnary);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub fn from_token(kind: TokenKind) -> Option<PostfixOp> {
        match kind {
            TokenKind::PlusPlus => Some(PostfixOp::Increment),
            TokenKind::MinusMinus => Some(PostfixOp::Decrement),
            _ => None,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            PostfixOp::Increment => "++",
            PostfixOp::Decrement => "--",
        }
    }
}

/// `( assignment )`
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

IMPL_NODE!(ParenExpr, AtomicExpr);

// VALUES

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(StringLiteral),
    Bool(BoolLiteral),
    Integer(IntegerLiteral),
    Double(DoubleLiteral),
    Identifier(Ident),
    FunctionCall(FunctionCall),
}

impl Node for Value {
    fn get_node_type(&self) -> NodeType {
        match self {
            Value::FunctionCall(call) => call.get_node_type(),
            _ => NodeType::Value,
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            Value::String(literal) => &literal.span,
            Value::Bool(literal) => &literal.span,
            Value::Integer(literal) => &literal.span,
            Value::Double(literal) => &literal.span,
            Value::Identifier(ident) => &ident.span,
            Value::FunctionCall(call) => &call.span,
        }
    }
}

/// String literal; `lexeme` keeps the quotes and escapes, `value` is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub lexeme: String,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub lexeme: String,
    pub value: i64,
    pub span: Span,
}

/// Double literal as spelled. The separator before a digit run is not
/// necessarily `.`, see [`DoubleLiteral::value`].
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleLiteral {
    pub lexeme: String,
    pub span: Span,
}

impl DoubleLiteral {
    /// Numeric value when the lexeme has at most one separator, which is
    /// then read as the decimal point.
    pub fn value(&self) -> Option<f64> {
        let (sign, digits) = match self.lexeme.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", self.lexeme.as_str()),
        };

        let separators: Vec<(usize, &str)> = digits
            .match_indices(|ch: char| !ch.is_ascii_digit())
            .collect();

        let normalized = match separators.as_slice() {
            [] => format!("{}{}", sign, digits),
            [(index, separator)] => format!(
                "{}{}.{}",
                sign,
                &digits[..*index],
                &digits[index + separator.len()..]
            ),
            _ => return None,
        };

        normalized.parse::<f64>().ok()
    }
}
