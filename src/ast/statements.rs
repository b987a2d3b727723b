use std::slice::Iter;

use crate::{Span, IMPL_NODE};

use super::{
    ast::{Ident, Node, NodeType},
    expressions::{Expr, IntegerLiteral, StringLiteral},
    types::DataType,
};

// DEFINITIONS

/// `f<int> main(params?) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MainFunctionDef {
    pub params: Option<ParamListDef>,
    pub body: StmtList,
    pub span: Span,
}

IMPL_NODE!(MainFunctionDef, MainFunctionDef);

/// `f<type> name(params?) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub return_type: DataType,
    pub name: Ident,
    pub params: Option<ParamListDef>,
    pub body: StmtList,
    pub span: Span,
}

IMPL_NODE!(FunctionDef, FunctionDef);

/// `p name(params?) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    pub name: Ident,
    pub params: Option<ParamListDef>,
    pub body: StmtList,
    pub span: Span,
}

IMPL_NODE!(ProcedureDef, ProcedureDef);

/// `type name struct { fields }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: Ident,
    pub fields: FieldList,
    pub span: Span,
}

IMPL_NODE!(StructDef, StructDef);

#[derive(Debug, Clone, PartialEq)]
pub struct FieldList {
    pub fields: Vec<DeclStmt>,
    pub span: Span,
}

IMPL_NODE!(FieldList, FieldList);

// CONTROL FLOW

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub init: Expr,
    pub condition: Expr,
    pub step: Expr,
    pub body: StmtList,
    pub span: Span,
}

IMPL_NODE!(ForLoop, ForLoop);

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: StmtList,
    pub span: Span,
}

IMPL_NODE!(WhileLoop, WhileLoop);

/// An `if` with its optional `else`. An `else` always belongs to the
/// nearest preceding `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: StmtList,
    pub else_stmt: Option<Box<ElseStmt>>,
    pub span: Span,
}

IMPL_NODE!(IfStmt, IfStmt);

#[derive(Debug, Clone, PartialEq)]
pub struct ElseStmt {
    pub branch: ElseBranch,
    pub span: Span,
}

IMPL_NODE!(ElseStmt, ElseStmt);

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    If(IfStmt),
    Block(StmtList),
}

// LISTS

/// A braced block. The span covers both braces.
#[derive(Debug, Clone, PartialEq)]
pub struct StmtList {
    pub items: Vec<StmtListItem>,
    pub span: Span,
}

impl StmtList {
    pub fn iter(&self) -> Iter<'_, StmtListItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

IMPL_NODE!(StmtList, StmtList);

#[derive(Debug, Clone, PartialEq)]
pub enum StmtListItem {
    Stmt(Stmt),
    ForLoop(ForLoop),
    WhileLoop(WhileLoop),
    IfStmt(IfStmt),
}

impl Node for StmtListItem {
    fn get_node_type(&self) -> NodeType {
        match self {
            StmtListItem::Stmt(node) => node.get_node_type(),
            StmtListItem::ForLoop(node) => node.get_node_type(),
            StmtListItem::WhileLoop(node) => node.get_node_type(),
            StmtListItem::IfStmt(node) => node.get_node_type(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            StmtListItem::Stmt(node) => node.get_span(),
            StmtListItem::ForLoop(node) => node.get_span(),
            StmtListItem::WhileLoop(node) => node.get_span(),
            StmtListItem::IfStmt(node) => node.get_span(),
        }
    }
}

/// Parameters of a definition, without the parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamListDef {
    pub params: Vec<ParamDef>,
    pub span: Span,
}

IMPL_NODE!(ParamListDef, ParamListDef);

#[derive(Debug, Clone, PartialEq)]
pub enum ParamDef {
    /// `int a`
    Decl(DeclStmt),
    /// `int a = 1`, held as an assignment expression.
    Default(Expr),
}

/// Arguments of a call, without the parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamListCall {
    pub args: Vec<Expr>,
    pub span: Span,
}

IMPL_NODE!(ParamListCall, ParamListCall);

// STATEMENTS

/// A simple statement. The span includes the terminating `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

IMPL_NODE!(Stmt, Stmt);

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Decl(DeclStmt),
    Assignment(Expr),
    FunctionCall(FunctionCall),
    Import(ImportStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Printf(PrintfStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub is_const: bool,
    pub data_type: DataType,
    pub identifier: Ident,
    pub span: Span,
}

IMPL_NODE!(DeclStmt, DeclStmt);

/// `a.b.name(args?)`; `qualifiers` holds the identifiers before the last dot.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub qualifiers: Vec<Ident>,
    pub name: Ident,
    pub args: Option<ParamListCall>,
    pub span: Span,
}

impl FunctionCall {
    /// The dotted callee, e.g. `io.print`.
    pub fn path(&self) -> String {
        self.qualifiers
            .iter()
            .chain(std::iter::once(&self.name))
            .map(|ident| ident.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

IMPL_NODE!(FunctionCall, FunctionCall);

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub path: StringLiteral,
    pub alias: Ident,
    pub span: Span,
}

IMPL_NODE!(ImportStmt, ImportStmt);

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

IMPL_NODE!(ReturnStmt, ReturnStmt);

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub levels: Option<IntegerLiteral>,
    pub span: Span,
}

impl BreakStmt {
    /// How many loops to leave, 1 unless given.
    pub fn levels(&self) -> i64 {
        self.levels.as_ref().map_or(1, |levels| levels.value)
    }
}

IMPL_NODE!(BreakStmt, BreakStmt);

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub levels: Option<IntegerLiteral>,
    pub span: Span,
}

impl ContinueStmt {
    pub fn levels(&self) -> i64 {
        self.levels.as_ref().map_or(1, |levels| levels.value)
    }
}

IMPL_NODE!(ContinueStmt, ContinueStmt);

#[derive(Debug, Clone, PartialEq)]
pub struct PrintfStmt {
    pub format: StringLiteral,
    pub args: Vec<Expr>,
    pub span: Span,
}

IMPL_NODE!(PrintfStmt, PrintfStmt);
