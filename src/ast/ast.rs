use std::fmt::Debug;

use crate::Span;

use super::statements::{FunctionDef, MainFunctionDef, ProcedureDef, Stmt, StructDef};

/// Node Types
///
/// One entry per grammar rule that produces a node. Binary expressions
/// report the precedence level their operator belongs to.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Entry,
    MainFunctionDef,
    FunctionDef,
    ProcedureDef,
    StructDef,
    ForLoop,
    WhileLoop,
    IfStmt,
    ElseStmt,
    StmtList,
    FieldList,
    ParamListDef,
    ParamListCall,
    Stmt,
    DeclStmt,
    FunctionCall,
    ImportStmt,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    PrintfStmt,
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
    PrefixUnary,
    PostfixUnary,
    AtomicExpr,
    Value,
    Identifier,
}

/// Node Trait
///
/// Implemented by every syntax node so downstream phases can ask what a
/// node is and where it came from without matching on its structure.
pub trait Node: Debug {
    /// Returns the grammar rule the node was produced by.
    fn get_node_type(&self) -> NodeType;
    /// Returns the source range covered by the node.
    fn get_span(&self) -> &Span;
}

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Node for Ident {
    fn get_node_type(&self) -> NodeType {
        NodeType::Identifier
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// The root of a compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub items: Vec<TopLevelItem>,
    pub span: Span,
}

impl Entry {
    pub fn iter(&self) -> std::slice::Iter<'_, TopLevelItem> {
        self.items.iter()
    }
}

impl Node for Entry {
    fn get_node_type(&self) -> NodeType {
        NodeType::Entry
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelItem {
    Stmt(Stmt),
    MainFunctionDef(MainFunctionDef),
    FunctionDef(FunctionDef),
    ProcedureDef(ProcedureDef),
    StructDef(StructDef),
}

impl Node for TopLevelItem {
    fn get_node_type(&self) -> NodeType {
        match self {
            TopLevelItem::Stmt(node) => node.get_node_type(),
            TopLevelItem::MainFunctionDef(node) => node.get_node_type(),
            TopLevelItem::FunctionDef(node) => node.get_node_type(),
            TopLevelItem::ProcedureDef(node) => node.get_node_type(),
            TopLevelItem::StructDef(node) => node.get_node_type(),
        }
    }
    fn get_span(&self) -> &Span {
        match self {
            TopLevelItem::Stmt(node) => node.get_span(),
            TopLevelItem::MainFunctionDef(node) => node.get_span(),
            TopLevelItem::FunctionDef(node) => node.get_span(),
            TopLevelItem::ProcedureDef(node) => node.get_span(),
            TopLevelItem::StructDef(node) => node.get_span(),
        }
    }
}
