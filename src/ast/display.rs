//! Renders syntax trees back to source text.
//!
//! Expressions print on one line exactly as their tokens were written
//! (parentheses are kept as `Atomic` nodes, so no extra grouping is added).
//! Blocks print one item per line, indented by four spaces per level.
//! Lexing the output yields the token sequence of the parsed program.

use std::fmt::{Display, Formatter, Result};

use super::{
    ast::{Entry, TopLevelItem},
    expressions::{AssignTarget, Expr, Value},
    statements::{
        DeclStmt, ElseBranch, FieldList, ForLoop, FunctionCall, FunctionDef, IfStmt,
        MainFunctionDef, ParamDef, ParamListDef, ProcedureDef, Stmt, StmtKind, StmtList,
        StmtListItem, StructDef, WhileLoop,
    },
};

const INDENT: &str = "    ";

struct SourcePrinter {
    out: String,
    indent: usize,
}

impl SourcePrinter {
    fn new() -> Self {
        SourcePrinter {
            out: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Writes `header {` and the block items, leaving the brace open.
    fn open(&mut self, header: &str, body: &StmtList) {
        self.line(&format!("{} {{", header));
        self.indent += 1;
        for item in body.iter() {
            self.stmt_list_item(item);
        }
        self.indent -= 1;
    }

    fn block(&mut self, header: &str, body: &StmtList) {
        self.open(header, body);
        self.line("}");
    }

    fn entry(&mut self, entry: &Entry) {
        for item in entry.iter() {
            self.top_level_item(item);
        }
    }

    fn top_level_item(&mut self, item: &TopLevelItem) {
        match item {
            TopLevelItem::Stmt(stmt) => self.line(&stmt.to_string()),
            TopLevelItem::MainFunctionDef(def) => self.main_function_def(def),
            TopLevelItem::FunctionDef(def) => self.function_def(def),
            TopLevelItem::ProcedureDef(def) => self.procedure_def(def),
            TopLevelItem::StructDef(def) => self.struct_def(def),
        }
    }

    fn main_function_def(&mut self, def: &MainFunctionDef) {
        let header = format!("f<int> main({})", params(&def.params));
        self.block(&header, &def.body);
    }

    fn function_def(&mut self, def: &FunctionDef) {
        let header = format!(
            "f<{}> {}({})",
            def.return_type,
            def.name.name,
            params(&def.params)
        );
        self.block(&header, &def.body);
    }

    fn procedure_def(&mut self, def: &ProcedureDef) {
        let header = format!("p {}({})", def.name.name, params(&def.params));
        self.block(&header, &def.body);
    }

    fn struct_def(&mut self, def: &StructDef) {
        self.line(&format!("type {} struct {{", def.name.name));
        self.indent += 1;
        self.field_list(&def.fields);
        self.indent -= 1;
        self.line("}");
    }

    fn field_list(&mut self, fields: &FieldList) {
        for field in &fields.fields {
            self.line(&field.to_string());
        }
    }

    fn stmt_list_item(&mut self, item: &StmtListItem) {
        match item {
            StmtListItem::Stmt(stmt) => self.line(&stmt.to_string()),
            StmtListItem::ForLoop(for_loop) => self.for_loop(for_loop),
            StmtListItem::WhileLoop(while_loop) => self.while_loop(while_loop),
            StmtListItem::IfStmt(if_stmt) => self.if_stmt(if_stmt, "if"),
        }
    }

    fn for_loop(&mut self, for_loop: &ForLoop) {
        let header = format!(
            "for {}; {}; {}",
            for_loop.init, for_loop.condition, for_loop.step
        );
        self.block(&header, &for_loop.body);
    }

    fn while_loop(&mut self, while_loop: &WhileLoop) {
        let header = format!("while {}", while_loop.condition);
        self.block(&header, &while_loop.body);
    }

    /// `else` and `else if` continue the closing-brace line of the branch before.
    fn if_stmt(&mut self, if_stmt: &IfStmt, keyword: &str) {
        let header = format!("{} {}", keyword, if_stmt.condition);

        match if_stmt.else_stmt.as_deref() {
            None => self.block(&header, &if_stmt.body),
            Some(else_stmt) => {
                self.open(&header, &if_stmt.body);
                match &else_stmt.branch {
                    ElseBranch::If(nested) => self.if_stmt(nested, "} else if"),
                    ElseBranch::Block(body) => self.block("} else", body),
                }
            }
        }
    }
}

fn params(params: &Option<ParamListDef>) -> String {
    params.as_ref().map_or(String::new(), |list| {
        list.params
            .iter()
            .map(|param| match param {
                ParamDef::Decl(decl) => decl.to_string(),
                ParamDef::Default(expr) => expr.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    })
}

fn join(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|expr| expr.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Display` for nodes that print as whole lines through `SourcePrinter`.
macro_rules! DISPLAY_VIA_PRINTER {
    ($node:ty, $method:ident) => {
        impl Display for $node {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result {
                let mut printer = SourcePrinter::new();
                printer.$method(self);
                write!(f, "{}", printer.out)
            }
        }
    };
}

DISPLAY_VIA_PRINTER!(Entry, entry);
DISPLAY_VIA_PRINTER!(TopLevelItem, top_level_item);
DISPLAY_VIA_PRINTER!(MainFunctionDef, main_function_def);
DISPLAY_VIA_PRINTER!(FunctionDef, function_def);
DISPLAY_VIA_PRINTER!(ProcedureDef, procedure_def);
DISPLAY_VIA_PRINTER!(StructDef, struct_def);
DISPLAY_VIA_PRINTER!(StmtListItem, stmt_list_item);
DISPLAY_VIA_PRINTER!(ForLoop, for_loop);
DISPLAY_VIA_PRINTER!(WhileLoop, while_loop);

impl Display for IfStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut printer = SourcePrinter::new();
        printer.if_stmt(self, "if");
        write!(f, "{}", printer.out)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.kind {
            StmtKind::Decl(decl) => write!(f, "{};", decl),
            StmtKind::Assignment(expr) => write!(f, "{};", expr),
            StmtKind::FunctionCall(call) => write!(f, "{};", call),
            StmtKind::Import(import) => {
                write!(f, "import {} as {};", import.path.lexeme, import.alias.name)
            }
            StmtKind::Return(ret) => write!(f, "return {};", ret.value),
            StmtKind::Break(stmt) => match &stmt.levels {
                Some(levels) => write!(f, "break {};", levels.lexeme),
                None => write!(f, "break;"),
            },
            StmtKind::Continue(stmt) => match &stmt.levels {
                Some(levels) => write!(f, "continue {};", levels.lexeme),
                None => write!(f, "continue;"),
            },
            StmtKind::Printf(printf) => {
                write!(f, "printf({}", printf.format.lexeme)?;
                for arg in &printf.args {
                    write!(f, ", {}", arg)?;
                }
                write!(f, ");")
            }
        }
    }
}

impl Display for DeclStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{} {}", self.data_type, self.identifier.name)
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let args = self
            .args
            .as_ref()
            .map_or(String::new(), |list| join(&list.args));
        write!(f, "{}({})", self.path(), args)
    }
}

impl Display for AssignTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            AssignTarget::Decl(decl) => write!(f, "{}", decl),
            AssignTarget::Path(path) => {
                let names: Vec<&str> = path.iter().map(|ident| ident.name.as_str()).collect();
                write!(f, "{}", names.join("."))
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Assignment(assign) => write!(
                f,
                "{} {} {}",
                assign.target,
                assign.operator.spelling(),
                assign.value
            ),
            Expr::Ternary(ternary) => write!(
                f,
                "{} ? {} : {}",
                ternary.condition, ternary.then_expr, ternary.else_expr
            ),
            Expr::Binary(binary) => write!(
                f,
                "{} {} {}",
                binary.left,
                binary.operator.spelling(),
                binary.right
            ),
            Expr::PrefixUnary(prefix) => write!(f, "{}{}", prefix.operator.spelling(), prefix.operand),
            Expr::PostfixUnary(postfix) => {
                write!(f, "{}{}", postfix.operand, postfix.operator.spelling())
            }
            Expr::Atomic(paren) => write!(f, "({})", paren.inner),
            Expr::Value(value) => write!(f, "{}", value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::String(literal) => write!(f, "{}", literal.lexeme),
            Value::Bool(literal) => write!(f, "{}", literal.value),
            Value::Integer(literal) => write!(f, "{}", literal.lexeme),
            Value::Double(literal) => write!(f, "{}", literal.lexeme),
            Value::Identifier(ident) => write!(f, "{}", ident.name),
            Value::FunctionCall(call) => write!(f, "{}", call),
        }
    }
}
