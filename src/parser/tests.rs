//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Declarations and assignments
//! - Main, function, procedure and struct definitions
//! - Control flow statements
//! - The expression ladder
//! - Error recovery

use crate::{
    ast::{
        ast::{Entry, Node, NodeType, TopLevelItem},
        expressions::{AssignOp, AssignTarget, BinaryOp, Expr, PostfixOp, PrefixOp, Value},
        statements::{ElseBranch, ParamDef, StmtKind, StmtListItem},
        types::DataType,
    },
    errors::errors::{DiagnosticKind, Error, ErrorImpl, Severity},
    Span,
};

use super::{
    parser::{parse, Parser},
    predict::{predict_entry, predict_stmt, EntryAlt, StmtAlt},
};

fn parse_ok(source: &str) -> Entry {
    let result = parse(source, "test.lang");
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    result.entry
}

fn stmt_kind(item: &TopLevelItem) -> &StmtKind {
    match item {
        TopLevelItem::Stmt(stmt) => &stmt.kind,
        other => panic!("expected a statement, got {:?}", other),
    }
}

/// Right-hand side of an assignment statement.
fn assigned_value(item: &TopLevelItem) -> &Expr {
    match stmt_kind(item) {
        StmtKind::Assignment(Expr::Assignment(assign)) => assign.value.as_ref(),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn binary(expr: &Expr) -> (&Expr, BinaryOp, &Expr) {
    match expr {
        Expr::Binary(binary) => (binary.left.as_ref(), binary.operator, binary.right.as_ref()),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

fn main_body(entry: &Entry) -> &[StmtListItem] {
    match &entry.items[0] {
        TopLevelItem::MainFunctionDef(main) => &main.body.items,
        other => panic!("expected main, got {:?}", other),
    }
}

#[test]
fn test_parse_declaration() {
    let entry = parse_ok("int x;");

    match stmt_kind(&entry.items[0]) {
        StmtKind::Decl(decl) => {
            assert!(!decl.is_const);
            assert_eq!(decl.data_type, DataType::Int);
            assert_eq!(decl.identifier.name, "x");
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_const_declaration_with_value() {
    let entry = parse_ok("const double pi = 3.14;");

    match stmt_kind(&entry.items[0]) {
        StmtKind::Assignment(Expr::Assignment(assign)) => {
            match &assign.target {
                AssignTarget::Decl(decl) => {
                    assert!(decl.is_const);
                    assert_eq!(decl.data_type, DataType::Double);
                }
                other => panic!("expected a declaration target, got {:?}", other),
            }
            assert_eq!(assign.operator, AssignOp::Assign);
            match assign.value.as_ref() {
                Expr::Value(Value::Double(double)) => assert_eq!(double.value(), Some(3.14)),
                other => panic!("expected a double, got {:?}", other),
            }
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_main_function() {
    let entry = parse_ok("f<int> main() {\n    return 0;\n}");

    assert_eq!(entry.items.len(), 1);
    assert_eq!(entry.items[0].get_node_type(), NodeType::MainFunctionDef);
    match &entry.items[0] {
        TopLevelItem::MainFunctionDef(main) => {
            assert!(main.params.is_none());
            assert_eq!(main.body.len(), 1);
            assert_eq!(main.span.start.offset, 0);
            assert_eq!(main.span.end.line, 3);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_main_must_return_int() {
    let result = parse("f<double> main() { return 0; }", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 3);
    assert!(result.diagnostics[0]
        .message
        .contains("main function must return int"));
    assert_eq!(
        result.entry.items[0].get_node_type(),
        NodeType::MainFunctionDef
    );
}

#[test]
fn test_parse_function_with_params() {
    let entry = parse_ok("f<int> add(int a, int b = 2) { return a + b; }");

    match &entry.items[0] {
        TopLevelItem::FunctionDef(function) => {
            assert_eq!(function.name.name, "add");
            assert_eq!(function.return_type, DataType::Int);

            let params = &function.params.as_ref().unwrap().params;
            assert_eq!(params.len(), 2);
            assert!(matches!(&params[0], ParamDef::Decl(decl) if decl.identifier.name == "a"));
            assert!(matches!(&params[1], ParamDef::Default(Expr::Assignment(_))));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_parse_procedure() {
    let entry = parse_ok("p greet(string name) { printf(\"Hello %s\\n\", name); }");

    match &entry.items[0] {
        TopLevelItem::ProcedureDef(procedure) => {
            assert_eq!(procedure.name.name, "greet");
            match &procedure.body.items[0] {
                StmtListItem::Stmt(stmt) => match &stmt.kind {
                    StmtKind::Printf(printf) => {
                        assert_eq!(printf.format.value, "Hello %s\n");
                        assert_eq!(printf.args.len(), 1);
                    }
                    other => panic!("expected printf, got {:?}", other),
                },
                other => panic!("expected a statement, got {:?}", other),
            }
        }
        other => panic!("expected a procedure, got {:?}", other),
    }
}

#[test]
fn test_parse_struct_definition() {
    let entry = parse_ok("type Point struct {\n    int x\n    double y\n}");

    match &entry.items[0] {
        TopLevelItem::StructDef(def) => {
            assert_eq!(def.name.name, "Point");
            assert_eq!(def.fields.fields.len(), 2);
            assert_eq!(def.fields.fields[1].data_type, DataType::Double);
        }
        other => panic!("expected a struct, got {:?}", other),
    }
}

#[test]
fn test_parse_for_loop() {
    let entry = parse_ok("f<int> main() { for int i = 0; i < 10; i++ { continue; } return 0; }");

    match &main_body(&entry)[0] {
        StmtListItem::ForLoop(for_loop) => {
            assert_eq!(for_loop.init.get_node_type(), NodeType::Assignment);
            assert_eq!(for_loop.condition.get_node_type(), NodeType::Relational);
            assert_eq!(for_loop.step.get_node_type(), NodeType::PostfixUnary);
            assert_eq!(for_loop.body.len(), 1);
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_parse_while_with_break_levels() {
    let entry = parse_ok("f<int> main() { while true { break 2; } return 0; }");

    match &main_body(&entry)[0] {
        StmtListItem::WhileLoop(while_loop) => match &while_loop.body.items[0] {
            StmtListItem::Stmt(stmt) => match &stmt.kind {
                StmtKind::Break(stmt) => assert_eq!(stmt.levels(), 2),
                other => panic!("expected break, got {:?}", other),
            },
            other => panic!("expected a statement, got {:?}", other),
        },
        other => panic!("expected a while loop, got {:?}", other),
    }
}

#[test]
fn test_break_defaults_to_one_level() {
    let entry = parse_ok("p run() { while true { break; } }");

    let TopLevelItem::ProcedureDef(procedure) = &entry.items[0] else {
        panic!("expected a procedure");
    };
    let StmtListItem::WhileLoop(while_loop) = &procedure.body.items[0] else {
        panic!("expected a while loop");
    };
    let StmtListItem::Stmt(stmt) = &while_loop.body.items[0] else {
        panic!("expected a statement");
    };
    let StmtKind::Break(stmt) = &stmt.kind else {
        panic!("expected break");
    };
    assert!(stmt.levels.is_none());
    assert_eq!(stmt.levels(), 1);
}

#[test]
fn test_else_if_chain() {
    let entry = parse_ok("f<int> main() { if a { } else if b { } else { x = 1; } return 0; }");

    let StmtListItem::IfStmt(outer) = &main_body(&entry)[0] else {
        panic!("expected an if statement");
    };
    let else_stmt = outer.else_stmt.as_ref().unwrap();
    let ElseBranch::If(nested) = &else_stmt.branch else {
        panic!("expected else if");
    };
    let nested_else = nested.else_stmt.as_ref().unwrap();
    match &nested_else.branch {
        ElseBranch::Block(block) => assert_eq!(block.len(), 1),
        other => panic!("expected a block, got {:?}", other),
    }
}

#[test]
fn test_else_binds_to_nearest_if() {
    let entry = parse_ok("f<int> main() { if a { if b { } else { } } return 0; }");

    let StmtListItem::IfStmt(outer) = &main_body(&entry)[0] else {
        panic!("expected an if statement");
    };
    assert!(outer.else_stmt.is_none());

    let StmtListItem::IfStmt(inner) = &outer.body.items[0] else {
        panic!("expected a nested if statement");
    };
    assert!(inner.else_stmt.is_some());
}

#[test]
fn test_qualified_call_statement() {
    let entry = parse_ok("io.print(1, 2);");

    match stmt_kind(&entry.items[0]) {
        StmtKind::FunctionCall(call) => {
            assert_eq!(call.path(), "io.print");
            assert_eq!(call.qualifiers.len(), 1);
            assert_eq!(call.args.as_ref().unwrap().args.len(), 2);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_inside_expression_statement() {
    let entry = parse_ok("foo() + 1;");

    match stmt_kind(&entry.items[0]) {
        StmtKind::Assignment(expr) => {
            let (left, operator, _) = binary(expr);
            assert_eq!(operator, BinaryOp::Add);
            assert!(matches!(left, Expr::Value(Value::FunctionCall(call)) if call.args.is_none()));
        }
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_compound_assignment_to_path() {
    let entry = parse_ok("a.b.c += 2;");

    match stmt_kind(&entry.items[0]) {
        StmtKind::Assignment(Expr::Assignment(assign)) => {
            assert_eq!(assign.operator, AssignOp::AddAssign);
            match &assign.target {
                AssignTarget::Path(path) => assert_eq!(path.len(), 3),
                other => panic!("expected a path, got {:?}", other),
            }
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_ternary() {
    let entry = parse_ok("int r = a ? b : c;");

    assert_eq!(
        assigned_value(&entry.items[0]).get_node_type(),
        NodeType::Ternary
    );
}

#[test]
fn test_unary_operators() {
    let entry = parse_ok("x = !done;\ny = count--;");

    match assigned_value(&entry.items[0]) {
        Expr::PrefixUnary(prefix) => assert_eq!(prefix.operator, PrefixOp::Not),
        other => panic!("expected a prefix expression, got {:?}", other),
    }
    match assigned_value(&entry.items[1]) {
        Expr::PostfixUnary(postfix) => assert_eq!(postfix.operator, PostfixOp::Decrement),
        other => panic!("expected a postfix expression, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_expression() {
    let entry = parse_ok("x = (a + b) * c;");

    let (left, operator, _) = binary(assigned_value(&entry.items[0]));
    assert_eq!(operator, BinaryOp::Mul);
    assert_eq!(left.get_node_type(), NodeType::AtomicExpr);
}

#[test]
fn test_precedence_ladder() {
    let entry = parse_ok("x = a || b && c | d & e == f < g + h * i;");

    let mut expr = assigned_value(&entry.items[0]);
    for expected in [
        NodeType::LogicalOr,
        NodeType::LogicalAnd,
        NodeType::BitwiseOr,
        NodeType::BitwiseAnd,
        NodeType::Equality,
        NodeType::Relational,
        NodeType::Additive,
        NodeType::Multiplicative,
    ] {
        assert_eq!(expr.get_node_type(), expected);
        expr = binary(expr).2;
    }
    assert!(matches!(expr, Expr::Value(Value::Identifier(ident)) if ident.name == "i"));
}

#[test]
fn test_negative_literal_after_operand() {
    let entry = parse_ok("x = i -1;\ny = -1;");

    let (_, operator, right) = binary(assigned_value(&entry.items[0]));
    assert_eq!(operator, BinaryOp::Sub);
    assert!(matches!(right, Expr::Value(Value::Integer(literal)) if literal.value == 1));

    match assigned_value(&entry.items[1]) {
        Expr::Value(Value::Integer(literal)) => assert_eq!(literal.value, -1),
        other => panic!("expected a literal, got {:?}", other),
    }
}

#[test]
fn test_import_statement() {
    let entry = parse_ok("import \"std/io\" as io;");

    match stmt_kind(&entry.items[0]) {
        StmtKind::Import(import) => {
            assert_eq!(import.path.value, "std/io");
            assert_eq!(import.alias.name, "io");
        }
        other => panic!("expected an import, got {:?}", other),
    }
}

#[test]
fn test_empty_input() {
    let entry = parse_ok("");

    assert!(entry.items.is_empty());
    assert!(entry.span.is_empty());
}

#[test]
fn test_missing_semicolon_recovers() {
    let result = parse("int x\nint y;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!((diagnostic.line, diagnostic.column), (2, 1));
    assert_eq!(diagnostic.message, "expected ';', found 'int'");
    assert_eq!(result.entry.items.len(), 1);
}

#[test]
fn test_error_inside_block_recovers() {
    let result = parse("f<int> main() { int x = ; x = 1; return x; }", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 25);
    assert_eq!(main_body(&result.entry).len(), 2);
}

#[test]
fn test_bad_if_condition_skips_its_block() {
    let result = parse("f<int> main() { if + { a = 1; } b = 2; }", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 20);
    assert_eq!(result.entry.items.len(), 1);

    let body = main_body(&result.entry);
    assert_eq!(body.len(), 1);
    assert!(matches!(&body[0], StmtListItem::Stmt(stmt) if stmt.to_string() == "b = 2;"));
}

#[test]
fn test_bad_if_condition_skips_else_chain() {
    let source = "f<int> main() { if + { a = 1; } else if b { a = 2; } else { a = 3; } return a; }";
    let result = parse(source, "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    let body = main_body(&result.entry);
    assert_eq!(body.len(), 1);
    assert!(matches!(&body[0], StmtListItem::Stmt(stmt) if matches!(stmt.kind, StmtKind::Return(_))));
}

#[test]
fn test_bad_while_condition_keeps_following_statements() {
    let result = parse(
        "f<int> main() { while x + { printf(\"a\"); } return 0; }",
        "test.lang",
    );

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 27);
    assert_eq!(result.entry.items.len(), 1);
    assert_eq!(main_body(&result.entry).len(), 1);
}

#[test]
fn test_bad_function_header_skips_its_body() {
    let result = parse(
        "f<int> foo( { int x; x = 1; }\nf<int> main() { return 0; }",
        "test.lang",
    );

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].line, 1);
    assert_eq!(result.entry.items.len(), 1);
    assert_eq!(result.entry.items[0].get_node_type(), NodeType::MainFunctionDef);
}

#[test]
fn test_unclosed_block() {
    let result = parse("p run() { int x;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("unexpected end of input"));
    assert_eq!(result.entry.items.len(), 1);
    match &result.entry.items[0] {
        TopLevelItem::ProcedureDef(procedure) => assert_eq!(procedure.body.len(), 1),
        other => panic!("expected a procedure, got {:?}", other),
    }
}

#[test]
fn test_chained_equality_is_rejected() {
    let result = parse("bool r = a == b == c;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 17);
    assert_eq!(result.diagnostics[0].message, "expected ';', found '=='");
}

#[test]
fn test_if_is_not_a_top_level_item() {
    let result = parse("if x { }\nint y;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].column, 1);
    assert!(result.diagnostics[0].message.starts_with("no viable alternative at 'if'"));
    assert_eq!(result.entry.items.len(), 1);
}

#[test]
fn test_stray_close_curly_at_top_level() {
    let result = parse("}\nint x;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.entry.items.len(), 1);
}

#[test]
fn test_lexical_errors_are_reported_once() {
    let result = parse("int @x;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Lexer);
    assert_eq!(result.entry.items.len(), 1);
}

#[test]
fn test_loose_double_is_only_a_warning() {
    let result = parse("double d = 1,5;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert!(!result.has_errors());
    assert_eq!(result.warnings().count(), 1);
}

#[test]
fn test_integer_out_of_range() {
    let result = parse("int big = 99999999999999999999;", "test.lang");

    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.starts_with("error parsing number"));
}

#[test]
fn test_duplicate_reports_are_dropped() {
    let mut parser = Parser::new("x");
    let span = Span::default();

    parser.report(Error::new(ErrorImpl::UnterminatedString, span));
    parser.report(Error::new(ErrorImpl::UnterminatedComment, span));

    assert_eq!(parser.finish().len(), 1);
}

#[test]
fn test_predict_entry() {
    assert_eq!(
        predict_entry(&mut Parser::new("f<int> main() {}")),
        Some(EntryAlt::MainFunctionDef)
    );
    assert_eq!(
        predict_entry(&mut Parser::new("f<int> mainly() {}")),
        Some(EntryAlt::FunctionDef)
    );
    assert_eq!(
        predict_entry(&mut Parser::new("type P struct {}")),
        Some(EntryAlt::StructDef)
    );
    assert_eq!(predict_entry(&mut Parser::new("while x {}")), None);
}

#[test]
fn test_predict_stmt() {
    assert_eq!(predict_stmt(&mut Parser::new("int x;")), StmtAlt::Decl);
    assert_eq!(predict_stmt(&mut Parser::new("int x = 1;")), StmtAlt::Assignment);
    assert_eq!(predict_stmt(&mut Parser::new("a.b.c();")), StmtAlt::FunctionCall);
    assert_eq!(predict_stmt(&mut Parser::new("a.b = 1;")), StmtAlt::Assignment);
}
