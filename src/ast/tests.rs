use crate::{parse, Span};

use super::{
    ast::{Node, NodeType, TopLevelItem},
    expressions::{DoubleLiteral, Expr},
    statements::StmtKind,
};

const PROGRAM: &str = r#"import "std/io" as io;
type Point struct {
    int x
    int y
}
f<int> add(int a, int b = 2) {
    return a + b;
}
p show(string label) {
    printf("%s\n", label);
}
f<int> main() {
    int total = add(1, 2);
    for int i = 0; i < 10; i++ {
        if i == 5 {
            break;
        } else if i > 7 {
            continue 1;
        } else {
            total += i;
        }
    }
    while total > 100 {
        total = (total - 1) / 2;
    }
    io.print(total);
    return total > 0 ? 0 : 1;
}
"#;

fn double(lexeme: &str) -> DoubleLiteral {
    DoubleLiteral {
        lexeme: lexeme.to_string(),
        span: Span::default(),
    }
}

#[test]
fn test_print_program() {
    let result = parse(PROGRAM, "program.lang");

    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.entry.items.len(), 5);
    assert_eq!(result.entry.to_string(), PROGRAM);
}

#[test]
fn test_print_single_items() {
    let result = parse("const int   limit=3 ;\np  run( ) {x++;}", "items.lang");

    assert_eq!(result.entry.items[0].to_string(), "const int limit = 3;\n");
    assert_eq!(result.entry.items[1].to_string(), "p run() {\n    x++;\n}\n");
}

#[test]
fn test_double_value() {
    assert_eq!(double("1.5").value(), Some(1.5));
    assert_eq!(double("-0.25").value(), Some(-0.25));
    assert_eq!(double("1,5").value(), Some(1.5));
    assert_eq!(double("1x2x3").value(), None);
}

#[test]
fn test_function_call_path() {
    let result = parse("a.b.run();\nrun();", "calls.lang");

    let paths: Vec<String> = result
        .entry
        .iter()
        .map(|item| match item {
            TopLevelItem::Stmt(stmt) => match &stmt.kind {
                StmtKind::FunctionCall(call) => call.path(),
                other => panic!("expected a call, got {:?}", other),
            },
            other => panic!("expected a statement, got {:?}", other),
        })
        .collect();
    assert_eq!(paths, vec!["a.b.run", "run"]);
}

#[test]
fn test_spans() {
    let result = parse("x = 1 + 2;", "spans.lang");

    let TopLevelItem::Stmt(stmt) = &result.entry.items[0] else {
        panic!("expected a statement");
    };
    assert_eq!(stmt.get_node_type(), NodeType::Stmt);
    assert_eq!((stmt.span.start.column, stmt.span.end.column), (1, 11));

    let StmtKind::Assignment(Expr::Assignment(assign)) = &stmt.kind else {
        panic!("expected an assignment");
    };
    let value = assign.value.as_ref();
    assert_eq!(value.get_node_type(), NodeType::Additive);
    assert_eq!(value.get_span().start.column, 5);
    assert_eq!(value.get_span().len(), 5);
    assert_eq!(assign.get_span().len(), 9);
}

#[test]
fn test_call_value_node_type() {
    let result = parse("x = f(1);", "calls.lang");

    let TopLevelItem::Stmt(stmt) = &result.entry.items[0] else {
        panic!("expected a statement");
    };
    let StmtKind::Assignment(Expr::Assignment(assign)) = &stmt.kind else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.value.get_node_type(), NodeType::FunctionCall);
}

#[test]
fn test_print_nested_block_item() {
    let result = parse("p run() { while x { if y { x--; } } }", "block.lang");

    let TopLevelItem::ProcedureDef(procedure) = &result.entry.items[0] else {
        panic!("expected a procedure");
    };
    assert_eq!(
        procedure.body.items[0].to_string(),
        "while x {\n    if y {\n        x--;\n    }\n}\n"
    );
}
