use minigo::ast::*;
use minigo::{parse_source, CompileError, ErrorKind};
use pretty_assertions::assert_eq;

const LINKED_LIST: &str = r#"package list

import "fmt"
import "strings"

const Capacity = 0x40

type Node struct {
	value int
	next  *Node
}

type Visitor func(int) bool

var head *Node
var names []string = []string{"a", "b"}

func push(value int) {
	n := new(Node)
	n.value = value
	n.next = head
	head = n
}

func sum(limit int) int {
	total := 0
	for n := head; n != nil && total < limit; n = n.next {
		total += n.value
	}
	return total
}

func visit(v Visitor) {
	n := head
loop:
	for {
		if n == nil {
			return
		} else if !v(n.value) {
			continue loop
		}
		n = n.next
	}
}

func main() {
	for i := 0; i < Capacity; i++ {
		push(i * 2)
	}
	if s := sum(100); s > 50 {
		fmt.Println(strings.Repeat("*", s))
	}
	points := []Point{{1, 2}, {x: 3, y: 4}}
	ch := open(16)
	v := <-ch
	delete(index, "key")
	panic(fmt.Sprintf("%d %d", len(points), v))
}
"#;

#[test]
fn test_linked_list_program() {
    let program = parse_source(LINKED_LIST).unwrap();
    assert_eq!(program.package, "list");
    assert_eq!(program.imports, vec!["fmt".to_string(), "strings".to_string()]);
    assert_eq!(program.declarations.len(), 9);

    let names: Vec<&str> = program.functions().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["push", "sum", "visit", "main"]);
}

#[test]
fn test_declaration_kinds_in_order() {
    let program = parse_source(LINKED_LIST).unwrap();
    let kinds: Vec<&str> = program
        .declarations
        .iter()
        .map(|decl| match decl {
            Declaration::Var(_) => "var",
            Declaration::Const(_) => "const",
            Declaration::Type(_) => "type",
            Declaration::ShortVar(_) => "short",
            Declaration::Func(_) => "func",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["const", "type", "type", "var", "var", "func", "func", "func", "func"]
    );
}

#[test]
fn test_for_clause_in_full_program() {
    let program = parse_source(LINKED_LIST).unwrap();
    let sum = program.function("sum").unwrap();
    let Stmt::For(for_stmt) = &sum.body[1] else {
        panic!("expected for statement, got {:?}", sum.body[1]);
    };
    let ForHeader::Clause(clause) = &for_stmt.header else {
        panic!("expected clause header");
    };
    assert!(matches!(clause.init.as_deref(), Some(SimpleStmt::ShortVarDecl(_))));
    let cond = clause.cond.as_ref().unwrap();
    assert_eq!(cond.base.operators().collect::<Vec<_>>(), vec![BinaryOp::LogAnd]);
    assert!(matches!(clause.post.as_deref(), Some(SimpleStmt::Assign(_))));
}

#[test]
fn test_labeled_loop_and_else_if() {
    let program = parse_source(LINKED_LIST).unwrap();
    let visit = program.function("visit").unwrap();
    let Stmt::Labeled(labeled) = &visit.body[1] else {
        panic!("expected labeled statement");
    };
    assert_eq!(labeled.label, "loop");
    let Stmt::For(for_stmt) = labeled.stmt.as_ref() else {
        panic!("expected for loop under label");
    };
    assert_eq!(for_stmt.header, ForHeader::Infinite);
    let Stmt::If(if_stmt) = &for_stmt.body[0] else {
        panic!("expected if statement");
    };
    assert_eq!(if_stmt.body, vec![Stmt::Return(None)]);
    let Some(ElseBranch::If(else_if)) = &if_stmt.else_branch else {
        panic!("expected else if");
    };
    assert_eq!(else_if.body, vec![Stmt::Continue(Some("loop".into()))]);
}

#[test]
fn test_composite_and_builtin_calls() {
    let program = parse_source(LINKED_LIST).unwrap();
    let main = program.function("main").unwrap();
    assert_eq!(main.body.len(), 7);

    let Stmt::Decl(Declaration::ShortVar(points)) = &main.body[2] else {
        panic!("expected short variable declaration");
    };
    let term = points.values[0].as_term().unwrap();
    let Primary::Literal(Literal::Composite(lit)) = &term.operand else {
        panic!("expected composite literal");
    };
    assert_eq!(lit.elements.len(), 2);

    let Stmt::Simple(SimpleStmt::Expr(delete)) = &main.body[5] else {
        panic!("expected expression statement");
    };
    assert!(matches!(
        delete.as_term().map(|t| &t.operand),
        Some(Primary::Builtin(BuiltinCall { builtin: Builtin::Delete, .. }))
    ));
}

#[test]
fn test_receive_expression() {
    let program = parse_source(LINKED_LIST).unwrap();
    let main = program.function("main").unwrap();
    let Stmt::Decl(Declaration::ShortVar(v)) = &main.body[4] else {
        panic!("expected short variable declaration");
    };
    assert_eq!(v.values[0].as_unary().and_then(|u| u.op), Some(UnaryOp::Recv));
}

#[test]
fn test_unicode_identifiers() {
    let program = parse_source("package p\nvar größe int = 1\nfunc 計算() {}").unwrap();
    let Declaration::Var(var) = &program.declarations[0] else {
        panic!("expected var");
    };
    assert_eq!(var.names, vec!["größe".to_string()]);
    assert!(program.function("計算").is_some());
}

fn error_of(source: &str) -> CompileError {
    parse_source(source).expect_err("expected an error")
}

#[test]
fn test_unterminated_string_reported_at_quote() {
    let err = error_of("package p\nvar s string = \"abc");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.span().start, 25);
    assert_eq!(err.position().line, 2);
    assert_eq!(err.position().column, 16);
}

#[test]
fn test_var_without_type_is_syntax_error() {
    let err = error_of("package p\nfunc f() {\n\tvar x\n}");
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.position().line, 4);
    assert_eq!(err.message(), "expected type, found '}'");
}

#[test]
fn test_illegal_character() {
    let err = error_of("package p\nfunc f() { x = 1 # 2 }");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.message(), "unexpected character '#'");
    assert_eq!(err.position().column, 18);
}

#[test]
fn test_errors_are_structured() {
    let err = error_of("package p\nfunc f() {\n\tfor i := 0; i < 3 {\n\t}\n}");
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.message(), "expected ';', found '{'");
    assert_eq!(err.position().line, 3);
    assert_eq!(err.position().column, 20);
}
