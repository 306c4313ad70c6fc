use minigo::ast::Program;
use minigo::{parse_source, CompileError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const CORPUS: &[&str] = &[
    "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hello, world\")\n}\n",
    r#"package shapes

import "math"

const Sides = 0b100

type Point struct { x, y int; label string }
type Shape struct {
	origin *Point
	points []Point
	area   func(Shape) int
	scale  func(int)
}

var zero Point = Point{}
var unit, half int = 1, Sides >> 1
count := 0

func area(s Shape, factor int) int {
	total := 0
	for i := 0; i < len(s.points) - 1; i++ {
		p, q := s.points[i], s.points[i + 1]
		total += p.x * q.y - q.x * p.y
	}
	if total < 0 {
		total = -total
	} else if total == 0 {
		panic("degenerate shape")
	} else {
		total /= 2
	}
	return total * factor
}

func walk(s *Shape) {
	i := 0
outer:
	for ; ; {
		for i < 10 {
			i++
			if i % 3 == 0 {
				continue outer
			}
		}
		goto done
	}
done:
	{
		var ptr *Point = &s.points[0]
		ptr.x, ptr.y = ptr.y, ptr.x
		math.Abs(float(ptr.x))
	}
}

func literals() {
	c := '\''
	nl := '\n'
	raw := `C:\path`
	mixed := "tab\tquote\" back\\slash é"
	grid := [][]int{{1, 2}, {3}, {}}
	sparse := []string{0: "a", 5 + 1: "b"}
	anon := struct { x int }{x: 1}
	bytes := []byte(raw)
	f := func(int) bool(predicate)
	p := new(*Point)
	delete(table, key)
	if v := (Point{1, 2}); v.x > 0 {
		c = <-events
	}
	_ = ([]int)(grid[0])
	_ = !ok || a && b != c
	_ = x &^ mask | y << 2 ^ ^z
}
"#,
];

fn reparse(program: &Program) -> Result<Program, CompileError> {
    parse_source(&program.to_string())
}

#[test]
fn test_corpus_round_trips() {
    for source in CORPUS {
        let first = parse_source(source).unwrap();
        let printed = first.to_string();
        let second = parse_source(&printed)
            .unwrap_or_else(|e| panic!("canonical output failed to parse: {}\n{}", e, printed));
        assert_eq!(first, second);
    }
}

#[test]
fn test_canonical_output_is_stable() {
    for source in CORPUS {
        let once = parse_source(source).unwrap().to_string();
        let twice = parse_source(&once).unwrap().to_string();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_canonical_hello() {
    let program = parse_source(CORPUS[0]).unwrap();
    assert_eq!(
        program.to_string(),
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hello, world\");\n}\n"
    );
}

#[test]
fn test_results_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Program>();
    assert_send_sync::<CompileError>();

    let handles: Vec<_> = CORPUS
        .iter()
        .map(|&source| std::thread::spawn(move || parse_source(source)))
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["a", "b", "count", "ptr", "xs", "_"]).prop_map(String::from),
        any::<u32>().prop_map(|n| n.to_string()),
        "[a-zA-Z0-9 _.,!?]{0,8}".prop_map(|s| format!("\"{}\"", s)),
        prop::sample::select(vec!["true", "false", "'x'", "0x7f", "0b11", "017"]).prop_map(String::from),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    let binary_ops = vec![
        "||", "&&", "==", "!=", "<", ">", "<=", ">=", "+", "-", "|", "^", "*", "/", "%", "&", "<<",
        ">>", "&^",
    ];
    let unary_ops = vec!["+", "-", "!", "^", "*", "&", "<-"];

    leaf().prop_recursive(4, 32, 3, move |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(binary_ops.clone()), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            (prop::sample::select(unary_ops.clone()), inner.clone())
                .prop_map(|(op, e)| format!("{}({})", op, e)),
            inner.clone().prop_map(|e| format!("({}).field", e)),
            (inner.clone(), inner.clone()).prop_map(|(a, i)| format!("xs[{}]({}, {})", i, a, a)),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|elems| format!("Pair{{{}}}", elems.join(", "))),
            inner.clone().prop_map(|e| format!("[]int({})", e)),
            inner.clone().prop_map(|e| format!("panic({})", e)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]
    #[test]
    fn printed_expressions_reparse_identically(expr in expression()) {
        let source = format!("package p\n\nfunc f() {{\n\tx = {}\n\tif ok {{\n\t\ty = {}\n\t}}\n}}\n", expr, expr);
        let first = parse_source(&source).unwrap();
        let second = reparse(&first).unwrap();
        prop_assert_eq!(first, second);
    }
}
