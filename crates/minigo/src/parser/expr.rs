//! Expression grammar
//!
//! Five binary tiers share [`Parser::parse_tier`]; each tier differs only in
//! the operand parser and the operators it accepts.

use super::{furthest, Parser};
use crate::ast::*;
use crate::common::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};
use std::num::IntErrorKind;
use tracing::trace;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> CompileResult<Expr> {
        self.parse_tier(Self::parse_and_expr, logical_or_op)
    }

    /// `Expr {"," Expr}`
    pub(super) fn parse_expression_list(&mut self) -> CompileResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expression()?];
        while self.match_token(&TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    fn parse_and_expr(&mut self) -> CompileResult<AndExpr> {
        self.parse_tier(Self::parse_rel_expr, logical_and_op)
    }

    fn parse_rel_expr(&mut self) -> CompileResult<RelExpr> {
        self.parse_tier(Self::parse_add_expr, relational_op)
    }

    fn parse_add_expr(&mut self) -> CompileResult<AddExpr> {
        self.parse_tier(Self::parse_mul_expr, additive_op)
    }

    fn parse_mul_expr(&mut self) -> CompileResult<MulExpr> {
        self.parse_tier(Self::parse_unary_expr, multiplicative_op)
    }

    /// `operand {op operand}`, left-associative
    fn parse_tier<T>(
        &mut self,
        operand: fn(&mut Self) -> CompileResult<T>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> CompileResult<Chain<T>> {
        let mut chain = Chain::new(operand(self)?);
        while let Some(op) = operator(&self.current().kind) {
            self.advance();
            chain.rest.push((op, operand(self)?));
        }
        Ok(chain)
    }

    fn parse_unary_expr(&mut self) -> CompileResult<UnaryExpr> {
        let op = unary_op(&self.current().kind);
        if op.is_some() {
            self.advance();
        }
        let term = self.parse_term()?;
        Ok(UnaryExpr::new(op, term))
    }

    /// Primary operand followed by selectors, indexes and calls
    fn parse_term(&mut self) -> CompileResult<Term> {
        let mut term = Term::new(self.parse_primary()?);
        loop {
            match self.current().kind {
                TokenKind::Dot => {
                    self.advance();
                    term.postfix.push(Postfix::Selector(self.expect_identifier()?));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.with_composite_literals(true, Self::parse_expression)?;
                    self.expect(TokenKind::RBracket)?;
                    term.postfix.push(Postfix::Index(index));
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.with_composite_literals(true, Self::parse_call_args)?;
                    term.postfix.push(Postfix::Call(args));
                }
                _ => break,
            }
        }
        Ok(term)
    }

    /// Arguments after `(` up to and including `)`; a trailing comma is allowed
    fn parse_call_args(&mut self) -> CompileResult<Vec<Expr>> {
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.parse_expression()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// Primary operands in ordered choice: literal, parenthesized expression,
    /// identifier, conversion, builtin call
    fn parse_primary(&mut self) -> CompileResult<Primary> {
        match self.current().kind {
            TokenKind::IntLiteral(_)
            | TokenKind::CharLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::True
            | TokenKind::False => Ok(Primary::Literal(Literal::Basic(self.parse_basic_lit()?))),

            TokenKind::Struct => {
                let st = self.parse_struct_type()?;
                if self.check(&TokenKind::LBrace) {
                    return self.parse_composite_body(Some(LiteralType::Struct(st)));
                }
                self.parse_conversion(NonPointerType::Struct(st))
            }
            TokenKind::LBracket => {
                let elem = Box::new(self.parse_array_element()?);
                if self.check(&TokenKind::LBrace) {
                    return self.parse_composite_body(Some(LiteralType::Array(elem)));
                }
                self.parse_conversion(NonPointerType::Array(elem))
            }
            TokenKind::Func => {
                let func = self.parse_func_type()?;
                self.parse_conversion(NonPointerType::Function(func))
            }

            TokenKind::LParen => self.parse_paren_or_conversion(),

            TokenKind::Identifier(_) => {
                if self.composite_literals {
                    if let Some(literal) = self.attempt(Self::parse_named_composite) {
                        return Ok(literal);
                    }
                }
                let name = self.expect_identifier()?;
                Ok(Primary::Name(QualifiedIdent::new(name)))
            }

            TokenKind::New => self.parse_builtin_call(Builtin::New),
            TokenKind::Delete => self.parse_builtin_call(Builtin::Delete),
            TokenKind::Panic => self.parse_builtin_call(Builtin::Panic),

            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_basic_lit(&mut self) -> CompileResult<BasicLit> {
        let token = self.advance();
        match token.kind {
            TokenKind::IntLiteral(ref text) => Ok(BasicLit::Int(self.parse_int_literal(text, &token)?)),
            TokenKind::CharLiteral(c) => Ok(BasicLit::Char(c)),
            TokenKind::StringLiteral(s) => Ok(BasicLit::String(s)),
            TokenKind::True => Ok(BasicLit::Bool(true)),
            TokenKind::False => Ok(BasicLit::Bool(false)),
            other => Err(CompileError::parser(
                format!("expected literal, found {}", other),
                token.span,
                token.pos,
            )),
        }
    }

    /// Decode an integer literal: decimal, `0x`, `0o` or leading-`0` octal,
    /// `0b`, with single `_` separators between digits
    pub(super) fn parse_int_literal(&self, text: &str, token: &Token) -> CompileResult<i64> {
        let misplaced_separator = text.contains("__") || text.ends_with('_');
        let digits = text.replace('_', "");
        let (body, radix, kind) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            (hex, 16, "hex")
        } else if let Some(oct) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
            (oct, 8, "octal")
        } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
            (bin, 2, "binary")
        } else if digits.len() > 1 && digits.starts_with('0') {
            (&digits[1..], 8, "octal")
        } else {
            (digits.as_str(), 10, "integer")
        };
        if misplaced_separator {
            return Err(CompileError::parser(
                format!("invalid {} literal '{}'", kind, text),
                token.span,
                token.pos,
            ));
        }

        i64::from_str_radix(body, radix).map_err(|err| {
            let message = match err.kind() {
                IntErrorKind::PosOverflow => format!("integer literal '{}' overflows int64", text),
                _ => format!("invalid {} literal '{}'", kind, text),
            };
            CompileError::parser(message, token.span, token.pos)
        })
    }

    /// `T{...}` or `pkg.T{...}`
    fn parse_named_composite(&mut self) -> CompileResult<Primary> {
        let name = self.parse_qualified_ident()?;
        if !self.check(&TokenKind::LBrace) {
            return Err(self.unexpected("'{'"));
        }
        self.parse_composite_body(Some(LiteralType::Named(name)))
    }

    /// `{` [Element {"," Element} [","]] `}`
    fn parse_composite_body(&mut self, ty: Option<LiteralType>) -> CompileResult<Primary> {
        self.expect(TokenKind::LBrace)?;
        let elements = self.with_composite_literals(true, |p| {
            let mut elements = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                elements.push(p.parse_element()?);
                if !p.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(elements)
        })?;
        self.expect(TokenKind::RBrace)?;
        Ok(Primary::Literal(Literal::Composite(CompositeLit { ty, elements })))
    }

    /// `[key ":"] value`; a bare identifier before `:` is a field name
    fn parse_element(&mut self) -> CompileResult<Element> {
        if matches!(self.current().kind, TokenKind::Identifier(_))
            && matches!(self.peek_kind(1), TokenKind::Colon)
        {
            let name = self.expect_identifier()?;
            self.advance();
            let value = self.parse_element_value()?;
            return Ok(Element {
                key: Some(ElementKey::Name(name)),
                value,
            });
        }

        let first = self.parse_element_value()?;
        if self.match_token(&TokenKind::Colon) {
            let value = self.parse_element_value()?;
            return Ok(Element {
                key: Some(ElementKey::Expr(first)),
                value,
            });
        }
        Ok(Element {
            key: None,
            value: first,
        })
    }

    /// Element values may elide the literal type: `{1, 2}` inside `[][]int{...}`
    fn parse_element_value(&mut self) -> CompileResult<Expr> {
        if self.check(&TokenKind::LBrace) {
            let literal = self.parse_composite_body(None)?;
            return Ok(Expr::from_primary(literal));
        }
        self.parse_expression()
    }

    /// `NonPointerType ( Expr )` after the type has been read
    fn parse_conversion(&mut self, ty: NonPointerType) -> CompileResult<Primary> {
        self.expect(TokenKind::LParen)?;
        let expr = self.with_composite_literals(true, Self::parse_expression)?;
        self.expect(TokenKind::RParen)?;
        Ok(Primary::Conversion(Conversion {
            ty,
            expr: Box::new(expr),
        }))
    }

    /// `( Expr )`, or `( Type ) ( Expr )` when the parenthesized tokens are
    /// not an expression
    fn parse_paren_or_conversion(&mut self) -> CompileResult<Primary> {
        let checkpoint = self.checkpoint();
        let paren = self.with_composite_literals(true, |p| {
            p.expect(TokenKind::LParen)?;
            let inner = p.parse_expression()?;
            p.expect(TokenKind::RParen)?;
            Ok(inner)
        });
        let expr_error = match paren {
            Ok(inner) => return Ok(Primary::Paren(Box::new(inner))),
            Err(err) => err,
        };

        self.restore(checkpoint);
        trace!(pos = self.pos, "parenthesized operand is not an expression, trying a type");
        self.try_alternative(|p| {
            p.expect(TokenKind::LParen)?;
            let ty = p.parse_type()?;
            p.expect(TokenKind::RParen)?;
            p.parse_conversion(NonPointerType::Paren(Box::new(ty)))
        })
        .map_err(|err| furthest(err, expr_error))
    }

    /// `new`, `delete` or `panic` with an optional leading type argument
    fn parse_builtin_call(&mut self, builtin: Builtin) -> CompileResult<Primary> {
        self.advance();
        self.expect(TokenKind::LParen)?;

        let (ty, args) = self.with_composite_literals(true, |p| {
            let ty = p.attempt(|p| {
                let ty = p.parse_type()?;
                if !p.match_token(&TokenKind::Comma) && !p.check(&TokenKind::RParen) {
                    return Err(p.unexpected("',' or ')'"));
                }
                Ok(ty)
            });
            let mut args = Vec::new();
            while !p.check(&TokenKind::RParen) {
                args.push(p.parse_expression()?);
                if !p.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            Ok((ty, args))
        })?;
        self.expect(TokenKind::RParen)?;

        Ok(Primary::Builtin(BuiltinCall { builtin, ty, args }))
    }

    /// True when the current token can begin an expression
    pub(super) fn starts_expression(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Identifier(_)
                | TokenKind::IntLiteral(_)
                | TokenKind::CharLiteral(_)
                | TokenKind::StringLiteral(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::Struct
                | TokenKind::Func
                | TokenKind::New
                | TokenKind::Delete
                | TokenKind::Panic
        ) || unary_op(&self.current().kind).is_some()
    }
}

fn logical_or_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::PipePipe => Some(BinaryOp::LogOr),
        _ => None,
    }
}

fn logical_and_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::AmpAmp => Some(BinaryOp::LogAnd),
        _ => None,
    }
}

fn relational_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::LtEq => Some(BinaryOp::Le),
        TokenKind::GtEq => Some(BinaryOp::Ge),
        _ => None,
    }
}

fn additive_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Pipe => Some(BinaryOp::BitOr),
        TokenKind::Caret => Some(BinaryOp::BitXor),
        _ => None,
    }
}

fn multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Amp => Some(BinaryOp::BitAnd),
        TokenKind::LtLt => Some(BinaryOp::Shl),
        TokenKind::GtGt => Some(BinaryOp::Shr),
        TokenKind::AmpCaret => Some(BinaryOp::AndNot),
        _ => None,
    }
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Caret => Some(UnaryOp::BitNot),
        TokenKind::Star => Some(UnaryOp::Deref),
        TokenKind::Amp => Some(UnaryOp::AddrOf),
        TokenKind::Arrow => Some(UnaryOp::Recv),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse_body, parse_err};
    use crate::ast::*;
    use pretty_assertions::assert_eq;

    /// Parse `_ = <source>` and return the right-hand side
    fn expr(source: &str) -> Expr {
        let mut stmts = parse_body(&format!("_ = {}", source));
        match stmts.remove(0) {
            Stmt::Simple(SimpleStmt::Assign(mut assign)) => assign.rhs.remove(0),
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    fn primary(source: &str) -> Primary {
        expr(source)
            .as_term()
            .map(|term| {
                assert!(term.postfix.is_empty(), "unexpected postfix in {}", source);
                term.operand.clone()
            })
            .unwrap_or_else(|| panic!("{} is not a bare operand", source))
    }

    fn name(n: &str) -> Expr {
        Expr::from_primary(Primary::Name(QualifiedIdent::new(n)))
    }

    fn int(value: i64) -> Expr {
        Expr::from_primary(Primary::Literal(Literal::Basic(BasicLit::Int(value))))
    }

    #[test]
    fn test_logical_precedence() {
        // a || (b && c)
        let e = expr("a || b && c");
        assert_eq!(e.operators().collect::<Vec<_>>(), vec![BinaryOp::LogOr]);
        assert!(e.base.is_pass_through());
        let rhs = &e.rest[0].1;
        assert_eq!(rhs.operators().collect::<Vec<_>>(), vec![BinaryOp::LogAnd]);
    }

    #[test]
    fn test_arithmetic_precedence() {
        // a + (b * c)
        let e = expr("a + b * c");
        let add = &e.base.base.base;
        assert_eq!(add.operators().collect::<Vec<_>>(), vec![BinaryOp::Add]);
        assert!(add.base.is_pass_through());
        assert_eq!(add.rest[0].1.operators().collect::<Vec<_>>(), vec![BinaryOp::Mul]);
    }

    #[test]
    fn test_left_associative_chain() {
        let e = expr("a - b - c");
        let add = &e.base.base.base;
        assert_eq!(add.operators().collect::<Vec<_>>(), vec![BinaryOp::Sub, BinaryOp::Sub]);
    }

    #[test]
    fn test_comparison_chaining() {
        let e = expr("a == b == c");
        let rel = &e.base.base;
        assert_eq!(rel.operators().collect::<Vec<_>>(), vec![BinaryOp::Eq, BinaryOp::Eq]);
    }

    #[test]
    fn test_unary_operators() {
        for (source, op) in [
            ("-x", UnaryOp::Neg),
            ("!x", UnaryOp::Not),
            ("^x", UnaryOp::BitNot),
            ("*p", UnaryOp::Deref),
            ("&v", UnaryOp::AddrOf),
            ("<-ch", UnaryOp::Recv),
        ] {
            let e = expr(source);
            assert_eq!(e.as_unary().and_then(|u| u.op), Some(op), "{}", source);
        }
    }

    #[test]
    fn test_postfix_chain() {
        let e = expr("a.b[c](d, e)");
        let term = e.as_term().unwrap();
        assert_eq!(term.operand, Primary::Name(QualifiedIdent::new("a")));
        assert_eq!(
            term.postfix,
            vec![
                Postfix::Selector("b".into()),
                Postfix::Index(name("c")),
                Postfix::Call(vec![name("d"), name("e")]),
            ]
        );
    }

    #[test]
    fn test_basic_literals() {
        assert_eq!(expr("0x1F"), int(31));
        assert_eq!(expr("0b1010"), int(10));
        assert_eq!(expr("017"), int(15));
        assert_eq!(expr("0"), int(0));
        assert_eq!(
            primary("'a'"),
            Primary::Literal(Literal::Basic(BasicLit::Char('a')))
        );
        assert_eq!(
            primary("\"hi\\n\""),
            Primary::Literal(Literal::Basic(BasicLit::String("hi\n".into())))
        );
        assert_eq!(primary("true"), Primary::Literal(Literal::Basic(BasicLit::Bool(true))));
    }

    #[test]
    fn test_int_literal_errors() {
        let err = parse_err("package p\nfunc f() { x = 9223372036854775808 }");
        assert_eq!(err.message(), "integer literal '9223372036854775808' overflows int64");
        assert_eq!(err.position().column, 16);

        let err = parse_err("package p\nfunc f() { x = 09 }");
        assert_eq!(err.message(), "invalid octal literal '09'");
    }

    #[test]
    fn test_malformed_radix_literals() {
        for (literal, message) in [
            ("0x", "invalid hex literal '0x'"),
            ("0b2", "invalid binary literal '0b2'"),
            ("0o9", "invalid octal literal '0o9'"),
            ("1__000", "invalid integer literal '1__000'"),
            ("0xFF_", "invalid hex literal '0xFF_'"),
        ] {
            let err = parse_err(&format!("package p\nfunc f() {{ x = {} }}", literal));
            assert_eq!(err.message(), message);
            assert_eq!(err.position().line, 2);
            assert_eq!(err.position().column, 16);
        }

        let err = parse_err("package p\nconst C = 0b2");
        assert_eq!(err.message(), "invalid binary literal '0b2'");
        let err = parse_err("package p\nvar x int = 0x");
        assert_eq!(err.message(), "invalid hex literal '0x'");

        assert_eq!(expr("0x_FF"), int(255));
    }

    #[test]
    fn test_composite_literals() {
        let Primary::Literal(Literal::Composite(lit)) = primary("Point{x: 1, y: 2}") else {
            panic!("expected composite literal");
        };
        assert_eq!(lit.ty, Some(LiteralType::Named(QualifiedIdent::new("Point"))));
        assert_eq!(lit.elements[0].key, Some(ElementKey::Name("x".into())));

        let Primary::Literal(Literal::Composite(lit)) = primary("[][]int{{1}, {2, 3},}") else {
            panic!("expected composite literal");
        };
        assert_eq!(lit.ty, Some(LiteralType::Array(Box::new(Type::array_of(Type::named("int"))))));
        assert_eq!(lit.elements.len(), 2);
        let inner = lit.elements[1].value.as_term().unwrap();
        assert!(matches!(
            &inner.operand,
            Primary::Literal(Literal::Composite(CompositeLit { ty: None, elements })) if elements.len() == 2
        ));

        let Primary::Literal(Literal::Composite(lit)) = primary("[]string{0: a, n + 1: b}") else {
            panic!("expected composite literal");
        };
        assert!(matches!(lit.elements[1].key, Some(ElementKey::Expr(_))));

        let Primary::Literal(Literal::Composite(lit)) = primary("geo.Point{}") else {
            panic!("expected composite literal");
        };
        assert_eq!(lit.ty, Some(LiteralType::Named(QualifiedIdent::qualified("geo", "Point"))));
        assert!(lit.elements.is_empty());

        assert!(matches!(
            primary("struct { x int }{x: 1}"),
            Primary::Literal(Literal::Composite(CompositeLit { ty: Some(LiteralType::Struct(_)), .. }))
        ));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            primary("[]byte(s)"),
            Primary::Conversion(Conversion {
                ty: NonPointerType::Array(Box::new(Type::named("byte"))),
                expr: Box::new(name("s")),
            })
        );
        assert!(matches!(
            primary("func(int) bool(f)"),
            Primary::Conversion(Conversion { ty: NonPointerType::Function(_), .. })
        ));
        assert_eq!(
            primary("([]int)(v)"),
            Primary::Conversion(Conversion {
                ty: NonPointerType::Paren(Box::new(Type::array_of(Type::named("int")))),
                expr: Box::new(name("v")),
            })
        );
    }

    #[test]
    fn test_parenthesized_pointer_reads_as_expression() {
        // (*T)(p) is a call on a parenthesized dereference
        let e = expr("(*T)(p)");
        let term = e.as_term().unwrap();
        assert!(matches!(term.operand, Primary::Paren(_)));
        assert_eq!(term.postfix, vec![Postfix::Call(vec![name("p")])]);
    }

    #[test]
    fn test_conversion_error_reported_past_type() {
        let err = parse_err("package p\nfunc f() { x = ([]int)(v }");
        assert_eq!(err.message(), "expected ')', found '}'");
        assert_eq!(err.position().column, 26);
    }

    #[test]
    fn test_builtin_calls() {
        assert_eq!(
            primary("new(Node)"),
            Primary::Builtin(BuiltinCall {
                builtin: Builtin::New,
                ty: Some(Type::named("Node")),
                args: vec![],
            })
        );
        assert_eq!(
            primary("delete(m, k)"),
            Primary::Builtin(BuiltinCall {
                builtin: Builtin::Delete,
                ty: Some(Type::named("m")),
                args: vec![name("k")],
            })
        );
        let Primary::Builtin(call) = primary("panic(f(x))") else {
            panic!("expected builtin");
        };
        assert_eq!(call.ty, None);
        assert_eq!(call.args.len(), 1);
        let Primary::Builtin(call) = primary("panic(\"boom\")") else {
            panic!("expected builtin");
        };
        assert_eq!(call.ty, None);
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_err("package p\nfunc f() { x = }");
        assert_eq!(err.message(), "expected expression, found '}'");
        assert_eq!(err.position().line, 2);
        assert_eq!(err.position().column, 16);

        let err = parse_err("package p\nfunc f() { x = (a + ) }");
        assert_eq!(err.message(), "expected expression, found ')'");
    }
}
