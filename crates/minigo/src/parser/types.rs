//! Type grammar

use super::Parser;
use crate::ast::*;
use crate::common::CompileResult;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a type. The leading token selects the alternative: `func`,
    /// `struct`, `[`, `*`, otherwise a (qualified) type name.
    pub(super) fn parse_type(&mut self) -> CompileResult<Type> {
        match self.current().kind {
            TokenKind::Func => Ok(Type::Function(self.parse_func_type()?)),
            TokenKind::Struct => Ok(Type::Struct(self.parse_struct_type()?)),
            TokenKind::LBracket => Ok(Type::array_of(self.parse_array_element()?)),
            TokenKind::Star => {
                self.advance();
                Ok(Type::pointer_to(self.parse_type()?))
            }
            TokenKind::Identifier(_) => Ok(Type::Named(self.parse_qualified_ident()?)),
            _ => Err(self.unexpected("type")),
        }
    }

    pub(super) fn starts_type(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Func
                | TokenKind::Struct
                | TokenKind::LBracket
                | TokenKind::Star
                | TokenKind::Identifier(_)
        )
    }

    /// `[` `]` Type, returning the element type
    pub(super) fn parse_array_element(&mut self) -> CompileResult<Type> {
        self.expect(TokenKind::LBracket)?;
        self.expect(TokenKind::RBracket)?;
        self.parse_type()
    }

    /// `func(T1, T2) R`; the result is only taken when it begins on the line
    /// of the closing parenthesis
    pub(super) fn parse_func_type(&mut self) -> CompileResult<FuncType> {
        self.expect(TokenKind::Func)?;
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_type()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;

        let result = if self.on_same_line() && self.starts_type() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        Ok(FuncType { params, result })
    }

    /// `struct { a, b T; c U }`, field separators optional
    pub(super) fn parse_struct_type(&mut self) -> CompileResult<StructType> {
        self.expect(TokenKind::Struct)?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            if self.match_token(&TokenKind::Semi) {
                continue;
            }
            fields.push(self.parse_field()?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(StructType { fields })
    }

    /// Names sharing one type: `x, y int`
    pub(super) fn parse_field(&mut self) -> CompileResult<Field> {
        let names = self.parse_identifier_list()?;
        let ty = self.parse_type()?;
        Ok(Field::new(names, ty))
    }

    /// `name` or `pkg.name`
    pub(super) fn parse_qualified_ident(&mut self) -> CompileResult<QualifiedIdent> {
        let first = self.expect_identifier()?;
        if self.check(&TokenKind::Dot) && matches!(self.peek_kind(1), TokenKind::Identifier(_)) {
            self.advance();
            let name = self.expect_identifier()?;
            return Ok(QualifiedIdent::qualified(first, name));
        }
        Ok(QualifiedIdent::new(first))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_err};
    use crate::ast::*;
    use pretty_assertions::assert_eq;

    fn type_of(source: &str) -> Type {
        let program = parse(&format!("package p\ntype T {}", source));
        match program.declarations.into_iter().next() {
            Some(Declaration::Type(decl)) => decl.ty,
            other => panic!("expected type declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_named_and_qualified() {
        assert_eq!(type_of("int"), Type::named("int"));
        assert_eq!(
            type_of("list.Node"),
            Type::Named(QualifiedIdent::qualified("list", "Node"))
        );
    }

    #[test]
    fn test_pointer_and_array() {
        assert_eq!(
            type_of("*[]*byte"),
            Type::pointer_to(Type::array_of(Type::pointer_to(Type::named("byte"))))
        );
    }

    #[test]
    fn test_struct_fields() {
        let ty = type_of("struct {\n\tx, y int\n\tnext *T\n}");
        let Type::Struct(st) = ty else {
            panic!("expected struct type");
        };
        assert_eq!(st.fields.len(), 2);
        assert_eq!(st.fields[0].names, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(st.fields[1].ty, Type::pointer_to(Type::named("T")));

        let Type::Struct(st) = type_of("struct { a int; b string; }") else {
            panic!("expected struct type");
        };
        assert_eq!(st.fields.len(), 2);
        assert_eq!(type_of("struct {}"), Type::Struct(StructType { fields: vec![] }));
    }

    #[test]
    fn test_func_type() {
        assert_eq!(
            type_of("func(int, []string) bool"),
            Type::Function(FuncType {
                params: vec![Type::named("int"), Type::array_of(Type::named("string"))],
                result: Some(Box::new(Type::named("bool"))),
            })
        );
        assert_eq!(
            type_of("func()"),
            Type::Function(FuncType { params: vec![], result: None })
        );
    }

    #[test]
    fn test_func_type_result_must_share_line() {
        let Type::Struct(st) = type_of("struct {\n\tcallback func(int)\n\tcount int\n}") else {
            panic!("expected struct type");
        };
        assert_eq!(st.fields.len(), 2);
        assert_eq!(
            st.fields[0].ty,
            Type::Function(FuncType { params: vec![Type::named("int")], result: None })
        );
    }

    #[test]
    fn test_missing_type() {
        let err = parse_err("package p\ntype T = int");
        assert_eq!(err.message(), "expected type, found '='");
    }
}
