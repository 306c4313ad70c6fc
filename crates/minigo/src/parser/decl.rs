//! Declarations: `func`, `var`, `const`, `type` and short variable declarations

use super::Parser;
use crate::ast::*;
use crate::common::{CompileError, CompileResult};
use crate::lexer::TokenKind;

impl Parser {
    pub(super) fn parse_top_level_declaration(&mut self) -> CompileResult<Declaration> {
        if self.check(&TokenKind::Func) {
            return Ok(Declaration::Func(self.parse_func_decl()?));
        }
        if self.starts_declaration() {
            return self.parse_declaration();
        }
        Err(self.unexpected("declaration"))
    }

    /// True when a body-level declaration starts here
    pub(super) fn starts_declaration(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Var | TokenKind::Const | TokenKind::Type
        ) || self.is_short_var_decl()
    }

    /// `var`, `const`, `type` or `a, b := ...`
    pub(super) fn parse_declaration(&mut self) -> CompileResult<Declaration> {
        match self.current().kind {
            TokenKind::Var => Ok(Declaration::Var(self.parse_var_decl()?)),
            TokenKind::Const => Ok(Declaration::Const(self.parse_const_decl()?)),
            TokenKind::Type => Ok(Declaration::Type(self.parse_type_decl()?)),
            _ => Ok(Declaration::ShortVar(self.parse_short_var_decl()?)),
        }
    }

    /// Lookahead for `Ident {"," Ident} ":="` without consuming anything
    pub(super) fn is_short_var_decl(&self) -> bool {
        let mut offset = 0;
        loop {
            if !matches!(self.peek_kind(offset), TokenKind::Identifier(_)) {
                return false;
            }
            match self.peek_kind(offset + 1) {
                TokenKind::Comma => offset += 2,
                TokenKind::ColonEq => return true,
                _ => return false,
            }
        }
    }

    fn parse_func_decl(&mut self) -> CompileResult<FuncDecl> {
        self.expect(TokenKind::Func)?;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_field()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;

        let result = if self.check(&TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let body = self.parse_block()?;

        Ok(FuncDecl {
            name,
            params,
            result,
            body,
        })
    }

    fn parse_var_decl(&mut self) -> CompileResult<VarDecl> {
        self.expect(TokenKind::Var)?;
        let names = self.parse_identifier_list()?;
        let ty = self.parse_type()?;
        let values = if self.match_token(&TokenKind::Eq) {
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(VarDecl { names, ty, values })
    }

    fn parse_const_decl(&mut self) -> CompileResult<ConstDecl> {
        self.expect(TokenKind::Const)?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Eq)?;

        let token = self.current().clone();
        let TokenKind::IntLiteral(text) = &token.kind else {
            return Err(self.unexpected("integer constant"));
        };
        let value = self.parse_int_literal(text, &token)?;
        self.advance();

        Ok(ConstDecl { name, value })
    }

    fn parse_type_decl(&mut self) -> CompileResult<TypeDecl> {
        self.expect(TokenKind::Type)?;
        let name = self.expect_identifier()?;
        let ty = self.parse_type()?;
        Ok(TypeDecl { name, ty })
    }

    /// `a, b := x, y` with as many values as names
    pub(super) fn parse_short_var_decl(&mut self) -> CompileResult<ShortVarDecl> {
        let names = self.parse_identifier_list()?;
        let define = self.expect(TokenKind::ColonEq)?;
        let values = self.parse_expression_list()?;

        if names.len() != values.len() {
            return Err(CompileError::parser(
                format!(
                    "assignment mismatch: {} {} but {} {}",
                    names.len(),
                    if names.len() == 1 { "variable" } else { "variables" },
                    values.len(),
                    if values.len() == 1 { "value" } else { "values" },
                ),
                define.span,
                define.pos,
            ));
        }

        Ok(ShortVarDecl { names, values })
    }
}
