//! Statements and blocks

use super::{furthest, Parser};
use crate::ast::*;
use crate::common::CompileResult;
use crate::lexer::TokenKind;
use tracing::trace;

impl Parser {
    /// `{` {Statement [";"]} `}`
    pub(super) fn parse_block(&mut self) -> CompileResult<Vec<Stmt>> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            if self.match_token(&TokenKind::Semi) {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    pub(super) fn parse_statement(&mut self) -> CompileResult<Stmt> {
        if self.starts_declaration() {
            return Ok(Stmt::Decl(self.parse_declaration()?));
        }

        match self.current().kind {
            TokenKind::Identifier(_) if matches!(self.peek_kind(1), TokenKind::Colon) => {
                let label = self.expect_identifier()?;
                self.expect(TokenKind::Colon)?;
                let stmt = self.parse_statement()?;
                Ok(Stmt::Labeled(LabeledStmt {
                    label,
                    stmt: Box::new(stmt),
                }))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.on_same_line() && self.starts_expression() {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                Ok(Stmt::Return(value))
            }
            TokenKind::Continue => {
                self.advance();
                let label = if self.on_same_line() && matches!(self.current().kind, TokenKind::Identifier(_)) {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(Stmt::Continue(label))
            }
            TokenKind::Goto => {
                self.advance();
                Ok(Stmt::Goto(self.expect_identifier()?))
            }
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::If => Ok(Stmt::If(self.parse_if_stmt()?)),
            TokenKind::For => Ok(Stmt::For(self.parse_for_stmt()?)),
            _ => Ok(Stmt::Simple(self.parse_simple_stmt()?)),
        }
    }

    /// Parse the statement forms allowed in if/for headers. The operator
    /// following the left-hand expression list decides the form.
    pub(super) fn parse_simple_stmt(&mut self) -> CompileResult<SimpleStmt> {
        if self.is_short_var_decl() {
            return Ok(SimpleStmt::ShortVarDecl(self.parse_short_var_decl()?));
        }

        let first = self.parse_expression()?;
        if !self.check(&TokenKind::Comma) {
            if let Some(op) = inc_dec_op(&self.current().kind) {
                self.advance();
                return Ok(SimpleStmt::IncDec(IncDecStmt { expr: first, op }));
            }
            if let Some(op) = assign_op(&self.current().kind) {
                self.advance();
                let rhs = self.parse_expression_list()?;
                return Ok(SimpleStmt::Assign(Assignment {
                    lhs: vec![first],
                    op,
                    rhs,
                }));
            }
            if self.check(&TokenKind::ColonEq) {
                return Err(self.error("non-name on left side of ':='"));
            }
            return Ok(SimpleStmt::Expr(first));
        }

        let mut lhs = vec![first];
        while self.match_token(&TokenKind::Comma) {
            lhs.push(self.parse_expression()?);
        }
        let Some(op) = assign_op(&self.current().kind) else {
            if self.check(&TokenKind::ColonEq) {
                return Err(self.error("non-name on left side of ':='"));
            }
            return Err(self.unexpected("assignment operator"));
        };
        self.advance();
        let rhs = self.parse_expression_list()?;
        Ok(SimpleStmt::Assign(Assignment { lhs, op, rhs }))
    }

    pub(super) fn parse_if_stmt(&mut self) -> CompileResult<IfStmt> {
        self.expect(TokenKind::If)?;
        let (init, cond) = self.with_composite_literals(false, Self::parse_if_header)?;
        let body = self.parse_block()?;

        let else_branch = if self.match_token(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_stmt()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStmt {
            init,
            cond,
            body,
            else_branch,
        })
    }

    /// `[Simple ";"] Expr`: try the initializer form, otherwise rewind to just
    /// after `if`
    fn parse_if_header(&mut self) -> CompileResult<(Option<Box<SimpleStmt>>, Expr)> {
        let init = self.try_alternative(|p| {
            let init = p.parse_simple_stmt()?;
            p.expect(TokenKind::Semi)?;
            Ok(init)
        });
        let init_error = match init {
            Ok(init) => return Ok((Some(Box::new(init)), self.parse_expression()?)),
            Err(err) => err,
        };

        trace!(pos = self.pos, "if header has no initializer");
        let cond = self
            .parse_header_condition()
            .map_err(|err| furthest(init_error, err))?;
        Ok((None, cond))
    }

    /// Bare condition of an if or for header, up to the body's `{`
    fn parse_header_condition(&mut self) -> CompileResult<Expr> {
        let cond = self.parse_expression()?;
        if !self.check(&TokenKind::LBrace) {
            return Err(self.unexpected("'{'"));
        }
        Ok(cond)
    }

    pub(super) fn parse_for_stmt(&mut self) -> CompileResult<ForStmt> {
        self.expect(TokenKind::For)?;
        let header = if self.check(&TokenKind::LBrace) {
            ForHeader::Infinite
        } else {
            self.with_composite_literals(false, Self::parse_for_header)?
        };
        let body = self.parse_block()?;
        Ok(ForStmt { header, body })
    }

    /// Clause form when `[Simple] ";"` parses, condition form otherwise
    fn parse_for_header(&mut self) -> CompileResult<ForHeader> {
        let init = self.try_alternative(|p| {
            let init = if p.check(&TokenKind::Semi) {
                None
            } else {
                Some(p.parse_simple_stmt()?)
            };
            p.expect(TokenKind::Semi)?;
            Ok(init)
        });

        let init = match init {
            Ok(init) => init,
            Err(init_error) => {
                trace!(pos = self.pos, "for header is a bare condition");
                let cond = self
                    .parse_header_condition()
                    .map_err(|err| furthest(init_error, err))?;
                return Ok(ForHeader::Condition(cond));
            }
        };

        let cond = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semi)?;
        let post = if self.check(&TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_simple_stmt()?)
        };

        Ok(ForHeader::Clause(ForClause {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
        }))
    }
}

fn inc_dec_op(kind: &TokenKind) -> Option<IncDecOp> {
    match kind {
        TokenKind::PlusPlus => Some(IncDecOp::Inc),
        TokenKind::MinusMinus => Some(IncDecOp::Dec),
        _ => None,
    }
}

fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Eq => Some(AssignOp::Assign),
        TokenKind::PlusEq => Some(AssignOp::AddAssign),
        TokenKind::MinusEq => Some(AssignOp::SubAssign),
        TokenKind::PipeEq => Some(AssignOp::OrAssign),
        TokenKind::CaretEq => Some(AssignOp::XorAssign),
        TokenKind::StarEq => Some(AssignOp::MulAssign),
        TokenKind::SlashEq => Some(AssignOp::DivAssign),
        TokenKind::PercentEq => Some(AssignOp::ModAssign),
        TokenKind::AmpEq => Some(AssignOp::AndAssign),
        TokenKind::AmpCaretEq => Some(AssignOp::AndNotAssign),
        TokenKind::LtLtEq => Some(AssignOp::ShlAssign),
        TokenKind::GtGtEq => Some(AssignOp::ShrAssign),
        _ => None,
    }
}
