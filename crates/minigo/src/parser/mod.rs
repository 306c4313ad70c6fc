//! Recursive descent parser
//!
//! The token stream is materialized before parsing so that ordered choice can
//! save the cursor with `checkpoint` and rewind with `restore`. Every rewind is
//! bounded: an attempt never spans more than one header, operand or argument.

mod decl;
mod expr;
mod stmt;
mod types;

use crate::ast::*;
use crate::common::{CompileError, CompileResult, Span};
use crate::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser over a materialized token stream
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Cleared inside if/for headers, where `name {` opens the body
    composite_literals: bool,
}

impl Parser {
    /// Lex `source` and create a parser over its tokens
    pub fn new(source: &str) -> CompileResult<Self> {
        let tokens = Lexer::new(source).tokenize_all()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser over already lexed tokens. A trailing `Eof` is added
    /// when missing.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            let pos = tokens.last().map(|token| token.pos).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), pos));
        }
        Self {
            tokens,
            pos: 0,
            composite_literals: true,
        }
    }

    /// Parse a complete source file
    pub fn parse(&mut self) -> CompileResult<Program> {
        self.expect(TokenKind::Package)?;
        let package = self.expect_identifier()?;
        self.match_token(&TokenKind::Semi);

        let mut imports = Vec::new();
        while self.match_token(&TokenKind::Import) {
            let token = self.advance();
            match token.kind {
                TokenKind::StringLiteral(path) => imports.push(path),
                other => {
                    return Err(CompileError::parser(
                        format!("expected import path, found {}", other),
                        token.span,
                        token.pos,
                    ));
                }
            }
            self.match_token(&TokenKind::Semi);
        }

        let mut declarations = Vec::new();
        while !self.at_end() {
            if self.match_token(&TokenKind::Semi) {
                continue;
            }
            declarations.push(self.parse_top_level_declaration()?);
        }

        Ok(Program::new(package, imports, declarations))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self, offset: usize) -> &TokenKind {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// `Ident {"," Ident}`
    fn parse_identifier_list(&mut self) -> CompileResult<Vec<String>> {
        let mut names = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Comma) && matches!(self.peek_kind(1), TokenKind::Identifier(_)) {
            self.advance();
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Error at the current token
    fn error(&self, message: impl Into<String>) -> CompileError {
        let token = self.current();
        CompileError::parser(message, token.span, token.pos)
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        self.error(format!("expected {}, found {}", expected, self.current().kind))
    }

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// Run one alternative of an ordered choice, rewinding on failure
    fn attempt<T>(&mut self, parse: impl FnOnce(&mut Self) -> CompileResult<T>) -> Option<T> {
        self.try_alternative(parse).ok()
    }

    /// Like [`Parser::attempt`], but keeps the error so that it can compete
    /// with the error of the next alternative
    fn try_alternative<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> CompileResult<T>,
    ) -> CompileResult<T> {
        let checkpoint = self.checkpoint();
        let result = parse(self);
        if result.is_err() {
            self.restore(checkpoint);
        }
        result
    }

    /// Parse with named-type composite literals enabled or disabled
    fn with_composite_literals<T>(
        &mut self,
        allowed: bool,
        parse: impl FnOnce(&mut Self) -> CompileResult<T>,
    ) -> CompileResult<T> {
        let saved = std::mem::replace(&mut self.composite_literals, allowed);
        let result = parse(self);
        self.composite_literals = saved;
        result
    }

    /// True when the current token starts on the line of the token before it
    fn on_same_line(&self) -> bool {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].pos.line == self.current().pos.line,
            None => true,
        }
    }
}

/// Of two failed alternatives, the error that got further into the input.
/// Ties go to `second`.
fn furthest(first: CompileError, second: CompileError) -> CompileError {
    if first.span().start > second.span().start {
        first
    } else {
        second
    }
}
