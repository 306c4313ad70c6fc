//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, LineIndex, Position, Span};
use logos::Logos;

/// Lexer for minigo source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    lines: LineIndex,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
            at_eof: false,
        }
    }

    fn position(&self, offset: usize) -> Position {
        self.lines.position(self.inner.source(), offset)
    }

    /// Get the next token. After the input is exhausted every call yields `Eof`.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len), self.position(len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(Token::new(kind, Span::from(span.clone()), self.position(span.start)))
            }
            Some(Err(kind)) => {
                let span = self.inner.span();
                let message = match kind {
                    super::LexErrorKind::InvalidCharacter => {
                        format!("unexpected character '{}'", self.inner.slice())
                    }
                    other => other.to_string(),
                };
                Err(CompileError::lexer(
                    message,
                    Span::from(span.clone()),
                    self.position(span.start),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len), self.position(len)))
            }
        }
    }

    /// Tokenize the entire source and return all tokens, ending with `Eof`
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
