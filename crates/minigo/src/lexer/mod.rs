//! Lexer module for tokenizing minigo source code

mod token;
mod scanner;

pub use token::{LexErrorKind, Token, TokenKind};
pub use scanner::Lexer;
