//! minigo - front end for a small curly-brace, statically typed language
//!
//! Turns source text into a typed syntax tree, or the first lexical or
//! syntax error with its position.
//!
//! ## Architecture
//!
//! - **Lexer** (`lexer/`): logos-based tokenizer with line/column tracking
//! - **AST** (`ast/`): declarations, statements, expressions and types, plus a
//!   canonical source printer
//! - **Parser** (`parser/`): recursive descent with bounded backtracking
//! - **Driver** (`driver/`): `parse_source` and the dump pipeline used by the CLI
//! - **Common** (`common/`): errors, spans, diagnostics

pub mod common;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod driver;

// Re-exports for convenience
pub use ast::Program;
pub use common::{CompileError, CompileResult, DiagnosticReporter, ErrorKind, Position, Span};
pub use driver::{parse_source, CompileContext, Frontend, FrontendConfig};
pub use parser::Parser;
