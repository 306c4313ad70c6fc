//! Infrastructure shared by the lexer, parser and driver

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter, ErrorKind};
pub use span::{LineIndex, Position, Span};
