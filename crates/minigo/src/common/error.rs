//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use thiserror::Error;
use super::{Position, Span};

/// Front-end error with source location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("{position}: lexer error: {message}")]
    Lexer {
        message: String,
        span: Span,
        position: Position,
    },

    #[error("{position}: syntax error: {message}")]
    Parser {
        message: String,
        span: Span,
        position: Position,
    },
}

/// Which stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
            position,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self::Parser {
            message: message.into(),
            span,
            position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lexer { .. } => ErrorKind::Lex,
            CompileError::Parser { .. } => ErrorKind::Syntax,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Lexer { span, .. } | CompileError::Parser { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            CompileError::Lexer { position, .. } | CompileError::Parser { position, .. } => {
                *position
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Lexer { message, .. } | CompileError::Parser { message, .. } => message,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn diagnostic(&self, file_id: usize, error: &CompileError) -> Diagnostic<usize> {
        let title = match error.kind() {
            ErrorKind::Lex => "Lexer error",
            ErrorKind::Syntax => "Syntax error",
        };
        let span = error.span();
        Diagnostic::error()
            .with_message(title)
            .with_labels(vec![
                Label::primary(file_id, span.start..span.end).with_message(error.message())
            ])
    }

    /// Render `error` into an arbitrary terminal writer
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        error: &CompileError,
    ) -> Result<(), codespan_reporting::files::Error> {
        let diagnostic = self.diagnostic(file_id, error);
        term::emit(writer, &self.config, &self.files, &diagnostic)
    }

    /// Render `error` to stderr
    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let _ = self.emit(&mut writer.lock(), file_id, error);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::NoColor;

    #[test]
    fn test_display_includes_position() {
        let err = CompileError::parser("expected type", Span::new(6, 7), Position::new(1, 7));
        assert_eq!(err.to_string(), "1:7: syntax error: expected type");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_reporter_renders_label() {
        let source = "package p\nvar x\n";
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("input.go", source);
        let err = CompileError::parser("expected type, found end of file", Span::new(14, 15), Position::new(2, 5));

        let mut out = NoColor::new(Vec::new());
        reporter.emit(&mut out, file_id, &err).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("Syntax error"));
        assert!(text.contains("input.go"));
        assert!(text.contains("expected type, found end of file"));
    }
}
