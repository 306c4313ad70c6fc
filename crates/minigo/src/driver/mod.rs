//! Front-end pipeline: lex, parse, and render the requested dumps

use crate::ast::Program;
use crate::common::{CompileResult, DiagnosticReporter};
use crate::lexer::Lexer;
use crate::parser::Parser;
use tracing::{debug, info};

/// Switches mirroring the command-line dump options
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub emit_source: bool,
    pub verbose: bool,
}

/// The file being processed and where its diagnostics go
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// Lex and parse a complete source buffer. Either the whole tree is returned
/// or the first error; there are no partial results.
pub fn parse_source(source: &str) -> CompileResult<Program> {
    let tokens = Lexer::new(source).tokenize_all()?;
    debug!(tokens = tokens.len(), "lexed source");

    let program = Parser::from_tokens(tokens).parse()?;
    debug!(
        package = %program.package,
        imports = program.imports.len(),
        declarations = program.declarations.len(),
        "parsed program"
    );
    Ok(program)
}

/// One token per line: `line:column<TAB>token`
pub fn dump_tokens(source: &str) -> CompileResult<String> {
    let tokens = Lexer::new(source).tokenize_all()?;
    let mut output = String::new();
    for token in &tokens {
        output.push_str(&format!("{}\t{}\n", token.pos, token.kind));
    }
    Ok(output)
}

/// Runs the pipeline for one file according to a [`FrontendConfig`]
pub struct Frontend {
    config: FrontendConfig,
}

impl Frontend {
    pub fn new(config: FrontendConfig) -> Self {
        Self { config }
    }

    /// Produce the requested output text. Errors are reported through the
    /// context's reporter before being returned.
    pub fn run(&self, source: &str, ctx: &CompileContext) -> CompileResult<String> {
        let result = self.render(source, ctx);
        if let Err(e) = &result {
            ctx.reporter.report_error(ctx.file_id, e);
        }
        result
    }

    fn render(&self, source: &str, ctx: &CompileContext) -> CompileResult<String> {
        let mut output = String::new();

        if self.config.dump_tokens {
            debug!(file = %ctx.filename, "dumping tokens");
            output.push_str(&dump_tokens(source)?);
        }

        debug!(file = %ctx.filename, "parsing");
        let program = parse_source(source)?;
        if self.config.verbose {
            info!(
                file = %ctx.filename,
                functions = program.functions().count(),
                "parsed package {}",
                program.package
            );
        }

        if self.config.emit_source {
            output.push_str(&program.to_string());
        }

        // The tree dump is the default when nothing else was asked for
        let nothing_else = !self.config.dump_tokens && !self.config.emit_source;
        if self.config.dump_ast || nothing_else {
            output.push_str(&format!("{:#?}\n", program));
        }

        Ok(output)
    }
}

impl Default for Frontend {
    fn default() -> Self {
        Self::new(FrontendConfig::default())
    }
}
