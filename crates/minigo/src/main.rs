//! minigo - parse a source file and print its tokens, tree or canonical form
//!
//! Usage: minigo [OPTIONS] <input>

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use minigo::common::DiagnosticReporter;
use minigo::driver::{CompileContext, Frontend, FrontendConfig};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(ClapParser, Debug)]
#[command(name = "minigo")]
#[command(version)]
#[command(about = "Lexer and parser for a small curly-brace language", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Dump tokens with their line:column
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the syntax tree (default when no other output is requested)
    #[arg(long)]
    dump_ast: bool,

    /// Print the canonical source of the parsed file
    #[arg(long)]
    emit_source: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for FrontendConfig {
    fn from(args: &Args) -> Self {
        Self {
            dump_tokens: args.dump_tokens,
            dump_ast: args.dump_ast,
            emit_source: args.emit_source,
            verbose: args.verbose,
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => {}
        // Diagnostics were already rendered
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the input was rejected
fn run(args: &Args) -> Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(filename.clone(), source.clone());
    let ctx = CompileContext::new(filename, file_id, &reporter);

    let frontend = Frontend::new(FrontendConfig::from(args));
    match frontend.run(&source, &ctx) {
        Ok(output) => {
            print!("{}", output);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
