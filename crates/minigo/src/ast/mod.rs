//! Abstract Syntax Tree definitions

mod types;
mod expr;
mod stmt;
mod decl;
mod printer;

pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;
pub use printer::Printer;

/// A complete source file
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub package: String,
    pub imports: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(package: impl Into<String>, imports: Vec<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            package: package.into(),
            imports,
            declarations,
        }
    }

    /// Top-level functions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Func(func) => Some(func),
            _ => None,
        })
    }

    pub fn function(&self, name: &str) -> Option<&FuncDecl> {
        self.functions().find(|func| func.name == name)
    }
}
