//! Canonical source printer
//!
//! Expressions and types print inline through `Display`. Declarations and
//! statements go through [`Printer`], which tracks indentation. Statements
//! that do not end in `}` are terminated with `;` so that reparsing the output
//! never joins two statements into one expression.

use super::*;
use std::fmt;

/// Writes a tree back out as source text
pub struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    pub fn print_program(mut self, program: &Program) -> String {
        self.line(&format!("package {}", program.package));
        if !program.imports.is_empty() {
            self.output.push('\n');
            for import in &program.imports {
                self.line(&format!("import {}", quote(import, '"')));
            }
        }
        for decl in &program.declarations {
            self.output.push('\n');
            self.write_indent();
            self.declaration(decl);
        }
        self.output
    }

    pub fn print_stmt(mut self, stmt: &Stmt) -> String {
        self.stmt(stmt);
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
    }

    fn line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Declaration at the current position, ending with a newline
    fn declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Func(func) => {
                self.output.push_str(&format!("func {}(", func.name));
                self.output.push_str(&join(&func.params, ", "));
                self.output.push(')');
                if let Some(result) = &func.result {
                    self.output.push_str(&format!(" {}", result));
                }
                self.output.push(' ');
                self.block(&func.body);
                self.output.push('\n');
            }
            other => {
                self.output.push_str(&simple_declaration(other));
                self.output.push_str(";\n");
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        self.stmt_unindented(stmt);
    }

    fn stmt_unindented(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.declaration(decl),
            Stmt::Labeled(labeled) => {
                self.output.push_str(&format!("{}: ", labeled.label));
                self.stmt_unindented(&labeled.stmt);
            }
            Stmt::Return(None) => self.output.push_str("return;\n"),
            Stmt::Return(Some(value)) => self.output.push_str(&format!("return {};\n", value)),
            Stmt::Continue(None) => self.output.push_str("continue;\n"),
            Stmt::Continue(Some(label)) => self.output.push_str(&format!("continue {};\n", label)),
            Stmt::Goto(label) => self.output.push_str(&format!("goto {};\n", label)),
            Stmt::Block(body) => {
                self.block(body);
                self.output.push('\n');
            }
            Stmt::If(if_stmt) => {
                self.if_stmt(if_stmt);
                self.output.push('\n');
            }
            Stmt::For(for_stmt) => {
                self.output.push_str("for ");
                match &for_stmt.header {
                    ForHeader::Infinite => {}
                    ForHeader::Condition(cond) => self.output.push_str(&format!("{} ", cond)),
                    ForHeader::Clause(clause) => {
                        let init = clause.init.as_ref().map(|s| s.to_string()).unwrap_or_default();
                        let cond = clause.cond.as_ref().map(|c| c.to_string()).unwrap_or_default();
                        let post = clause.post.as_ref().map(|s| s.to_string()).unwrap_or_default();
                        self.output.push_str(&format!("{}; {}; {}", init, cond, post));
                        if clause.post.is_some() {
                            self.output.push(' ');
                        }
                    }
                }
                self.block(&for_stmt.body);
                self.output.push('\n');
            }
            Stmt::Simple(simple) => self.output.push_str(&format!("{};\n", simple)),
        }
    }

    fn if_stmt(&mut self, if_stmt: &IfStmt) {
        self.output.push_str("if ");
        if let Some(init) = &if_stmt.init {
            self.output.push_str(&format!("{}; ", init));
        }
        self.output.push_str(&format!("{} ", if_stmt.cond));
        self.block(&if_stmt.body);
        match &if_stmt.else_branch {
            None => {}
            Some(ElseBranch::If(nested)) => {
                self.output.push_str(" else ");
                self.if_stmt(nested);
            }
            Some(ElseBranch::Block(body)) => {
                self.output.push_str(" else ");
                self.block(body);
            }
        }
    }

    /// `{`, the body one level deeper, then `}` at the current level with no
    /// trailing newline
    fn block(&mut self, body: &[Stmt]) {
        self.output.push_str("{\n");
        self.indent += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push('}');
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Declarations other than functions, without a terminator
fn simple_declaration(decl: &Declaration) -> String {
    match decl {
        Declaration::Var(var) => {
            let mut text = format!("var {} {}", var.names.join(", "), var.ty);
            if !var.values.is_empty() {
                text.push_str(&format!(" = {}", join(&var.values, ", ")));
            }
            text
        }
        Declaration::Const(c) => format!("const {} = {}", c.name, c.value),
        Declaration::Type(t) => format!("type {} {}", t.name, t.ty),
        Declaration::ShortVar(short) => short.to_string(),
        Declaration::Func(func) => format!("func {}", func.name),
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Quote a string or char so the lexer decodes it back to the same value
fn quote(text: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\U{:08x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new().print_program(self))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new();
        printer.declaration(self);
        f.write_str(printer.output.trim_end())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Printer::new().print_stmt(self).trim_end())
    }
}

impl fmt::Display for SimpleStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleStmt::IncDec(stmt) => write!(f, "{}{}", stmt.expr, stmt.op.as_str()),
            SimpleStmt::Assign(assign) => write!(
                f,
                "{} {} {}",
                join(&assign.lhs, ", "),
                assign.op.as_str(),
                join(&assign.rhs, ", ")
            ),
            SimpleStmt::ShortVarDecl(short) => write!(f, "{}", short),
            SimpleStmt::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for ShortVarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.names.join(", "), join(&self.values, ", "))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Function(func) => write!(f, "{}", func),
            Type::Struct(st) => write!(f, "{}", st),
            Type::Array(elem) => write!(f, "[]{}", elem),
            Type::Pointer(inner) => write!(f, "*{}", inner),
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for QualifiedIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}.{}", package, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func({})", join(&self.params, ", "))?;
        if let Some(result) = &self.result {
            write!(f, " {}", result)?;
        }
        Ok(())
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("struct {}");
        }
        write!(f, "struct {{ {} }}", join(&self.fields, "; "))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.names.join(", "), self.ty)
    }
}

impl fmt::Display for NonPointerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonPointerType::Array(elem) => write!(f, "[]{}", elem),
            NonPointerType::Struct(st) => write!(f, "{}", st),
            NonPointerType::Function(func) => write!(f, "{}", func),
            NonPointerType::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for (op, operand) in &self.rest {
            write!(f, " {} {}", op.as_str(), operand)?;
        }
        Ok(())
    }
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.op {
            f.write_str(op.as_str())?;
        }
        write!(f, "{}", self.term)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operand)?;
        for postfix in &self.postfix {
            match postfix {
                Postfix::Selector(name) => write!(f, ".{}", name)?,
                Postfix::Index(index) => write!(f, "[{}]", index)?,
                Postfix::Call(args) => write!(f, "({})", join(args, ", "))?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primary::Literal(lit) => write!(f, "{}", lit),
            Primary::Paren(inner) => write!(f, "({})", inner),
            Primary::Name(name) => write!(f, "{}", name),
            Primary::Conversion(conv) => write!(f, "{}({})", conv.ty, conv.expr),
            Primary::Builtin(call) => write!(f, "{}", call),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Basic(basic) => write!(f, "{}", basic),
            Literal::Composite(composite) => write!(f, "{}", composite),
        }
    }
}

impl fmt::Display for BasicLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicLit::Int(value) => write!(f, "{}", value),
            BasicLit::Bool(value) => write!(f, "{}", value),
            BasicLit::Char(c) => f.write_str(&quote(&c.to_string(), '\'')),
            BasicLit::String(s) => f.write_str(&quote(s, '"')),
        }
    }
}

impl fmt::Display for CompositeLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ty) = &self.ty {
            write!(f, "{}", ty)?;
        }
        write!(f, "{{{}}}", join(&self.elements, ", "))
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Struct(st) => write!(f, "{}", st),
            LiteralType::Array(elem) => write!(f, "[]{}", elem),
            LiteralType::Named(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(ElementKey::Name(name)) => write!(f, "{}: {}", name, self.value),
            Some(ElementKey::Expr(key)) => write!(f, "{}: {}", key, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for BuiltinCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args: Vec<String> = Vec::new();
        if let Some(ty) = &self.ty {
            args.push(ty.to_string());
        }
        args.extend(self.args.iter().map(ToString::to_string));
        write!(f, "{}({})", self.builtin.as_str(), args.join(", "))
    }
}
