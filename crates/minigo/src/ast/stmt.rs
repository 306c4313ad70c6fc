//! Statement AST nodes

use super::{Declaration, Expr, ShortVarDecl};

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var`, `const`, `type` or `:=` inside a body
    Decl(Declaration),

    /// Labeled statement: `label: stmt`
    Labeled(LabeledStmt),

    /// Return statement: `return [expr]`
    Return(Option<Expr>),

    /// Continue statement: `continue [label]`
    Continue(Option<String>),

    /// Goto statement: `goto label`
    Goto(String),

    /// Nested block: `{ ... }`
    Block(Vec<Stmt>),

    If(IfStmt),

    For(ForStmt),

    Simple(SimpleStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: String,
    pub stmt: Box<Stmt>,
}

/// Statements usable inside `if` and `for` headers
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleStmt {
    IncDec(IncDecStmt),
    Assign(Assignment),
    ShortVarDecl(ShortVarDecl),
    Expr(Expr),
}

/// `x++` or `x--`
#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub expr: Expr,
    pub op: IncDecOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

/// `a, b = x, y` or `a += x`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub lhs: Vec<Expr>,
    pub op: AssignOp,
    pub rhs: Vec<Expr>,
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,       // =
    AddAssign,    // +=
    SubAssign,    // -=
    OrAssign,     // |=
    XorAssign,    // ^=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    AndAssign,    // &=
    AndNotAssign, // &^=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::AndAssign => "&=",
            AssignOp::AndNotAssign => "&^=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
        }
    }
}

/// `if [init;] cond { body } [else ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<Box<SimpleStmt>>,
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// `else if ...`
    If(Box<IfStmt>),
    /// `else { ... }`
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub header: ForHeader,
    pub body: Vec<Stmt>,
}

/// The three mutually exclusive loop shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// `for { }`
    Infinite,
    /// `for cond { }`
    Condition(Expr),
    /// `for init; cond; post { }`, every part optional
    Clause(ForClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForClause {
    pub init: Option<Box<SimpleStmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<SimpleStmt>>,
}
