//! Expression AST nodes
//!
//! Expressions keep the shape of the precedence grammar: every tier is a
//! [`Chain`] holding a base operand of the next tighter tier followed by
//! `(operator, operand)` pairs. A chain with no pairs passes its base through,
//! so `x` is a chain of single-element chains down to a [`Term`].

use super::{NonPointerType, QualifiedIdent, StructType, Type};

/// One precedence tier: `base (op operand)*`, left-associative
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<T> {
    pub base: T,
    pub rest: Vec<(BinaryOp, T)>,
}

impl<T> Chain<T> {
    pub fn new(base: T) -> Self {
        Self {
            base,
            rest: Vec::new(),
        }
    }

    /// True when no operator appears at this tier
    pub fn is_pass_through(&self) -> bool {
        self.rest.is_empty()
    }

    /// Operators at this tier in source order
    pub fn operators(&self) -> impl Iterator<Item = BinaryOp> + '_ {
        self.rest.iter().map(|(op, _)| *op)
    }
}

/// Logical-or tier, the root of every expression
pub type Expr = Chain<AndExpr>;
/// Logical-and tier
pub type AndExpr = Chain<RelExpr>;
/// Equality and relational tier
pub type RelExpr = Chain<AddExpr>;
/// Additive tier
pub type AddExpr = Chain<MulExpr>;
/// Multiplicative tier
pub type MulExpr = Chain<UnaryExpr>;

impl Expr {
    /// Wrap a unary expression in pass-through tiers
    pub fn from_unary(unary: UnaryExpr) -> Self {
        Chain::new(Chain::new(Chain::new(Chain::new(Chain::new(unary)))))
    }

    pub fn from_primary(primary: Primary) -> Self {
        Self::from_unary(UnaryExpr::new(None, Term::new(primary)))
    }

    /// The unary expression this expression reduces to, if every tier is a
    /// pass-through
    pub fn as_unary(&self) -> Option<&UnaryExpr> {
        if !self.is_pass_through() {
            return None;
        }
        let and = &self.base;
        if !and.is_pass_through() {
            return None;
        }
        let rel = &and.base;
        if !rel.is_pass_through() {
            return None;
        }
        let add = &rel.base;
        if !add.is_pass_through() {
            return None;
        }
        let mul = &add.base;
        if !mul.is_pass_through() {
            return None;
        }
        Some(&mul.base)
    }

    /// The term this expression reduces to when it has neither binary nor
    /// unary operators
    pub fn as_term(&self) -> Option<&Term> {
        self.as_unary()
            .filter(|unary| unary.op.is_none())
            .map(|unary| &unary.term)
    }
}

/// At most one prefix operator applied to a term
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Option<UnaryOp>,
    pub term: Term,
}

impl UnaryExpr {
    pub fn new(op: Option<UnaryOp>, term: Term) -> Self {
        Self { op, term }
    }
}

/// Primary operand followed by selectors, indexes and calls, applied left to
/// right: `a.b[c](d)` is `a` then `.b`, `[c]`, `(d)`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub operand: Primary,
    pub postfix: Vec<Postfix>,
}

impl Term {
    pub fn new(operand: Primary) -> Self {
        Self {
            operand,
            postfix: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Postfix {
    /// `.name`
    Selector(String),
    /// `[expr]`
    Index(Expr),
    /// `(args)`
    Call(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Literal(Literal),
    /// `(expr)`
    Paren(Box<Expr>),
    /// `x` or `pkg.x`
    Name(QualifiedIdent),
    /// `[]byte(s)`, `(*T)(p)`
    Conversion(Conversion),
    Builtin(BuiltinCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub ty: NonPointerType,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Basic(BasicLit),
    Composite(CompositeLit),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BasicLit {
    Int(i64),
    Bool(bool),
    Char(char),
    String(String),
}

/// `T{elements}`; the type is elided only for literals nested as element
/// values, e.g. the inner braces of `[][]int{{1}, {2}}`
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub ty: Option<LiteralType>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    Struct(StructType),
    Array(Box<Type>),
    Named(QualifiedIdent),
}

/// `[key:] value`
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub key: Option<ElementKey>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKey {
    /// Field name: `{x: 1}`
    Name(String),
    /// Arbitrary key expression: `{0: a, n + 1: b}`
    Expr(Expr),
}

/// Call of a builtin whose name is a keyword: `new(T)`, `delete(m, k)`,
/// `panic("boom")`
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinCall {
    pub builtin: Builtin,
    pub ty: Option<Type>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    New,
    Delete,
    Panic,
}

impl Builtin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Builtin::New => "new",
            Builtin::Delete => "delete",
            Builtin::Panic => "panic",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Logical
    LogOr,
    LogAnd,

    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,

    // Additive
    Add,
    Sub,
    BitOr,
    BitXor,

    // Multiplicative
    Mul,
    Div,
    Mod,
    BitAnd,
    Shl,
    Shr,
    AndNot,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::AndNot => "&^",
        }
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,   // +x
    Neg,    // -x
    Not,    // !x
    BitNot, // ^x
    Deref,  // *p
    AddrOf, // &x
    Recv,   // <-ch
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "^",
            UnaryOp::Deref => "*",
            UnaryOp::AddrOf => "&",
            UnaryOp::Recv => "<-",
        }
    }
}
