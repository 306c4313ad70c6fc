//! Declaration AST nodes

use super::{Expr, Field, Stmt, Type};

/// Declaration node. Only the binding sites are recorded; nothing here is
/// resolved against a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `var a, b T = x, y`
    Var(VarDecl),
    /// `const N = 10`
    Const(ConstDecl),
    /// `type Point struct { ... }`
    Type(TypeDecl),
    /// `a, b := x, y`
    ShortVar(ShortVarDecl),
    /// `func f(a int) int { ... }` (top level only)
    Func(FuncDecl),
}

/// Variable declaration. The type is mandatory; `values` is empty when
/// there is no initializer and need not match `names` in length.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<String>,
    pub ty: Type,
    pub values: Vec<Expr>,
}

/// Constant declaration, integer literals only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: String,
    pub value: i64,
}

/// Short variable declaration; `names[i]` is bound to `values[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct ShortVarDecl {
    pub names: Vec<String>,
    pub values: Vec<Expr>,
}

impl ShortVarDecl {
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.names.iter().map(String::as_str).zip(&self.values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub ty: Type,
}

/// Function declaration (no receivers)
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Field>,
    pub result: Option<Type>,
    pub body: Vec<Stmt>,
}

impl FuncDecl {
    /// Parameter names in declaration order, flattened across groups
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .flat_map(|group| group.names.iter().map(String::as_str))
    }
}
