//! Type expressions

/// A type as written in source
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `func(int, string) bool`
    Function(FuncType),
    /// `struct { x, y int }`
    Struct(StructType),
    /// `[]T`
    Array(Box<Type>),
    /// `*T`
    Pointer(Box<Type>),
    /// `T` or `pkg.T`, including builtin names like `int`
    Named(QualifiedIdent),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(QualifiedIdent::new(name))
    }

    pub fn pointer_to(inner: Type) -> Self {
        Type::Pointer(Box::new(inner))
    }

    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }
}

/// Identifier with an optional package prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedIdent {
    pub package: Option<String>,
    pub name: String,
}

impl QualifiedIdent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
        }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            name: name.into(),
        }
    }
}

/// Function signature without parameter names
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub result: Option<Box<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: Vec<Field>,
}

/// One or more names sharing a type: `x, y int`
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: Type,
}

impl Field {
    pub fn new(names: Vec<String>, ty: Type) -> Self {
        Self { names, ty }
    }
}

/// The type forms allowed in front of a conversion's parenthesis.
///
/// Pointer types must be parenthesized (`(*T)(x)`), otherwise `*T(x)` would
/// read as a dereference.
#[derive(Debug, Clone, PartialEq)]
pub enum NonPointerType {
    Array(Box<Type>),
    Struct(StructType),
    Function(FuncType),
    Paren(Box<Type>),
}
