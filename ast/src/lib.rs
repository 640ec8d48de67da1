//! Abstract Syntax Tree representation of plumb declaration files

use location::SpanTuple;
use symbol::Symbol;

/// A possibly qualified name, such as `Config` or `db.Conn`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Name of the scope the path refers to, if it is not the current one
    pub scope: Option<Symbol>,
    pub name: Symbol,
    pub location: SpanTuple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Symbol,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: Symbol,
    pub params: Vec<Type>,
    pub results: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Named(Path),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(u64, Box<Type>),
    Map(Box<Type>, Box<Type>),
    Chan(Box<Type>),
    Func {
        params: Vec<Type>,
        results: Vec<Type>,
    },
    Struct(Vec<Field>),
    Interface(Vec<Method>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub location: SpanTuple,
}

/// A parameter of an injector. Its name is optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<Symbol>,
    pub ty: Type,
}

/// A statement inside an injector's body, such as `use App;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: Symbol,
    pub args: Vec<Path>,
    pub location: SpanTuple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `package app "example.com/app";`
    Package { name: Symbol, path: String },
    /// `import db "example.com/db";`
    Import { name: Symbol, path: String },
    /// `type Config struct { Name string; };`
    TypeDecl { name: Path, ty: Type },
    /// `var logger;`
    Var(Symbol),
    /// `func helper;`
    Func(Symbol),
    /// `provider db.Open(*Config) (*db.Conn, error);`
    Provider {
        name: Path,
        params: Vec<Type>,
        results: Vec<Type>,
    },
    /// `set App = NewConfig, db.Set;`
    Set { name: Path, members: Vec<Path> },
    /// `inject Init(cfg *Config) (*db.Conn, error) { use App; }`
    Inject {
        name: Symbol,
        params: Vec<Param>,
        results: Vec<Type>,
        directives: Vec<Directive>,
    },
}

/// The [`Ast`] structure is a wrapper around the [`Node`] sum type, which contains
/// extra information such as the node's location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub location: SpanTuple,
    pub node: Node,
}
