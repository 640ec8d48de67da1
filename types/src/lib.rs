//! The type catalog is the read-only view over the types of a plumb unit that the solver and
//! the code generator query. Types live in an arena and are designated by [`TypeId`]s.
//!
//! Unnamed (structural) types are hash-consed: building `*Config` twice yields the same
//! [`TypeId`]. Named types are unique per declaration: `type A int` and `type B int` are two
//! different types even though they share their underlying type. Type identity is therefore
//! simply [`TypeId`] equality, exposed as [`TypeCatalog::identical`].
//!
//! Every type is declared in a [`Scope`] - the package which owns it. The universe scope holds
//! the predeclared types such as `int`, `string` or `error`.

mod basic;

pub use basic::{BasicInfo, BasicKind};

use std::collections::HashMap;

use symbol::Symbol;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeId(u32);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScopeId(u32);

/// A package, identified by its `path` (e.g `example.com/app/db`). The `name` is what code
/// refers to the package by, e.g `db`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub path: String,
    pub name: Symbol,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Field {
    pub name: Symbol,
    pub ty: TypeId,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Method {
    pub name: Symbol,
    /// Always a [`TypeKind::Signature`]
    pub sig: TypeId,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum TypeKind {
    Basic(BasicKind),
    Named { scope: ScopeId, name: Symbol },
    Pointer(TypeId),
    Slice(TypeId),
    Array(u64, TypeId),
    Map(TypeId, TypeId),
    Chan(TypeId),
    Signature {
        params: Vec<TypeId>,
        results: Vec<TypeId>,
    },
    Struct(Vec<Field>),
    Interface(Vec<Method>),
}

#[derive(Debug)]
pub struct TypeCatalog {
    scopes: Vec<Scope>,
    scope_paths: HashMap<String, ScopeId>,
    types: Vec<TypeKind>,
    interned: HashMap<TypeKind, TypeId>,
    named: HashMap<(ScopeId, Symbol), TypeId>,
    // right-hand side of each named type declaration, which may itself be a named type
    declared: HashMap<TypeId, TypeId>,
    universe: ScopeId,
    // the package `unsafe.Pointer` is imported from
    unsafe_scope: ScopeId,
    error: TypeId,
}

impl Default for TypeCatalog {
    fn default() -> TypeCatalog {
        TypeCatalog::new()
    }
}

impl TypeCatalog {
    pub fn new() -> TypeCatalog {
        let mut catalog = TypeCatalog {
            scopes: vec![],
            scope_paths: HashMap::new(),
            types: vec![],
            interned: HashMap::new(),
            named: HashMap::new(),
            declared: HashMap::new(),
            universe: ScopeId(0),
            unsafe_scope: ScopeId(0),
            error: TypeId(0),
        };

        catalog.universe = catalog.add_scope("", Symbol::default());
        catalog.unsafe_scope = catalog.add_scope("unsafe", Symbol::from("unsafe"));

        // basic types are interned first, in declaration order, so that `basic` is a cast
        BasicKind::ALL.iter().for_each(|kind| {
            catalog.intern(TypeKind::Basic(*kind));
        });

        let string = catalog.basic(BasicKind::String);
        let error_sig = catalog.signature(vec![], vec![string]);
        let error_iface = catalog.interface(vec![Method {
            name: Symbol::from("Error"),
            sig: error_sig,
        }]);

        let universe = catalog.universe;
        catalog.error = match catalog.declare_named(universe, Symbol::from("error")) {
            Ok(error) | Err(error) => error,
        };
        catalog.set_underlying(catalog.error, error_iface);

        catalog
    }

    fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(id) = self.interned.get(&kind) {
            return *id;
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(kind.clone());
        self.interned.insert(kind, id);

        id
    }

    /// Get the scope with the given path, creating it if it does not exist yet
    pub fn add_scope(&mut self, path: &str, name: Symbol) -> ScopeId {
        if let Some(id) = self.scope_paths.get(path) {
            return *id;
        }

        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            path: String::from(path),
            name,
        });
        self.scope_paths.insert(String::from(path), id);

        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn lookup_scope(&self, path: &str) -> Option<ScopeId> {
        self.scope_paths.get(path).copied()
    }

    pub fn universe(&self) -> ScopeId {
        self.universe
    }

    pub fn basic(&self, kind: BasicKind) -> TypeId {
        TypeId(kind as u32)
    }

    /// The designated failure outcome type
    pub fn error_type(&self) -> TypeId {
        self.error
    }

    pub fn is_error(&self, ty: TypeId) -> bool {
        self.identical(ty, self.error)
    }

    /// Look up a predeclared type name, including the `byte` and `rune` aliases
    pub fn lookup_universe(&self, name: &str) -> Option<TypeId> {
        match name {
            "byte" => Some(self.basic(BasicKind::Uint8)),
            "rune" => Some(self.basic(BasicKind::Int32)),
            "error" => Some(self.error),
            _ => BasicKind::ALL
                .iter()
                .find(|kind| kind.is_predeclared() && kind.name() == name)
                .map(|kind| self.basic(*kind)),
        }
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Slice(elem))
    }

    pub fn array(&mut self, len: u64, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Array(len, elem))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeKind::Map(key, value))
    }

    pub fn chan(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Chan(elem))
    }

    pub fn signature(&mut self, params: Vec<TypeId>, results: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Signature { params, results })
    }

    pub fn structure(&mut self, fields: Vec<Field>) -> TypeId {
        self.intern(TypeKind::Struct(fields))
    }

    pub fn interface(&mut self, methods: Vec<Method>) -> TypeId {
        self.intern(TypeKind::Interface(methods))
    }

    /// Declare a new named type. If a type with the same name already exists in that scope,
    /// it is returned as an error
    pub fn declare_named(&mut self, scope: ScopeId, name: Symbol) -> Result<TypeId, TypeId> {
        let key = (scope, name);
        if let Some(existing) = self.named.get(&key) {
            return Err(*existing);
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeKind::Named {
            scope,
            name: key.1.clone(),
        });
        self.named.insert(key, id);

        Ok(id)
    }

    /// Set the right-hand side of a named type's declaration. `declared` may be another named
    /// type: the actual underlying type is found by [`TypeCatalog::underlying`]
    pub fn set_underlying(&mut self, named: TypeId, declared: TypeId) {
        self.declared.insert(named, declared);
    }

    pub fn lookup_named(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        self.named.get(&(scope, Symbol::from(name))).copied()
    }

    pub fn kind(&self, ty: TypeId) -> &TypeKind {
        &self.types[ty.0 as usize]
    }

    /// The scope and name of a named type
    pub fn name_of(&self, ty: TypeId) -> Option<(ScopeId, &Symbol)> {
        match self.kind(ty) {
            TypeKind::Named { scope, name } => Some((*scope, name)),
            _ => None,
        }
    }

    /// The underlying type of `ty`, which is never a named type. This returns `None` for named
    /// types whose declaration is missing or refers back to itself, e.g `type A B; type B A`
    pub fn underlying(&self, ty: TypeId) -> Option<TypeId> {
        let mut current = ty;

        // a chain of named types can at most visit every type once
        for _ in 0..=self.types.len() {
            match self.kind(current) {
                TypeKind::Named { .. } => current = *self.declared.get(&current)?,
                _ => return Some(current),
            }
        }

        None
    }

    pub fn identical(&self, lhs: TypeId, rhs: TypeId) -> bool {
        lhs == rhs
    }

    /// Render a type the way it would be spelled in generated code. `qualify` is called for
    /// each scope other than the universe a named type is declared in, and returns the prefix
    /// to use for it: an empty string means the type is written unqualified
    pub fn type_string<F: FnMut(ScopeId) -> String>(&self, ty: TypeId, qualify: &mut F) -> String {
        let mut buf = String::new();
        self.write_type(&mut buf, ty, qualify);

        buf
    }

    /// Render a type for diagnostics, qualifying named types with their scope's name
    pub fn describe(&self, ty: TypeId) -> String {
        self.type_string(ty, &mut |scope| self.scope(scope).name.access().to_owned())
    }

    fn write_type<F: FnMut(ScopeId) -> String>(&self, buf: &mut String, ty: TypeId, qualify: &mut F) {
        match self.kind(ty) {
            TypeKind::Basic(BasicKind::UnsafePointer) => {
                self.write_qualifier(buf, self.unsafe_scope, qualify);
                buf.push_str("Pointer");
            }
            TypeKind::Basic(kind) => buf.push_str(kind.name()),
            TypeKind::Named { scope, name } => {
                self.write_qualifier(buf, *scope, qualify);
                buf.push_str(name.access());
            }
            TypeKind::Pointer(elem) => {
                buf.push('*');
                self.write_type(buf, *elem, qualify);
            }
            TypeKind::Slice(elem) => {
                buf.push_str("[]");
                self.write_type(buf, *elem, qualify);
            }
            TypeKind::Array(len, elem) => {
                buf.push_str(&format!("[{len}]"));
                self.write_type(buf, *elem, qualify);
            }
            TypeKind::Map(key, value) => {
                buf.push_str("map[");
                self.write_type(buf, *key, qualify);
                buf.push(']');
                self.write_type(buf, *value, qualify);
            }
            TypeKind::Chan(elem) => {
                buf.push_str("chan ");
                self.write_type(buf, *elem, qualify);
            }
            TypeKind::Signature { params, results } => {
                buf.push_str("func");
                self.write_signature(buf, params, results, qualify);
            }
            TypeKind::Struct(fields) => {
                buf.push_str("struct{");
                fields.iter().enumerate().for_each(|(i, field)| {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    buf.push_str(field.name.access());
                    buf.push(' ');
                    self.write_type(buf, field.ty, qualify);
                });
                buf.push('}');
            }
            TypeKind::Interface(methods) => {
                buf.push_str("interface{");
                methods.iter().enumerate().for_each(|(i, method)| {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    buf.push_str(method.name.access());
                    match self.kind(method.sig) {
                        TypeKind::Signature { params, results } => {
                            self.write_signature(buf, params, results, qualify)
                        }
                        _ => unreachable!("interface method without a signature - catalog bug"),
                    }
                });
                buf.push('}');
            }
        }
    }

    fn write_qualifier<F: FnMut(ScopeId) -> String>(
        &self,
        buf: &mut String,
        scope: ScopeId,
        qualify: &mut F,
    ) {
        if scope == self.universe {
            return;
        }

        let prefix = qualify(scope);
        if !prefix.is_empty() {
            buf.push_str(&prefix);
            buf.push('.');
        }
    }

    fn write_signature<F: FnMut(ScopeId) -> String>(
        &self,
        buf: &mut String,
        params: &[TypeId],
        results: &[TypeId],
        qualify: &mut F,
    ) {
        buf.push('(');
        self.write_list(buf, params, qualify);
        buf.push(')');

        match results {
            [] => {}
            [single] => {
                buf.push(' ');
                self.write_type(buf, *single, qualify);
            }
            many => {
                buf.push_str(" (");
                self.write_list(buf, many, qualify);
                buf.push(')');
            }
        }
    }

    fn write_list<F: FnMut(ScopeId) -> String>(&self, buf: &mut String, tys: &[TypeId], qualify: &mut F) {
        tys.iter().enumerate().for_each(|(i, ty)| {
            if i > 0 {
                buf.push_str(", ");
            }
            self.write_type(buf, *ty, qualify);
        });
    }
}
