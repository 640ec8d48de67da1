//! The lowering pass turns the declarations of a plumb file into what the solver and the
//! code generator work on: a [`TypeCatalog`], a [`ProviderSetModel`], the list of
//! [`Injector`]s to generate and the [`FileScope`] generated names must stay clear of.
//!
//! Declarations may refer to each other in any order. Lowering therefore happens in
//! passes: scopes first, then named types, plain identifiers, providers, provider sets and
//! finally injectors. Every error is collected, and the unit is only returned if none
//! occurred.
//!
//! Unqualified names refer to the unit's own package, then to the universe. Qualified names
//! such as `db.Conn` refer to an imported package, or to the unit's package by its name.

mod file_scope;

pub use file_scope::FileScope;

use std::collections::HashMap;

use ast::{Ast, Directive, Node, Path, Type, TypeKind};
use codegen::{Injector, Param, Signature};
use error::{log, ErrKind, Error};
use location::SpanTuple;
use providers::{Member, Provider, ProviderSet, ProviderSetModel, SetRef};
use symbol::Symbol;
use types::{BasicKind, Field, Method, ScopeId, TypeCatalog, TypeId};

/// Everything needed to generate the injectors of one declaration file
#[derive(Debug)]
pub struct Unit {
    pub catalog: TypeCatalog,
    pub model: ProviderSetModel,
    pub scope: ScopeId,
    pub injectors: Vec<Injector>,
    pub file_scope: FileScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Type,
    Provider,
    Set,
    Var,
    Func,
    Inject,
}

impl DeclKind {
    fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Type => "type",
            DeclKind::Provider => "provider",
            DeclKind::Set => "provider set",
            DeclKind::Var => "variable",
            DeclKind::Func => "function",
            DeclKind::Inject => "injector",
        }
    }
}

struct Declared {
    kind: DeclKind,
    location: SpanTuple,
}

fn path_string(path: &Path) -> String {
    match &path.scope {
        Some(scope) => format!("{scope}.{}", path.name),
        None => path.name.to_string(),
    }
}

/// Find the candidate closest to `name`, if it is close enough to be a likely typo
fn suggestion<'c>(name: &str, candidates: impl Iterator<Item = &'c str>) -> Option<Error> {
    candidates
        .filter(|candidate| *candidate != name)
        .map(|candidate| (distance::levenshtein(name, candidate), candidate))
        .filter(|(dist, _)| *dist <= 2 && *dist < name.len())
        .min()
        .map(|(_, candidate)| Error::hint().with_msg(format!("did you mean `{candidate}`?")))
}

fn unknown(what: &str, name: &str, loc: &SpanTuple, hint: Option<Error>) -> Error {
    let err = Error::new(ErrKind::Declaration)
        .with_msg(format!("unknown {what} `{name}`"))
        .with_loc(Some(loc.clone()));

    match hint {
        Some(hint) => err.with_hint(hint),
        None => err,
    }
}

fn redeclared(name: &Symbol, scope: &Symbol, loc: &SpanTuple, previous: &Declared) -> Error {
    Error::new(ErrKind::Declaration)
        .with_msg(format!("`{name}` redeclared in {scope}"))
        .with_loc(Some(loc.clone()))
        .with_hint(
            Error::hint()
                .with_msg(format!(
                    "previously declared as a {} here",
                    previous.kind.as_str()
                ))
                .with_loc(Some(previous.location.clone())),
        )
}

fn wrong_kind(path: &Path, found: DeclKind, expected: &str) -> Error {
    Error::new(ErrKind::Declaration)
        .with_msg(format!(
            "`{}` is a {}, not a {expected}",
            path_string(path),
            found.as_str()
        ))
        .with_loc(Some(path.location.clone()))
}

/// A provider returns its output, optionally followed by an `error`
fn provider_shape(
    catalog: &TypeCatalog,
    name: &Path,
    results: &[TypeId],
) -> Result<(TypeId, bool), Error> {
    let err = |msg: String| {
        Error::new(ErrKind::Declaration)
            .with_msg(msg)
            .with_loc(Some(name.location.clone()))
    };

    match results {
        [] => Err(err(format!(
            "provider `{}` has no results",
            path_string(name)
        ))),
        [out] => Ok((*out, false)),
        [out, second] if catalog.is_error(*second) => Ok((*out, true)),
        [_, second] => Err(err(format!(
            "second result of provider `{}` is {}; must be error",
            path_string(name),
            catalog.describe(*second)
        ))),
        _ => Err(err(format!(
            "provider `{}` has too many results",
            path_string(name)
        ))),
    }
}

struct Lowering {
    catalog: TypeCatalog,
    model: ProviderSetModel,
    unit: ScopeId,
    imports: HashMap<Symbol, (ScopeId, SpanTuple)>,
    declared: HashMap<(ScopeId, Symbol), Declared>,
    file_scope: FileScope,
    injectors: Vec<Injector>,
    errors: Vec<Error>,
}

impl Lowering {
    fn new(name: &Symbol, path: &str, location: &SpanTuple) -> Lowering {
        let mut catalog = TypeCatalog::new();
        let unit = catalog.add_scope(path, name.clone());

        log!(lower, "unit package `{}` (\"{}\")", name, path);

        let mut imports = HashMap::new();
        imports.insert(name.clone(), (unit, location.clone()));

        Lowering {
            catalog,
            model: ProviderSetModel::new(),
            unit,
            imports,
            declared: HashMap::new(),
            file_scope: FileScope::new(),
            injectors: vec![],
            errors: vec![],
        }
    }

    fn report<T>(&mut self, res: Result<T, Error>) -> Option<T> {
        match res {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Record a new name in `scope`. Returns false if the name was already taken
    fn declare(&mut self, scope: ScopeId, name: &Symbol, kind: DeclKind, loc: &SpanTuple) -> bool {
        let key = (scope, name.clone());
        if let Some(previous) = self.declared.get(&key) {
            let err = redeclared(name, &self.catalog.scope(scope).name, loc, previous);
            self.errors.push(err);

            return false;
        }

        self.declared.insert(
            key,
            Declared {
                kind,
                location: loc.clone(),
            },
        );
        if scope == self.unit {
            self.file_scope.declare(name.access());
        }

        true
    }

    fn declared_kind(&self, scope: ScopeId, name: &Symbol) -> Option<DeclKind> {
        self.declared
            .get(&(scope, name.clone()))
            .map(|declared| declared.kind)
    }

    fn candidates<'a>(
        &'a self,
        scope: ScopeId,
        kinds: &'a [DeclKind],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.declared
            .iter()
            .filter(move |((s, _), declared)| *s == scope && kinds.contains(&declared.kind))
            .map(|((_, name), _)| name.access())
    }

    fn resolve_scope(&self, path: &Path) -> Result<ScopeId, Error> {
        match &path.scope {
            None => Ok(self.unit),
            Some(name) => match self.imports.get(name) {
                Some((scope, _)) => Ok(*scope),
                None => {
                    let hint = suggestion(name.access(), self.imports.keys().map(Symbol::access));
                    Err(unknown("package", name.access(), &path.location, hint))
                }
            },
        }
    }

    fn named_type(&self, path: &Path) -> Result<TypeId, Error> {
        let is_unsafe = path.scope.as_ref().map(Symbol::access) == Some("unsafe");
        if is_unsafe && path.name.access() == "Pointer" && !self.imports.contains_key("unsafe") {
            return Ok(self.catalog.basic(BasicKind::UnsafePointer));
        }

        let scope = self.resolve_scope(path)?;
        if let Some(ty) = self.catalog.lookup_named(scope, path.name.access()) {
            return Ok(ty);
        }

        if path.scope.is_none() {
            if let Some(ty) = self.catalog.lookup_universe(path.name.access()) {
                return Ok(ty);
            }
        }

        if let Some(kind) = self.declared_kind(scope, &path.name) {
            return Err(wrong_kind(path, kind, "type"));
        }

        let universe = BasicKind::ALL
            .iter()
            .filter(|kind| kind.is_predeclared())
            .map(|kind| kind.name())
            .chain(["error", "byte", "rune"])
            .filter(|_| path.scope.is_none());
        let hint = suggestion(
            path.name.access(),
            self.candidates(scope, &[DeclKind::Type]).chain(universe),
        );

        Err(unknown("type", &path_string(path), &path.location, hint))
    }

    fn lower_type(&mut self, ty: &Type) -> Result<TypeId, Error> {
        match &ty.kind {
            TypeKind::Named(path) => self.named_type(path),
            TypeKind::Pointer(elem) => {
                let elem = self.lower_type(elem)?;
                Ok(self.catalog.pointer(elem))
            }
            TypeKind::Slice(elem) => {
                let elem = self.lower_type(elem)?;
                Ok(self.catalog.slice(elem))
            }
            TypeKind::Array(len, elem) => {
                let elem = self.lower_type(elem)?;
                Ok(self.catalog.array(*len, elem))
            }
            TypeKind::Map(key, value) => {
                let key = self.lower_type(key)?;
                let value = self.lower_type(value)?;
                Ok(self.catalog.map(key, value))
            }
            TypeKind::Chan(elem) => {
                let elem = self.lower_type(elem)?;
                Ok(self.catalog.chan(elem))
            }
            TypeKind::Func { params, results } => {
                let params = self.lower_types(params)?;
                let results = self.lower_types(results)?;
                Ok(self.catalog.signature(params, results))
            }
            TypeKind::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| {
                        Ok(Field {
                            name: field.name.clone(),
                            ty: self.lower_type(&field.ty)?,
                        })
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(self.catalog.structure(fields))
            }
            TypeKind::Interface(methods) => {
                let methods = methods
                    .iter()
                    .map(|method| {
                        let params = self.lower_types(&method.params)?;
                        let results = self.lower_types(&method.results)?;
                        Ok(Method {
                            name: method.name.clone(),
                            sig: self.catalog.signature(params, results),
                        })
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(self.catalog.interface(methods))
            }
        }
    }

    fn lower_types(&mut self, types: &[Type]) -> Result<Vec<TypeId>, Error> {
        types.iter().map(|ty| self.lower_type(ty)).collect()
    }

    fn imports(&mut self, decls: &[Ast]) {
        decls.iter().for_each(|decl| {
            if let Node::Import { name, path } = &decl.node {
                if let Some((_, previous)) = self.imports.get(name) {
                    let err = Error::new(ErrKind::Declaration)
                        .with_msg(format!("package name `{name}` is already in use"))
                        .with_loc(Some(decl.location.clone()))
                        .with_hint(
                            Error::hint()
                                .with_msg(String::from("previously used here"))
                                .with_loc(Some(previous.clone())),
                        );
                    self.errors.push(err);
                    return;
                }

                let scope = self.catalog.add_scope(path, name.clone());
                log!(lower, "imported package `{}` (\"{}\")", name, path);

                self.imports
                    .insert(name.clone(), (scope, decl.location.clone()));
            }
        })
    }

    fn declare_types<'a>(&mut self, decls: &'a [Ast]) -> Vec<(TypeId, &'a Path, &'a Type)> {
        let mut pending = vec![];

        for decl in decls {
            if let Node::TypeDecl { name, ty } = &decl.node {
                let scope = match self.report(self.resolve_scope(name)) {
                    Some(scope) => scope,
                    None => continue,
                };
                if !self.declare(scope, &name.name, DeclKind::Type, &name.location) {
                    continue;
                }

                match self.catalog.declare_named(scope, name.name.clone()) {
                    Ok(id) => pending.push((id, name, ty)),
                    Err(_) => self.errors.push(
                        Error::new(ErrKind::Declaration)
                            .with_msg(format!("type `{}` redeclared", path_string(name)))
                            .with_loc(Some(name.location.clone())),
                    ),
                }
            }
        }

        pending
    }

    fn define_types(&mut self, pending: Vec<(TypeId, &Path, &Type)>) {
        let mut defined = vec![];
        let mut failed = false;

        for (id, name, ty) in pending {
            let lowered = self.lower_type(ty);
            match self.report(lowered) {
                Some(underlying) => {
                    self.catalog.set_underlying(id, underlying);
                    defined.push((id, name));
                }
                None => failed = true,
            }
        }

        // a type defined from a broken one has no underlying type either
        if failed {
            return;
        }

        defined.into_iter().for_each(|(id, name)| {
            if self.catalog.underlying(id).is_none() {
                self.errors.push(
                    Error::new(ErrKind::Declaration)
                        .with_msg(format!("invalid recursive type `{}`", path_string(name)))
                        .with_loc(Some(name.location.clone())),
                );
            }
        })
    }

    /// Declarations which only contribute names to the unit's scope
    fn objects(&mut self, decls: &[Ast]) {
        let unit = self.unit;

        decls.iter().for_each(|decl| match &decl.node {
            Node::Var(name) => {
                self.declare(unit, name, DeclKind::Var, &decl.location);
            }
            Node::Func(name) => {
                self.declare(unit, name, DeclKind::Func, &decl.location);
            }
            Node::Package { .. } => self.errors.push(
                Error::new(ErrKind::Declaration)
                    .with_msg(String::from("package declared more than once"))
                    .with_loc(Some(decl.location.clone())),
            ),
            _ => {}
        })
    }

    fn providers(&mut self, decls: &[Ast]) {
        for decl in decls {
            if let Node::Provider {
                name,
                params,
                results,
            } = &decl.node
            {
                let scope = match self.report(self.resolve_scope(name)) {
                    Some(scope) => scope,
                    None => continue,
                };
                if !self.declare(scope, &name.name, DeclKind::Provider, &name.location) {
                    continue;
                }

                let signature = self
                    .lower_types(params)
                    .and_then(|params| Ok((params, self.lower_types(results)?)))
                    .and_then(|(params, results)| {
                        Ok((params, provider_shape(&self.catalog, name, &results)?))
                    });

                if let Some((params, (out, fallible))) = self.report(signature) {
                    log!(
                        lower,
                        "provider `{}` of {}",
                        path_string(name),
                        self.catalog.describe(out)
                    );

                    self.model.add_provider(Provider {
                        name: name.name.clone(),
                        scope,
                        location: Some(decl.location.clone()),
                        params,
                        out,
                        fallible,
                    });
                }
            }
        }
    }

    fn declare_sets<'a>(&mut self, decls: &'a [Ast]) -> Vec<(ScopeId, &'a Ast)> {
        let mut pending = vec![];

        for decl in decls {
            if let Node::Set { name, .. } = &decl.node {
                let scope = match self.report(self.resolve_scope(name)) {
                    Some(scope) => scope,
                    None => continue,
                };
                if self.declare(scope, &name.name, DeclKind::Set, &name.location) {
                    pending.push((scope, decl));
                }
            }
        }

        pending
    }

    /// A member of a provider set. Providers which failed to lower were already reported, and
    /// are left out
    fn member(&self, path: &Path) -> Result<Option<Member>, Error> {
        let scope = self.resolve_scope(path)?;

        match self.declared_kind(scope, &path.name) {
            Some(DeclKind::Provider) => Ok(self
                .model
                .lookup_provider(scope, path.name.access())
                .map(Member::Provider)),
            Some(DeclKind::Set) => Ok(Some(Member::Set(SetRef {
                scope,
                name: path.name.clone(),
            }))),
            Some(kind) => Err(wrong_kind(path, kind, "provider or provider set")),
            None => {
                let hint = suggestion(
                    path.name.access(),
                    self.candidates(scope, &[DeclKind::Provider, DeclKind::Set]),
                );
                Err(unknown(
                    "provider or provider set",
                    &path_string(path),
                    &path.location,
                    hint,
                ))
            }
        }
    }

    fn define_sets(&mut self, pending: Vec<(ScopeId, &Ast)>) {
        for (scope, decl) in pending {
            if let Node::Set { name, members } = &decl.node {
                let members = members
                    .iter()
                    .filter_map(|member| {
                        let member = self.member(member);
                        self.report(member).flatten()
                    })
                    .collect();

                let set = ProviderSet {
                    name: name.name.clone(),
                    scope,
                    location: Some(decl.location.clone()),
                    members,
                };
                if let Err(set) = self.model.add_set(set) {
                    self.errors.push(
                        Error::new(ErrKind::Declaration)
                            .with_msg(format!("provider set `{}` redeclared", set.name))
                            .with_loc(set.location),
                    );
                }
            }
        }
    }

    fn set_ref(&self, path: &Path) -> Result<SetRef, Error> {
        let scope = self.resolve_scope(path)?;

        match self.declared_kind(scope, &path.name) {
            Some(DeclKind::Set) => Ok(SetRef {
                scope,
                name: path.name.clone(),
            }),
            Some(kind) => Err(wrong_kind(path, kind, "provider set")),
            None => {
                let hint = suggestion(
                    path.name.access(),
                    self.candidates(scope, &[DeclKind::Set]),
                );
                Err(unknown(
                    "provider set",
                    &path_string(path),
                    &path.location,
                    hint,
                ))
            }
        }
    }

    /// The provider sets an injector uses, from its `use` directives
    fn directives(&mut self, directives: &[Directive]) -> Vec<SetRef> {
        let mut sets = vec![];

        for directive in directives {
            if directive.name.access() != "use" {
                self.errors.push(
                    Error::new(ErrKind::Directive)
                        .with_msg(format!(
                            "cannot use `{}` directive on inject function",
                            directive.name
                        ))
                        .with_loc(Some(directive.location.clone())),
                );
                continue;
            }

            directive.args.iter().for_each(|arg| {
                let set = self.set_ref(arg);
                if let Some(set) = self.report(set) {
                    sets.push(set);
                }
            });
        }

        sets
    }

    fn injectors(&mut self, decls: &[Ast]) {
        let unit = self.unit;

        for decl in decls {
            if let Node::Inject {
                name,
                params,
                results,
                directives,
            } = &decl.node
            {
                if !self.declare(unit, name, DeclKind::Inject, &decl.location) {
                    continue;
                }

                let params = params
                    .iter()
                    .map(|param| {
                        Ok(Param {
                            name: param.name.clone(),
                            ty: self.lower_type(&param.ty)?,
                        })
                    })
                    .collect::<Result<Vec<_>, Error>>();
                let signature = params.and_then(|params| {
                    Ok(Signature {
                        params,
                        results: self.lower_types(results)?,
                    })
                });
                let signature = signature
                    .map_err(|e| e.in_context(&format!("inject {name}"), Some(&decl.location)));
                let sets = self.directives(directives);

                if let Some(signature) = self.report(signature) {
                    log!(lower, "injector `{}` using {} provider set(s)", name, sets.len());

                    self.injectors.push(Injector {
                        name: name.clone(),
                        location: Some(decl.location.clone()),
                        signature,
                        sets,
                    });
                }
            }
        }
    }

    fn finish(self) -> Result<Unit, Error> {
        if !self.errors.is_empty() {
            return Err(Error::multiple(self.errors));
        }

        Ok(Unit {
            catalog: self.catalog,
            model: self.model,
            scope: self.unit,
            injectors: self.injectors,
            file_scope: self.file_scope,
        })
    }
}

/// Lower the declarations of a file. The first declaration must be the file's package
pub fn lower(decls: &[Ast]) -> Result<Unit, Error> {
    let (name, path, location, rest) = match decls.split_first() {
        Some((
            Ast {
                location,
                node: Node::Package { name, path },
            },
            rest,
        )) => (name, path, location, rest),
        Some((first, _)) => {
            return Err(Error::new(ErrKind::Declaration)
                .with_msg(String::from("expected a package declaration first"))
                .with_loc(Some(first.location.clone())))
        }
        None => {
            return Err(Error::new(ErrKind::Declaration)
                .with_msg(String::from("missing package declaration")))
        }
    };

    let mut ctx = Lowering::new(name, path, location);

    ctx.imports(rest);
    let types = ctx.declare_types(rest);
    ctx.define_types(types);
    ctx.objects(rest);
    ctx.providers(rest);
    let sets = ctx.declare_sets(rest);
    ctx.define_sets(sets);
    ctx.injectors(rest);

    ctx.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    use codegen::ScopeCollisionChecker;
    use location::Source;

    fn lower_str(input: &str) -> Result<Unit, Error> {
        let decls = xparser::parse(input, Source::Input(input)).unwrap();

        lower(&decls)
    }

    fn messages(err: &Error) -> Vec<&str> {
        err.errors()
            .into_iter()
            .map(|e| e.msg().unwrap_or_default())
            .collect()
    }

    #[test]
    fn lower_whole_unit() {
        let unit = lower_str(
            r#"
            package app "example.com/app";
            import db "example.com/db";

            type Config struct { Name string; };
            type db.Conn struct{};

            provider NewConfig() *Config;
            provider db.Open(*Config) (*db.Conn, error);

            set db.Set = db.Open;
            set App = NewConfig, db.Set;

            inject Init(cfg *Config) (*db.Conn, error) {
                use App;
            }
            "#,
        )
        .unwrap();

        let catalog = &unit.catalog;
        let db = catalog.lookup_scope("example.com/db").unwrap();
        let conn = catalog.lookup_named(db, "Conn").unwrap();
        let config = catalog.lookup_named(unit.scope, "Config").unwrap();

        assert_eq!(catalog.scope(unit.scope).name, Symbol::from("app"));
        assert_eq!(unit.model.providers().count(), 2);

        let open = unit.model.lookup_provider(db, "Open").unwrap();
        assert!(unit.model.provider(open).fallible);

        let app = unit
            .model
            .set(&SetRef {
                scope: unit.scope,
                name: Symbol::from("App"),
            })
            .unwrap();
        assert_eq!(app.members.len(), 2);

        let init = &unit.injectors[0];
        assert_eq!(init.name, Symbol::from("Init"));
        assert_eq!(init.signature.params[0].name, Some(Symbol::from("cfg")));
        assert_eq!(
            catalog.kind(init.given()[0]),
            &types::TypeKind::Pointer(config)
        );
        assert_eq!(init.signature.results[1], catalog.error_type());
        assert_eq!(catalog.name_of(conn).unwrap().0, db);
        assert_eq!(init.sets, vec![app.set_ref()]);
    }

    #[test]
    fn forward_references() {
        let unit = lower_str(
            r#"
            package app "example.com/app";

            set App = Inner;
            set Inner = NewService;
            provider NewService(Config) Service;
            type Service struct { cfg Config; };
            type Config int;

            inject Init(Config) Service { use App; }
            "#,
        )
        .unwrap();

        ["App", "Inner"].iter().for_each(|name| {
            assert!(unit
                .model
                .set(&SetRef {
                    scope: unit.scope,
                    name: Symbol::from(*name),
                })
                .is_some())
        });
        assert_eq!(unit.injectors.len(), 1);
    }

    #[test]
    fn missing_package() {
        let err = lower_str("provider New() int;").unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Declaration);
        assert_eq!(err.msg(), Some("expected a package declaration first"));
    }

    #[test]
    fn empty_file() {
        let err = lower(&[]).unwrap_err();

        assert_eq!(err.msg(), Some("missing package declaration"));
    }

    #[test]
    fn redeclared_provider() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider New() int;
            provider New() string;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Declaration);
        assert_eq!(err.msg(), Some("`New` redeclared in app"));
        assert_eq!(
            err.hints()[0].msg(),
            Some("previously declared as a provider here")
        );
    }

    #[test]
    fn names_share_one_namespace() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            type Config int;
            var Config;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("`Config` redeclared in app"));
    }

    #[test]
    fn unknown_type_did_you_mean() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            type Config struct{};
            provider New() *Confg;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("unknown type `Confg`"));
        assert_eq!(err.hints()[0].msg(), Some("did you mean `Config`?"));
    }

    #[test]
    fn unknown_type_suggests_universe() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider New() strin;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.hints()[0].msg(), Some("did you mean `string`?"));
    }

    #[test]
    fn unknown_type_far_from_anything() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider New() Completely;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("unknown type `Completely`"));
        assert!(err.hints().is_empty());
    }

    #[test]
    fn unknown_package() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            import db "example.com/db";
            provider New() *dv.Conn;
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("unknown package `dv`"));
        assert_eq!(err.hints()[0].msg(), Some("did you mean `db`?"));
    }

    #[test]
    fn unit_package_qualifies_its_own_names() {
        let unit = lower_str(
            r#"
            package app "example.com/app";
            type Config int;
            provider New() app.Config;
            "#,
        )
        .unwrap();

        let config = unit.catalog.lookup_named(unit.scope, "Config").unwrap();
        let new = unit.model.lookup_provider(unit.scope, "New").unwrap();

        assert_eq!(unit.model.provider(new).out, config);
    }

    #[test]
    fn duplicate_import_name() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            import db "example.com/db";
            import db "example.com/otherdb";
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("package name `db` is already in use"));
    }

    #[test]
    fn unsafe_pointer() {
        let unit = lower_str(
            r#"
            package app "example.com/app";
            provider New() unsafe.Pointer;
            "#,
        )
        .unwrap();

        let new = unit.model.lookup_provider(unit.scope, "New").unwrap();

        assert_eq!(
            unit.model.provider(new).out,
            unit.catalog.basic(BasicKind::UnsafePointer)
        );
    }

    #[test]
    fn recursive_types() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            type A B;
            type B A;
            type C *C;
            "#,
        )
        .unwrap_err();

        assert_eq!(
            messages(&err),
            vec!["invalid recursive type `A`", "invalid recursive type `B`"]
        );
    }

    #[test]
    fn named_types_keep_their_identity() {
        let unit = lower_str(
            r#"
            package app "example.com/app";
            type A int;
            type B int;
            "#,
        )
        .unwrap();

        let a = unit.catalog.lookup_named(unit.scope, "A").unwrap();
        let b = unit.catalog.lookup_named(unit.scope, "B").unwrap();

        assert!(!unit.catalog.identical(a, b));
        assert_eq!(unit.catalog.underlying(a), unit.catalog.underlying(b));
    }

    #[test]
    fn provider_shapes() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider NoResults();
            provider NotError() (int, string);
            provider TooMany() (int, error, error);
            "#,
        )
        .unwrap_err();

        assert_eq!(
            messages(&err),
            vec![
                "provider `NoResults` has no results",
                "second result of provider `NotError` is string; must be error",
                "provider `TooMany` has too many results",
            ]
        );
    }

    #[test]
    fn bad_directive() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            set App = ;
            inject Init() int { bind App; }
            "#,
        )
        .unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Directive);
        assert_eq!(
            err.msg(),
            Some("cannot use `bind` directive on inject function")
        );
    }

    #[test]
    fn use_needs_a_provider_set() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider New() int;
            inject Init() int { use New; }
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("`New` is a provider, not a provider set"));
    }

    #[test]
    fn set_member_is_not_a_type() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            type Config int;
            set App = Config;
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.msg(),
            Some("`Config` is a type, not a provider or provider set")
        );
    }

    #[test]
    fn unknown_set_member_did_you_mean() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider NewConfig() int;
            set App = NewConfg;
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.msg(),
            Some("unknown provider or provider set `NewConfg`")
        );
        assert_eq!(err.hints()[0].msg(), Some("did you mean `NewConfig`?"));
    }

    #[test]
    fn injector_type_errors_name_the_injector() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            inject Init(Missing) int { }
            "#,
        )
        .unwrap_err();

        assert_eq!(err.msg(), Some("inject Init: unknown type `Missing`"));
    }

    #[test]
    fn every_error_is_reported() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            type A Unknown;
            provider New() (int, int);
            set App = Nope;
            inject Init() int { bind; }
            "#,
        )
        .unwrap_err();

        assert_eq!(err.errors().len(), 4);
        assert!(matches!(err.kind(), ErrKind::Multiple(_)));
    }

    #[test]
    fn broken_provider_is_not_reported_twice() {
        let err = lower_str(
            r#"
            package app "example.com/app";
            provider New() Missing;
            set App = New;
            "#,
        )
        .unwrap_err();

        assert_eq!(messages(&err), vec!["unknown type `Missing`"]);
    }

    #[test]
    fn file_scope_holds_unit_names() {
        let unit = lower_str(
            r#"
            package app "example.com/app";
            import db "example.com/db";
            type Config int;
            type db.Conn int;
            var logger;
            func helper;
            provider NewConfig() Config;
            set App = NewConfig;
            inject Init() Config { use App; }
            "#,
        )
        .unwrap();

        ["Config", "logger", "helper", "NewConfig", "App", "Init", "string"]
            .iter()
            .for_each(|name| assert!(unit.file_scope.collides(name), "{name}"));

        assert!(!unit.file_scope.collides("Conn"));
        assert!(!unit.file_scope.collides("db"));
    }
}
