use std::collections::BTreeMap;

use error::{log, ErrKind, Error};
use idents::{disambiguate, type_variable_name};
use solver::{Arg, CallPlan};
use symbol::Symbol;
use types::{ScopeId, TypeCatalog, TypeId};

use crate::indent::Indent;
use crate::keywords::is_keyword;
use crate::zero::zero_value;
use crate::{Injector, ScopeCollisionChecker, Shape};

#[derive(Debug, Clone)]
struct Import {
    scope: ScopeId,
    alias: String,
}

/// Generation context of a single unit. It owns the generated injectors and the imports they
/// need. An injector which fails to generate leaves no trace in either
pub struct Gen<'a> {
    catalog: &'a TypeCatalog,
    scope: ScopeId,
    outer: &'a dyn ScopeCollisionChecker,
    buf: String,
    // keyed by scope path, which keeps the import block sorted
    imports: BTreeMap<String, Import>,
}

fn fallible_in_infallible(catalog: &TypeCatalog, out: TypeId) -> Error {
    Error::new(ErrKind::Fallibility).with_msg(format!(
        "provider for {} returns error but injection not allowed to fail",
        catalog.describe(out)
    ))
}

impl<'a> Gen<'a> {
    pub fn new(
        catalog: &'a TypeCatalog,
        scope: ScopeId,
        outer: &'a dyn ScopeCollisionChecker,
    ) -> Gen<'a> {
        Gen {
            catalog,
            scope,
            outer,
            buf: String::new(),
            imports: BTreeMap::new(),
        }
    }

    /// Is `name` already visible at the top level of the generated file
    fn name_in_file_scope(&self, name: &str) -> bool {
        self.imports.values().any(|import| import.alias == name)
            || is_keyword(name)
            || self.outer.collides(name)
    }

    /// The alias to use when referring to something declared in `scope`. The unit's own scope
    /// and the universe need no alias and give an empty string
    fn qualify_scope(&mut self, scope: ScopeId) -> String {
        if scope == self.scope || scope == self.catalog.universe() {
            return String::new();
        }

        let catalog = self.catalog;
        let target = catalog.scope(scope);
        if let Some(import) = self.imports.get(&target.path) {
            return import.alias.clone();
        }

        // an import named `err` would shadow every error check
        let alias = disambiguate(target.name.access(), |name| {
            name == "err" || self.name_in_file_scope(name)
        });

        log!(codegen, "importing \"{}\" as `{}`", target.path, alias);

        self.imports.insert(
            target.path.clone(),
            Import {
                scope,
                alias: alias.clone(),
            },
        );

        alias
    }

    fn type_string(&mut self, ty: TypeId) -> String {
        let catalog = self.catalog;

        catalog.type_string(ty, &mut |scope| self.qualify_scope(scope))
    }

    fn qualified_id(&mut self, scope: ScopeId, name: &Symbol) -> String {
        let alias = self.qualify_scope(scope);

        match alias.is_empty() {
            true => name.to_string(),
            false => format!("{alias}.{name}"),
        }
    }

    /// Emit the body of an injector. `shape` must come from validating the injector's
    /// signature, and `plan` from solving it
    pub fn inject(
        &mut self,
        injector: &Injector,
        shape: &Shape,
        plan: &CallPlan,
    ) -> Result<(), Error> {
        let imports = self.imports.clone();

        match self.injector_text(injector, shape, plan) {
            Ok(text) => {
                if !self.buf.is_empty() {
                    self.buf.push('\n');
                }
                self.buf.push_str(&text);

                log!(
                    codegen,
                    "emitted injector `{}` with {} calls",
                    injector.name,
                    plan.calls.len()
                );

                Ok(())
            }
            Err(e) => {
                self.imports = imports;
                Err(e)
            }
        }
    }

    fn injector_text(
        &mut self,
        injector: &Injector,
        shape: &Shape,
        plan: &CallPlan,
    ) -> Result<String, Error> {
        let catalog = self.catalog;
        let params = &injector.signature.params;

        if !shape.returns_err {
            if let Some(call) = plan.calls.iter().find(|call| call.fallible) {
                return Err(fallible_in_infallible(catalog, call.out));
            }
        }

        // every type is qualified before any variable is named, so that imports get the
        // first pick of names
        let param_types: Vec<_> = params.iter().map(|p| self.type_string(p.ty)).collect();
        plan.calls.iter().for_each(|call| {
            self.qualify_scope(call.scope);
        });
        let out_type = self.type_string(shape.out);
        let zero = zero_value(catalog, shape.out, &mut |scope| self.qualify_scope(scope))?;

        let err_var = disambiguate("err", |name| self.name_in_file_scope(name));

        let declared: Vec<Option<&str>> = params
            .iter()
            .map(|p| {
                p.name
                    .as_ref()
                    .filter(|name| !name.is_blank() && !name.access().is_empty())
                    .map(|name| name.access())
            })
            .collect();

        let mut param_names: Vec<String> = vec![];
        for (idx, param) in params.iter().enumerate() {
            let wanted = declared[idx]
                .map(String::from)
                .or_else(|| type_variable_name(catalog, param.ty))
                .unwrap_or_else(|| String::from("arg"));

            let name = disambiguate(&wanted, |name| {
                name == err_var
                    || param_names.iter().any(|p| p == name)
                    || declared[idx + 1..].iter().flatten().any(|d| *d == name)
                    || self.name_in_file_scope(name)
            });

            param_names.push(name);
        }

        let mut local_names: Vec<String> = vec![];
        for call in plan.calls.iter() {
            let wanted =
                type_variable_name(catalog, call.out).unwrap_or_else(|| String::from("v"));

            let name = disambiguate(&wanted, |name| {
                name == err_var
                    || param_names.iter().any(|p| p == name)
                    || local_names.iter().any(|l| l == name)
                    || self.name_in_file_scope(name)
            });

            local_names.push(name);
        }

        let indent = Indent::default().increment();
        let mut text = format!("func {}(", injector.name);

        text.push_str(
            &param_names
                .iter()
                .zip(param_types.iter())
                .map(|(name, ty)| format!("{name} {ty}"))
                .collect::<Vec<_>>()
                .join(", "),
        );

        match shape.returns_err {
            true => text.push_str(&format!(") ({out_type}, error) {{\n")),
            false => text.push_str(&format!(") {out_type} {{\n")),
        }

        for (call, local) in plan.calls.iter().zip(local_names.iter()) {
            let callee = self.qualified_id(call.scope, &call.name);
            let args = call
                .args
                .iter()
                .map(|arg| match arg {
                    Arg::Given(idx) => param_names[*idx].as_str(),
                    Arg::Call(idx) => local_names[*idx].as_str(),
                })
                .collect::<Vec<_>>()
                .join(", ");

            match call.fallible {
                true => {
                    text.push_str(&format!("{indent}{local}, {err_var} := {callee}({args})\n"));
                    text.push_str(&format!("{indent}if {err_var} != nil {{\n"));
                    text.push_str(&format!(
                        "{}return {zero}, {err_var}\n",
                        indent.increment()
                    ));
                    text.push_str(&format!("{indent}}}\n"));
                }
                false => text.push_str(&format!("{indent}{local} := {callee}({args})\n")),
            }
        }

        let result = match local_names.last() {
            Some(local) => Some(local),
            None => params
                .iter()
                .position(|p| catalog.identical(p.ty, shape.out))
                .map(|idx| &param_names[idx]),
        }
        .ok_or_else(|| {
            Error::new(ErrKind::Internal).with_msg(format!(
                "nothing to return for {}: the plan is empty and no parameter has that type",
                catalog.describe(shape.out)
            ))
        })?;

        match shape.returns_err {
            true => text.push_str(&format!("{indent}return {result}, nil\n}}\n")),
            false => text.push_str(&format!("{indent}return {result}\n}}\n")),
        }

        Ok(text)
    }

    /// Bake the generated injectors into a complete source file. There is nothing to bake if
    /// no injector was generated
    pub fn frame(&self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }

        let mut out = String::from("// Code generated by plumb. DO NOT EDIT.\n\n");
        out.push_str("//+build !plumbinject\n\n");
        out.push_str(&format!(
            "package {}\n\n",
            self.catalog.scope(self.scope).name
        ));

        if !self.imports.is_empty() {
            out.push_str("import (\n");
            self.imports.iter().for_each(|(path, import)| {
                let name = &self.catalog.scope(import.scope).name;

                match name.access() == import.alias {
                    true => out.push_str(&format!("\t{path:?}\n")),
                    false => out.push_str(&format!("\t{} {path:?}\n", import.alias)),
                }
            });
            out.push_str(")\n\n");
        }

        out.push_str(&self.buf);

        Some(out)
    }
}
