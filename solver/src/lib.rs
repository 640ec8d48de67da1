//! The solver decides how to build an injector's output type out of the inputs it is given and
//! the providers of the sets it uses. It produces a [`CallPlan`]: the ordered list of provider
//! calls to perform, where each argument is either one of the injector's inputs or the result
//! of an earlier call.
//!
//! Solving happens in three steps:
//!
//! 1. The referenced provider sets are flattened into a list of candidate providers
//! 2. Every given input and candidate provider is bound to the type it supplies. A type supplied
//!    twice is a conflict, even if nothing ends up needing it
//! 3. The goal is resolved depth-first, resolving each provider's parameters before appending
//!    the call to the provider itself

pub mod marks;
mod sets;

pub use sets::flatten;

use std::collections::HashMap;

use error::{log, ErrKind, Error};
use providers::{ProviderId, ProviderSetModel, SetRef};
use symbol::Symbol;
use types::{ScopeId, TypeCatalog, TypeId};

use marks::{Marks, Visit};

/// Where the value passed as an argument comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// The injector's parameter at this index
    Given(usize),
    /// The result of the call at this index in the plan
    Call(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub provider: ProviderId,
    pub scope: ScopeId,
    pub name: Symbol,
    pub out: TypeId,
    pub fallible: bool,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallPlan {
    pub calls: Vec<Call>,
}

impl CallPlan {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// What supplies a value of a given type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Given(usize),
    Provider(ProviderId),
}

fn describe_binding(model: &ProviderSetModel, binding: Binding) -> String {
    match binding {
        Binding::Given(idx) => format!("injector parameter {idx}"),
        Binding::Provider(id) => format!("provider `{}`", model.provider(id).name),
    }
}

fn binding_hint(model: &ProviderSetModel, binding: Binding) -> Option<Error> {
    match binding {
        Binding::Given(_) => None,
        Binding::Provider(id) => {
            let provider = model.provider(id);

            Some(
                Error::hint()
                    .with_msg(format!("`{}` is declared here", provider.name))
                    .with_loc(provider.location.clone()),
            )
        }
    }
}

fn conflict(
    catalog: &TypeCatalog,
    model: &ProviderSetModel,
    ty: TypeId,
    first: Binding,
    second: Binding,
) -> Error {
    let err = Error::new(ErrKind::Conflict).with_msg(format!(
        "multiple bindings for {}: {} and {}",
        catalog.describe(ty),
        describe_binding(model, first),
        describe_binding(model, second),
    ));

    [first, second]
        .into_iter()
        .filter_map(|binding| binding_hint(model, binding))
        .fold(err, |err, hint| err.with_hint(hint))
}

/// Map every type to the single input or provider supplying it. Givens are bound first, then
/// providers in flattened order
fn bind(
    catalog: &TypeCatalog,
    model: &ProviderSetModel,
    given: &[TypeId],
    candidates: &[ProviderId],
) -> Result<HashMap<TypeId, Binding>, Error> {
    let mut bindings = HashMap::new();
    let mut errs = vec![];

    let sources = given
        .iter()
        .enumerate()
        .map(|(idx, ty)| (*ty, Binding::Given(idx)))
        .chain(
            candidates
                .iter()
                .map(|id| (model.provider(*id).out, Binding::Provider(*id))),
        );

    for (ty, binding) in sources {
        match bindings.get(&ty) {
            Some(first) => errs.push(conflict(catalog, model, ty, *first, binding)),
            None => {
                bindings.insert(ty, binding);
            }
        }
    }

    match errs.is_empty() {
        true => Ok(bindings),
        false => Err(Error::multiple(errs)),
    }
}

fn type_path(catalog: &TypeCatalog, tys: &[TypeId]) -> String {
    tys.iter()
        .map(|ty| catalog.describe(*ty))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn unresolved(catalog: &TypeCatalog, ty: TypeId, chain: &[TypeId]) -> Error {
    let err = Error::new(ErrKind::Unresolved)
        .with_msg(format!("no provider found for {}", catalog.describe(ty)));

    match chain.len() {
        // the goal itself is missing
        0 | 1 => err,
        _ => err.with_hint(Error::hint().with_msg(format!(
            "needed by {}",
            type_path(catalog, chain)
        ))),
    }
}

fn dependency_cycle(catalog: &TypeCatalog, cycle: &[TypeId]) -> Error {
    Error::new(ErrKind::DependencyCycle)
        .with_msg(format!("dependency cycle: {}", type_path(catalog, cycle)))
}

struct Resolver<'a> {
    catalog: &'a TypeCatalog,
    model: &'a ProviderSetModel,
    bindings: HashMap<TypeId, Binding>,
    marks: Marks<TypeId>,
    resolved: HashMap<TypeId, Arg>,
    calls: Vec<Call>,
}

impl Resolver<'_> {
    fn resolve(&mut self, ty: TypeId) -> Result<Arg, Error> {
        if let Some(arg) = self.resolved.get(&ty) {
            return Ok(*arg);
        }

        if let Visit::Cycle(cycle) = self.marks.enter(ty) {
            return Err(dependency_cycle(self.catalog, &cycle));
        }

        let arg = match self.bindings.get(&ty).copied() {
            None => return Err(unresolved(self.catalog, ty, self.marks.path())),
            Some(Binding::Given(idx)) => Arg::Given(idx),
            Some(Binding::Provider(id)) => {
                let model = self.model;
                let provider = model.provider(id);

                let args = provider
                    .params
                    .iter()
                    .map(|param| self.resolve(*param))
                    .collect::<Result<Vec<_>, Error>>()?;

                log!(
                    solver,
                    "call #{}: `{}` for {}",
                    self.calls.len(),
                    provider.name,
                    self.catalog.describe(ty)
                );

                self.calls.push(Call {
                    provider: id,
                    scope: provider.scope,
                    name: provider.name.clone(),
                    out: provider.out,
                    fallible: provider.fallible,
                    args,
                });

                Arg::Call(self.calls.len() - 1)
            }
        };

        self.marks.leave();
        self.resolved.insert(ty, arg);

        Ok(arg)
    }
}

/// Compute the calls needed to build `goal` out of the `given` types and the providers of
/// `sets`
pub fn solve(
    catalog: &TypeCatalog,
    model: &ProviderSetModel,
    goal: TypeId,
    given: &[TypeId],
    sets: &[SetRef],
) -> Result<CallPlan, Error> {
    let candidates = flatten(catalog, model, sets)?;

    log!(
        solver,
        "{} candidate providers from {} sets",
        candidates.len(),
        sets.len()
    );

    let bindings = bind(catalog, model, given, &candidates)?;

    let mut resolver = Resolver {
        catalog,
        model,
        bindings,
        marks: Marks::new(),
        resolved: HashMap::new(),
        calls: vec![],
    };

    resolver.resolve(goal)?;

    Ok(CallPlan {
        calls: resolver.calls,
    })
}
