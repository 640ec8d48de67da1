use std::collections::HashSet;

use error::{ErrKind, Error};
use providers::{Member, ProviderId, ProviderSet, ProviderSetModel, SetRef};
use types::TypeCatalog;

use crate::marks::{Marks, Visit};

/// Name of a set as shown in diagnostics, always qualified by its scope's name
pub(crate) fn set_name(catalog: &TypeCatalog, set: &SetRef) -> String {
    format!("{}.{}", catalog.scope(set.scope).name, set.name)
}

fn unknown_set(catalog: &TypeCatalog, set: &SetRef, from: Option<&ProviderSet>) -> Error {
    let err = Error::new(ErrKind::Declaration)
        .with_msg(format!("unknown provider set `{}`", set_name(catalog, set)));

    match from {
        Some(parent) => err.with_loc(parent.location.clone()).with_hint(
            Error::hint().with_msg(format!(
                "referenced from provider set `{}`",
                set_name(catalog, &parent.set_ref())
            )),
        ),
        None => err,
    }
}

fn set_cycle(catalog: &TypeCatalog, model: &ProviderSetModel, cycle: &[SetRef]) -> Error {
    let path = cycle
        .iter()
        .map(|set| set_name(catalog, set))
        .collect::<Vec<_>>()
        .join(" -> ");

    Error::new(ErrKind::SetCycle)
        .with_msg(format!("provider set cycle: {path}"))
        .with_loc(
            cycle
                .first()
                .and_then(|set| model.set(set))
                .and_then(|set| set.location.clone()),
        )
}

struct Flattener<'a> {
    catalog: &'a TypeCatalog,
    model: &'a ProviderSetModel,
    marks: Marks<SetRef>,
    seen: HashSet<ProviderId>,
    providers: Vec<ProviderId>,
}

impl Flattener<'_> {
    fn visit(&mut self, set: &SetRef, from: Option<&ProviderSet>) -> Result<(), Error> {
        match self.marks.enter(set.clone()) {
            Visit::First => {}
            Visit::Finished => return Ok(()),
            Visit::Cycle(cycle) => return Err(set_cycle(self.catalog, self.model, &cycle)),
        }

        let model = self.model;
        let decl = model
            .set(set)
            .ok_or_else(|| unknown_set(self.catalog, set, from))?;

        for member in decl.members.iter() {
            match member {
                Member::Provider(id) => {
                    if self.seen.insert(*id) {
                        self.providers.push(*id);
                    }
                }
                Member::Set(inner) => self.visit(inner, Some(decl))?,
            }
        }

        self.marks.leave();

        Ok(())
    }
}

/// Flatten the given sets into a single list of providers. Each provider appears once, at the
/// position it was first reached in a depth-first walk of the sets
pub fn flatten(
    catalog: &TypeCatalog,
    model: &ProviderSetModel,
    sets: &[SetRef],
) -> Result<Vec<ProviderId>, Error> {
    let mut flattener = Flattener {
        catalog,
        model,
        marks: Marks::new(),
        seen: HashSet::new(),
        providers: vec![],
    };

    sets.iter()
        .try_for_each(|set| flattener.visit(set, None))?;

    Ok(flattener.providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    use providers::Provider;
    use symbol::Symbol;
    use types::{BasicKind, ScopeId};

    struct Fixture {
        catalog: TypeCatalog,
        model: ProviderSetModel,
        app: ScopeId,
    }

    impl Fixture {
        fn new() -> Fixture {
            let mut catalog = TypeCatalog::new();
            let app = catalog.add_scope("example.com/app", Symbol::from("app"));

            Fixture {
                catalog,
                model: ProviderSetModel::new(),
                app,
            }
        }

        fn provider(&mut self, name: &str) -> ProviderId {
            self.model.add_provider(Provider {
                name: Symbol::from(name),
                scope: self.app,
                location: None,
                params: vec![],
                out: self.catalog.basic(BasicKind::Int),
                fallible: false,
            })
        }

        fn set(&mut self, name: &str, members: Vec<Member>) -> SetRef {
            self.model
                .add_set(ProviderSet {
                    name: Symbol::from(name),
                    scope: self.app,
                    location: None,
                    members,
                })
                .unwrap()
        }

        fn set_ref(&self, name: &str) -> SetRef {
            SetRef {
                scope: self.app,
                name: Symbol::from(name),
            }
        }
    }

    #[test]
    fn nested_sets_are_deduplicated() {
        let mut fx = Fixture::new();
        let a = fx.provider("NewA");
        let b = fx.provider("NewB");
        let c = fx.provider("NewC");

        let inner = fx.set("Inner", vec![Member::Provider(b), Member::Provider(a)]);
        let outer = fx.set(
            "Outer",
            vec![
                Member::Provider(a),
                Member::Set(inner.clone()),
                Member::Provider(c),
            ],
        );

        let flat = flatten(&fx.catalog, &fx.model, &[outer, inner]).unwrap();

        assert_eq!(flat, vec![a, b, c]);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut fx = Fixture::new();
        let a = fx.provider("NewA");

        let shared = fx.set("Shared", vec![Member::Provider(a)]);
        let left = fx.set("Left", vec![Member::Set(shared.clone())]);
        let right = fx.set("Right", vec![Member::Set(shared)]);
        let top = fx.set("Top", vec![Member::Set(left), Member::Set(right)]);

        assert_eq!(flatten(&fx.catalog, &fx.model, &[top]).unwrap(), vec![a]);
    }

    #[test]
    fn set_cycle_lists_sets_in_order() {
        let mut fx = Fixture::new();
        let first = fx.set_ref("First");
        let second = fx.set_ref("Second");

        fx.set("First", vec![Member::Set(second)]);
        fx.set("Second", vec![Member::Set(first.clone())]);

        let err = flatten(&fx.catalog, &fx.model, &[first]).unwrap_err();

        assert_eq!(err.kind(), &ErrKind::SetCycle);
        assert_eq!(
            err.msg(),
            Some("provider set cycle: app.First -> app.Second -> app.First")
        );
    }

    #[test]
    fn unknown_nested_set() {
        let mut fx = Fixture::new();
        let missing = fx.set_ref("Missing");
        let outer = fx.set("Outer", vec![Member::Set(missing)]);

        let err = flatten(&fx.catalog, &fx.model, &[outer]).unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Declaration);
        assert_eq!(err.msg(), Some("unknown provider set `app.Missing`"));
        assert_eq!(err.hints().len(), 1);
    }
}
