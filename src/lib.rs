//! plumb resolves, at build time, how to construct the values requested by injector
//! declarations out of a set of providers, and generates the straight-line code doing so.
//!
//! A declaration file is [`load`]ed into a [`Unit`], whose injectors are then turned into a
//! single generated source file by [`generate`]. The output can finally be handed to
//! [`format::gofmt`].

pub mod format;

pub use lower::Unit;

use codegen::{validate_signature, Gen};
use error::{log, Error};
use location::Source;

/// Parse and lower a declaration file
pub fn load(input: &str, source: Source) -> Result<Unit, Error> {
    let decls = xparser::parse(input, source)?;

    lower::lower(&decls)
}

/// Generate every injector of `unit` into one source file. Injectors are all attempted, so
/// that every failing one gets reported, but nothing is generated if any of them failed.
/// A unit without injectors generates nothing
pub fn generate(unit: &Unit) -> Result<Option<String>, Error> {
    let mut gen = Gen::new(&unit.catalog, unit.scope, &unit.file_scope);
    let mut errors = vec![];

    for injector in unit.injectors.iter() {
        log!("generating injector `{}`", injector.name);

        let res = validate_signature(&unit.catalog, &injector.signature).and_then(|shape| {
            let plan = solver::solve(
                &unit.catalog,
                &unit.model,
                shape.out,
                &injector.given(),
                &injector.sets,
            )?;

            gen.inject(injector, &shape, &plan)
        });

        if let Err(e) = res {
            errors.push(e.in_context(
                &format!("inject {}", injector.name),
                injector.location.as_ref(),
            ));
        }
    }

    match errors.is_empty() {
        true => Ok(gen.frame()),
        false => Err(Error::multiple(errors)),
    }
}
