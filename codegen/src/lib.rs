//! The code generator turns the call plans computed by the solver into source text. A [`Gen`]
//! is created for each generation unit, fed every injector of the unit with
//! [`Gen::inject`], and finally framed into a complete output file with [`Gen::frame`].

mod gen;
mod indent;
mod keywords;
mod zero;

pub use gen::Gen;
pub use keywords::is_keyword;
pub use zero::zero_value;

use error::{ErrKind, Error};
use location::SpanTuple;
use providers::SetRef;
use symbol::Symbol;
use types::{TypeCatalog, TypeId};

/// Names which already exist around the generated code, and which generated identifiers must
/// therefore avoid
pub trait ScopeCollisionChecker {
    fn collides(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameters may be unnamed or named `_`, in which case a name is derived from their type
    pub name: Option<Symbol>,
    pub ty: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<TypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injector {
    pub name: Symbol,
    pub location: Option<SpanTuple>,
    pub signature: Signature,
    pub sets: Vec<SetRef>,
}

impl Injector {
    pub fn given(&self) -> Vec<TypeId> {
        self.signature.params.iter().map(|p| p.ty).collect()
    }
}

/// What an injector must produce, once its results have been validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub out: TypeId,
    pub returns_err: bool,
}

/// An injector returns either its output, or its output followed by an `error`
pub fn validate_signature(
    catalog: &TypeCatalog,
    signature: &Signature,
) -> Result<Shape, Error> {
    match signature.results.as_slice() {
        [] => Err(Error::new(ErrKind::Declaration).with_msg(String::from("no return values"))),
        [out] => Ok(Shape {
            out: *out,
            returns_err: false,
        }),
        [out, err] if catalog.is_error(*err) => Ok(Shape {
            out: *out,
            returns_err: true,
        }),
        [_, second] => Err(Error::new(ErrKind::Declaration).with_msg(format!(
            "second return type is {}; must be error",
            catalog.describe(*second)
        ))),
        _ => Err(Error::new(ErrKind::Declaration)
            .with_msg(String::from("too many return values"))),
    }
}
