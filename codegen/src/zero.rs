use error::{ErrKind, Error};
use types::{BasicInfo, ScopeId, TypeCatalog, TypeId, TypeKind};

fn catalog_bug(catalog: &TypeCatalog, ty: TypeId, what: &str) -> Error {
    Error::new(ErrKind::Internal).with_msg(format!(
        "{} {what}: the type catalog handed out an invalid type",
        catalog.describe(ty)
    ))
}

/// The shortest expression evaluating to the zero value of `ty`. Named types are spelled using
/// `qualify`, the same way [`TypeCatalog::type_string`] does
pub fn zero_value<F: FnMut(ScopeId) -> String>(
    catalog: &TypeCatalog,
    ty: TypeId,
    qualify: &mut F,
) -> Result<String, Error> {
    let underlying = catalog
        .underlying(ty)
        .ok_or_else(|| catalog_bug(catalog, ty, "has no underlying type"))?;

    match catalog.kind(underlying) {
        TypeKind::Array(..) | TypeKind::Struct(_) => {
            Ok(format!("{}{{}}", catalog.type_string(ty, qualify)))
        }
        TypeKind::Basic(kind) => match kind.info() {
            BasicInfo::Boolean => Ok(String::from("false")),
            BasicInfo::Numeric => Ok(String::from("0")),
            BasicInfo::Textual => Ok(String::from("\"\"")),
            BasicInfo::Pointer => Ok(String::from("nil")),
            BasicInfo::Uncategorized => Err(catalog_bug(catalog, ty, "has no zero value")),
        },
        TypeKind::Pointer(_)
        | TypeKind::Slice(_)
        | TypeKind::Map(..)
        | TypeKind::Chan(_)
        | TypeKind::Signature { .. }
        | TypeKind::Interface(_) => Ok(String::from("nil")),
        TypeKind::Named { .. } => Err(catalog_bug(catalog, ty, "has a named underlying type")),
    }
}
