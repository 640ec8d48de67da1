//! Allocation of the identifiers used in generated code: parameter and local variable names
//! derived from types, and disambiguation of names which are already taken.

use types::{TypeCatalog, TypeId, TypeKind};

/// Turn a potentially exported name into an unexported one by lower-casing its leading
/// upper-case run. The last upper-case letter of the run is kept if it starts a new word:
/// `HTTPServer` becomes `httpServer`
pub fn unexport(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();

    let lowered = match chars.as_slice() {
        [] => 0,
        [first, ..] if !first.is_uppercase() => 0,
        [_, second, ..] if !second.is_uppercase() => 1,
        _ => {
            let mut end = 1;
            while end < chars.len() && chars[end].is_uppercase() {
                if chars.get(end + 1).map_or(false, |c| c.is_lowercase()) {
                    break;
                }
                end += 1;
            }

            end
        }
    };

    chars[..lowered]
        .iter()
        .flat_map(|c| c.to_lowercase())
        .chain(chars[lowered..].iter().copied())
        .collect()
}

/// Invent a variable name for a value of type `ty`, based on the type's name. Pointers are
/// named after the type they point to. Unnamed types have no good name
pub fn type_variable_name(catalog: &TypeCatalog, ty: TypeId) -> Option<String> {
    let ty = match catalog.kind(ty) {
        TypeKind::Pointer(elem) => *elem,
        _ => ty,
    };

    catalog
        .name_of(ty)
        .map(|(_, name)| unexport(name.access()))
}

/// Pick a unique name, preferring `name` if it is free. Otherwise, a number starting at 2 is
/// appended, separated by an underscore when `name` already ends with a digit
pub fn disambiguate<F: FnMut(&str) -> bool>(name: &str, mut collides: F) -> String {
    if !collides(name) {
        return String::from(name);
    }

    let base = match name.ends_with(|c: char| c.is_ascii_digit()) {
        true => format!("{name}_"),
        false => String::from(name),
    };

    (2usize..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !collides(candidate))
        .unwrap_or(base)
}
