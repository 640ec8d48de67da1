use std::collections::HashSet;

use codegen::ScopeCollisionChecker;
use types::BasicKind;

/// Predeclared identifiers which are not type names
const UNIVERSE_OBJECTS: &[&str] = &[
    "error", "byte", "rune", "nil", "true", "false", "iota", "append", "cap", "close", "complex",
    "copy", "delete", "imag", "len", "make", "new", "panic", "print", "println", "real",
    "recover",
];

/// Every identifier visible at the top level of the unit's package: what the unit itself
/// declares, and the predeclared identifiers of the universe
#[derive(Debug, Clone)]
pub struct FileScope {
    names: HashSet<String>,
}

impl Default for FileScope {
    fn default() -> FileScope {
        FileScope::new()
    }
}

impl FileScope {
    pub fn new() -> FileScope {
        let names = BasicKind::ALL
            .iter()
            .filter(|kind| kind.is_predeclared())
            .map(|kind| kind.name())
            .chain(UNIVERSE_OBJECTS.iter().copied())
            .map(String::from)
            .collect();

        FileScope { names }
    }

    pub fn declare(&mut self, name: &str) {
        self.names.insert(String::from(name));
    }
}

impl ScopeCollisionChecker for FileScope {
    fn collides(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_collides() {
        let scope = FileScope::new();

        assert!(scope.collides("string"));
        assert!(scope.collides("error"));
        assert!(scope.collides("len"));
        assert!(scope.collides("nil"));
        assert!(!scope.collides("config"));
    }

    #[test]
    fn untyped_nil_is_not_a_type_name() {
        let scope = FileScope::new();

        assert!(!scope.collides("untyped nil"));
        assert!(!scope.collides("unsafe.Pointer"));
    }

    #[test]
    fn declared_names_collide() {
        let mut scope = FileScope::new();
        scope.declare("logger");

        assert!(scope.collides("logger"));
    }
}
