//! Symbol crate. A [`Symbol`] is the name of anything declared in a plumb unit: a type, a
//! provider, a provider set, an injector or one of its parameters. Symbols are compared and
//! hashed by content, which makes them usable as keys when building the type catalog and the
//! provider set model.

// FIXME: Switch to an interned representation once symbol comparison shows up in profiles

use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn access(&self) -> &str {
        &self.0
    }

    /// Is this symbol the blank identifier `_`, which never names anything
    pub fn is_blank(&self) -> bool {
        self.0 == "_"
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(String::from(s))
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol(s)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(Symbol::from("Config"));

        assert!(set.contains("Config"));
        assert!(!set.contains("config"));
    }

    #[test]
    fn blank() {
        assert!(Symbol::from("_").is_blank());
        assert!(!Symbol::from("__").is_blank());
    }
}
