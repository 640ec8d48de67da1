//! Helps when formatting indentation and keeping track of it

use std::fmt::Display;

/// Keep and print an indentation level, as tabs
#[derive(Default, Copy, Clone)]
pub struct Indent(usize);

impl Indent {
    /// Increment an indent to the next level, returning a new one
    pub fn increment(self) -> Indent {
        Indent(self.0 + 1)
    }
}

impl Display for Indent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", "\t".repeat(self.0))
    }
}
