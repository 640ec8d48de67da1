//! The location module contains the positions of declarations inside plumb sources. They are
//! created while parsing a declaration file and carried by providers, provider sets and
//! injectors so that the solver and the code generator can point back at the declaration
//! responsible for an error.
//! A declaration is covered by *two* [`Location`]s, a start and an end one, grouped in a
//! [`SpanTuple`] which also remembers the [`Source`] the declaration came from.

use nom_locate::LocatedSpan;

use std::cmp::max;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Eq, PartialEq, Clone)]
enum Column {
    EndOfLine,
    Precise(NonZeroUsize),
}

/// A line and column inside a declaration file. Both start at one.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Location {
    line: NonZeroUsize,
    column: Column,
}

impl Location {
    /// # Panics
    ///
    /// Panics if `line` or `column` is zero
    pub fn new(line: usize, column: usize) -> Location {
        Location {
            line: NonZeroUsize::new(line).expect("lines start at one"),
            column: Column::Precise(NonZeroUsize::new(column).expect("columns start at one")),
        }
    }

    /// # Panics
    ///
    /// Panics if `line` is zero
    pub fn whole_line(line: usize) -> Location {
        Location {
            line: NonZeroUsize::new(line).expect("lines start at one"),
            column: Column::EndOfLine,
        }
    }

    pub fn line(&self) -> usize {
        self.line.get()
    }

    pub fn column(&self) -> usize {
        match self.column {
            Column::Precise(nz) => nz.get(),
            // a whole line starts at its first character
            Column::EndOfLine => 1usize,
        }
    }
}

impl<T: nom::AsBytes, X> From<LocatedSpan<T, X>> for Location {
    fn from(span: LocatedSpan<T, X>) -> Location {
        Location::new(span.location_line() as usize, span.get_column())
    }
}

/// Where a declaration file comes from: a path on disk, an in-memory input (tests, stdin) or
/// nowhere at all for declarations built programmatically. [`Source`] borrows its content and
/// is what the parser threads through its input, while [`SourceOwned`] is kept by the
/// [`SpanTuple`]s that outlive parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source<'s> {
    Path(&'s Path),
    Input(&'s str),
    Empty,
}

/// Same as [`Source`], but owning the values
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOwned {
    Path(PathBuf),
    Input(String),
    Empty,
}

impl Source<'_> {
    fn as_source(&self) -> SourceOwned {
        match self {
            Source::Path(p) => SourceOwned::Path(p.into()),
            Source::Input(i) => SourceOwned::Input(String::from(*i)),
            Source::Empty => SourceOwned::Empty,
        }
    }
}

impl Display for SourceOwned {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SourceOwned::Path(p) => write!(f, "{}", p.display()),
            SourceOwned::Input(_) => write!(f, "<source>"),
            SourceOwned::Empty => write!(f, "<?>"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanTuple {
    source: SourceOwned,
    start: Location,
    end: Location,
}

impl SpanTuple {
    pub fn with_source_ref(source: Source, start: Location, end: Location) -> SpanTuple {
        SpanTuple::with_source(source.as_source(), start, end)
    }

    pub fn with_source(source: SourceOwned, start: Location, end: Location) -> SpanTuple {
        SpanTuple { source, start, end }
    }

    pub fn start(&self) -> &Location {
        &self.start
    }

    pub fn end(&self) -> &Location {
        &self.end
    }

    pub fn source(&self) -> &SourceOwned {
        &self.source
    }

    /// Amount of lines to use when creating before and after context for a [`SpanTuple`]
    const CONTEXT_LINES: usize = 2;

    /// Create the spans surrounding `self`, so that an error can show a few lines of
    /// declarations before and after the offending one. The before context only exists if
    /// there are enough lines above the span. The after context is always returned: lines past
    /// the end of the input are simply skipped when emitting.
    pub fn generate_context(&self) -> (Option<SpanTuple>, SpanTuple) {
        let before_ctx = if self.start().line() > SpanTuple::CONTEXT_LINES + 1 {
            let before_start =
                Location::whole_line(max(self.start().line() - SpanTuple::CONTEXT_LINES, 1));
            let before_end = Location::whole_line(self.start().line() - 1);
            Some(SpanTuple::with_source(
                self.source().clone(),
                before_start,
                before_end,
            ))
        } else {
            None
        };

        let after_start = Location::whole_line(self.end().line() + 1);
        let after_end = Location::whole_line(self.end().line() + SpanTuple::CONTEXT_LINES);
        let after_ctx = SpanTuple::with_source(self.source().clone(), after_start, after_end);

        (before_ctx, after_ctx)
    }

    /// Write the lines covered by the [`SpanTuple`] to stderr, prefixing each of them with
    /// `separator`. Single-line spans are underlined using `repetitor`.
    pub fn emit<T1: Display, T2: Display>(&self, separator: T1, repetitor: T2) {
        let text = self.render(&separator, &repetitor);

        if !text.is_empty() {
            eprintln!("{text}")
        }
    }

    fn format_line<T: Display>(&self, separator: &T, line_number: usize, line: &str) -> String {
        format!("{:5} {separator} {line}", self.start.line() + line_number)
    }

    fn format_free_line<T: Display>(&self, separator: &T, line: &str) -> String {
        format!("      {separator} {line}")
    }

    fn with_path<T1: Display, T2: Display>(
        &self,
        separator: &T1,
        repetitor: &T2,
        path: &Path,
    ) -> String {
        // the declaration file may have been removed since it was parsed, in which case there
        // is no context to show
        match fs::read_to_string(path) {
            Ok(input) => self.with_input(separator, repetitor, &input),
            Err(_) => String::new(),
        }
    }

    fn with_input<T1: Display, T2: Display>(
        &self,
        separator: &T1,
        repetitor: &T2,
        input: &str,
    ) -> String {
        let mut result = String::new();

        if self.start.line() > self.end.line() {
            return result;
        }

        if self.start.line() == self.end.line() && self.start.column() > self.end.column() {
            return result;
        }

        for (i, line) in input.lines().skip(self.start.line() - 1).enumerate() {
            let start_col = match self.start.column {
                Column::EndOfLine => 1,
                // multi-line spans print their whole first line
                Column::Precise(_) if self.start.line() < self.end.line() => 1,
                Column::Precise(nz) => nz.get(),
            };
            let end_col = match self.end.column {
                Column::EndOfLine => line.len(),
                Column::Precise(nz) => nz.get().min(line.len().max(1)),
            };

            if self.start.line() == self.end.line() {
                result.push_str(&self.format_line(separator, i, line));
                result.push('\n');

                let mut underline: String = line
                    .chars()
                    .take(start_col - 1)
                    .map(|c| if c.is_whitespace() { c } else { ' ' })
                    .collect();

                for _ in start_col..end_col {
                    underline.push_str(&repetitor.to_string());
                }

                result.push_str(&self.format_free_line(&' ', &underline));
                break;
            }

            if self.start.line() + i == self.end.line() {
                result.push_str(&self.format_line(separator, i, &line[..end_col]));
                break;
            }

            result.push_str(&self.format_line(separator, i, line));
            result.push('\n');
        }

        result
    }

    fn render<T1: Display, T2: Display>(&self, separator: &T1, repetitor: &T2) -> String {
        match self.source() {
            SourceOwned::Path(path) => self.with_path(separator, repetitor, path),
            SourceOwned::Input(input) => self.with_input(separator, repetitor, input),
            SourceOwned::Empty => String::new(),
        }
    }
}

/// `path:line:column`, pointing at the start of the span
impl Display for SpanTuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}:{}:{}",
            self.source,
            self.start.line(),
            self.start.column()
        )
    }
}
