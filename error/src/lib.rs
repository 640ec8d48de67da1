//! The Error crate contains the error type shared by every plumb pass: the parser, the
//! front end, the solver and the code generator. Errors are built incrementally with a message,
//! a location and hints, and know how to emit themselves on stderr.

pub mod log;

// re-exported so that the `log!` macro works in crates which do not depend on `colored`
pub use colored;

use std::fmt::{Display, Formatter};
use std::io;

use colored::Colorize;
use nom_locate::LocatedSpan;

use location::{Source, SpanTuple};

#[derive(Debug, PartialEq, Clone)]
pub enum ErrKind {
    Hint,
    Parsing,
    /// Invalid declaration: result shapes, redeclared or unknown names
    Declaration,
    /// A directive which is not allowed where it was written
    Directive,
    SetCycle,
    Conflict,
    Unresolved,
    DependencyCycle,
    /// A fallible provider used by an injector which cannot fail
    Fallibility,
    /// The type catalog broke its contract. This is never caused by user declarations
    Internal,
    Formatting,
    IO,
    Multiple(Vec<Error>),
}

impl ErrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrKind::Hint => "hint",
            ErrKind::Parsing => "parsing",
            ErrKind::Declaration => "declaration",
            ErrKind::Directive => "directive",
            ErrKind::SetCycle => "provider set cycle",
            ErrKind::Conflict => "binding conflict",
            ErrKind::Unresolved => "unresolved dependency",
            ErrKind::DependencyCycle => "dependency cycle",
            ErrKind::Fallibility => "fallible provider",
            ErrKind::Internal => "internal",
            ErrKind::Formatting => "formatting",
            ErrKind::IO => "i/o",
            ErrKind::Multiple(_) => "multiple errors",
        }
    }

    fn code(&self) -> i32 {
        match self {
            ErrKind::Hint => 0,
            ErrKind::Parsing => 1,
            ErrKind::Declaration | ErrKind::Directive => 2,
            ErrKind::SetCycle
            | ErrKind::Conflict
            | ErrKind::Unresolved
            | ErrKind::DependencyCycle
            | ErrKind::Fallibility => 3,
            ErrKind::Formatting => 4,
            ErrKind::IO => 5,
            ErrKind::Internal => 70,
            // the first error decides, which keeps the code stable for a given input
            ErrKind::Multiple(errs) => errs.first().map_or(1, |e| e.kind.code()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    kind: ErrKind,
    msg: Option<String>,
    loc: Option<SpanTuple>,
    hints: Vec<Error>,
}

impl Error {
    pub fn new(kind: ErrKind) -> Error {
        Error {
            kind,
            msg: None,
            loc: None,
            hints: vec![],
        }
    }

    pub fn hint() -> Error {
        Error::new(ErrKind::Hint)
    }

    /// Group multiple errors together. A single error is returned as is, so that callers
    /// accumulating errors do not wrap lone failures
    pub fn multiple(mut errs: Vec<Error>) -> Error {
        match errs.len() {
            1 => errs.remove(0),
            _ => Error::new(ErrKind::Multiple(errs)),
        }
    }

    pub fn with_msg(self, msg: String) -> Error {
        Error {
            msg: Some(msg),
            ..self
        }
    }

    pub fn with_loc(self, loc: Option<SpanTuple>) -> Error {
        Error { loc, ..self }
    }

    // Add a hint to emit alongside the error
    pub fn with_hint(self, hint: Error) -> Error {
        let mut new_hints = self.hints;
        new_hints.push(hint);

        Error {
            hints: new_hints,
            ..self
        }
    }

    /// Prefix the message of this error, and of every error it groups, with `context`. Errors
    /// which do not have a location yet are located at `loc`
    pub fn in_context(self, context: &str, loc: Option<&SpanTuple>) -> Error {
        let Error {
            kind,
            msg,
            loc: own_loc,
            hints,
        } = self;

        match kind {
            ErrKind::Multiple(errs) => Error {
                kind: ErrKind::Multiple(
                    errs.into_iter()
                        .map(|e| e.in_context(context, loc))
                        .collect(),
                ),
                msg,
                loc: own_loc,
                hints,
            },
            kind => Error {
                kind,
                msg: Some(match msg {
                    Some(msg) => format!("{context}: {msg}"),
                    None => String::from(context),
                }),
                loc: own_loc.or_else(|| loc.cloned()),
                hints,
            },
        }
    }

    pub fn kind(&self) -> &ErrKind {
        &self.kind
    }

    pub fn msg(&self) -> Option<&str> {
        self.msg.as_deref()
    }

    pub fn loc(&self) -> Option<&SpanTuple> {
        self.loc.as_ref()
    }

    pub fn hints(&self) -> &[Error] {
        &self.hints
    }

    /// All the non-grouped errors contained in this one, in the order they were reported
    pub fn errors(&self) -> Vec<&Error> {
        match &self.kind {
            ErrKind::Multiple(errs) => errs.iter().flat_map(|e| e.errors()).collect(),
            _ => vec![self],
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.code()
    }

    fn banner(&self) -> colored::ColoredString {
        match self.kind {
            ErrKind::Internal => "internal error".black().on_red(),
            _ => "error".black().on_yellow(),
        }
    }

    fn emit_full_loc(&self, loc: &SpanTuple) {
        let (before_ctx, after_ctx) = loc.generate_context();

        eprintln!(
            "{}: {}: [{}] {}",
            self.banner(),
            loc.to_string().yellow(),
            self.kind.as_str(),
            self.msg.as_deref().unwrap_or_default()
        );
        eprintln!();

        if let Some(ctx) = before_ctx {
            ctx.emit('|', '_')
        };
        loc.emit(">".red().bold(), "^".purple());
        after_ctx.emit('|', '_');
    }

    fn emit_hint(&self) {
        eprintln!();
        eprint!("{}: ", "hint".black().on_green());
        if let Some(loc) = &self.loc {
            eprint!("{}: ", loc.to_string().green());
        }
        if let Some(msg) = &self.msg {
            eprintln!("{msg}");
        }

        if let Some(loc) = &self.loc {
            eprintln!();
            loc.emit("|".green(), "^".green());
        }
    }

    pub fn emit(&self) {
        if let ErrKind::Multiple(errs) = &self.kind {
            if let Some(first) = errs.first() {
                first.emit();
            }
            errs.iter().skip(1).for_each(|e| {
                eprintln!();
                e.emit()
            });

            return;
        }

        match &self.loc {
            Some(loc) => self.emit_full_loc(loc),
            None => eprintln!(
                "{}: [{}] {}",
                self.banner(),
                self.kind.as_str(),
                self.msg.as_deref().unwrap_or_default()
            ),
        }

        self.hints.iter().for_each(|hint| hint.emit_hint());

        if self.kind == ErrKind::Internal {
            eprintln!();
            eprintln!(
                "{}: this is a bug in plumb's type catalog, not in your declarations",
                "note".black().on_white()
            );
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if let ErrKind::Multiple(errs) = &self.kind {
            return errs.iter().enumerate().try_for_each(|(i, e)| match i {
                0 => write!(f, "{e}"),
                _ => write!(f, "\n{e}"),
            });
        }

        write!(f, "{}", self.kind.as_str())?;
        if let Some(msg) = &self.msg {
            write!(f, ": {msg}")?;
        }

        if let Some(loc) = &self.loc {
            write!(
                f,
                " at line {} column {}",
                loc.start().line(),
                loc.start().column()
            )?;
        }

        Ok(())
    }
}

/// I/O errors keep their messages
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::new(ErrKind::IO).with_msg(e.to_string())
    }
}

impl std::error::Error for Error {}

/// The input of the declaration parser
type ParseInput<'i> = LocatedSpan<&'i str, Source<'i>>;

/// Describe where parsing stopped, using the token found there
fn unexpected(span: &ParseInput) -> String {
    match span.fragment().split_whitespace().next() {
        Some(token) => format!("unexpected `{token}`"),
        None => String::from("unexpected end of input"),
    }
}

/// Likewise, if we need to convert from a nom::Err<Error> to an Error.
/// While this pattern may seem weird, nom sometimes requires you to wrap errors in an
/// Error or Failure state in order to specify to parse combinators how to proceed. Thus, we
/// might need to lower the wrapped errors back into our regular errors
impl From<nom::Err<Error>> for Error {
    fn from(e: nom::Err<Error>) -> Error {
        match e {
            nom::Err::Incomplete(_) => {
                Error::new(ErrKind::Parsing).with_msg(String::from("unexpected end of input"))
            }
            nom::Err::Error(inner) | nom::Err::Failure(inner) => inner,
        }
    }
}

impl<'i> nom::error::ParseError<ParseInput<'i>> for Error {
    fn from_error_kind(span: ParseInput<'i>, _: nom::error::ErrorKind) -> Error {
        Error::new(ErrKind::Parsing)
            .with_msg(unexpected(&span))
            .with_loc(Some(SpanTuple::with_source_ref(
                span.extra,
                span.into(),
                span.into(),
            )))
    }

    // the innermost error points closest to the actual mistake, so it is kept
    fn append(_: ParseInput<'i>, _: nom::error::ErrorKind, other: Error) -> Error {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use location::{Location, SourceOwned};

    #[test]
    fn builder() {
        let loc = SpanTuple::with_source(SourceOwned::Empty, Location::new(3, 1), Location::new(3, 9));
        let err = Error::new(ErrKind::Conflict)
            .with_msg(String::from("multiple bindings for Logger"))
            .with_loc(Some(loc.clone()))
            .with_hint(Error::hint().with_msg(String::from("first provider")));

        assert_eq!(err.kind(), &ErrKind::Conflict);
        assert_eq!(err.msg(), Some("multiple bindings for Logger"));
        assert_eq!(err.loc(), Some(&loc));
        assert_eq!(err.hints().len(), 1);
    }

    #[test]
    fn multiple_of_one_is_that_one() {
        let err = Error::multiple(vec![Error::new(ErrKind::Unresolved)]);

        assert_eq!(err.kind(), &ErrKind::Unresolved);
    }

    #[test]
    fn nested_multiple_errors_flatten() {
        let inner = Error::multiple(vec![
            Error::new(ErrKind::Declaration),
            Error::new(ErrKind::Directive),
        ]);
        let err = Error::multiple(vec![inner, Error::new(ErrKind::DependencyCycle)]);

        let kinds: Vec<_> = err.errors().into_iter().map(|e| e.kind().clone()).collect();

        assert_eq!(
            kinds,
            vec![
                ErrKind::Declaration,
                ErrKind::Directive,
                ErrKind::DependencyCycle
            ]
        );
    }

    #[test]
    fn exit_code_follows_first_error() {
        let err = Error::multiple(vec![
            Error::new(ErrKind::Internal),
            Error::new(ErrKind::Parsing),
        ]);

        assert_eq!(err.exit_code(), 70);
        assert_eq!(Error::new(ErrKind::Conflict).exit_code(), 3);
    }

    #[test]
    fn context_reaches_grouped_errors() {
        let loc = SpanTuple::with_source(SourceOwned::Empty, Location::new(7, 1), Location::new(7, 6));
        let located = SpanTuple::with_source(SourceOwned::Empty, Location::new(2, 1), Location::new(2, 6));

        let err = Error::multiple(vec![
            Error::new(ErrKind::Conflict).with_msg(String::from("multiple bindings for Logger")),
            Error::new(ErrKind::SetCycle).with_loc(Some(located.clone())),
        ])
        .in_context("inject Init", Some(&loc));

        let errs = err.errors();

        assert_eq!(errs[0].msg(), Some("inject Init: multiple bindings for Logger"));
        assert_eq!(errs[0].loc(), Some(&loc));
        assert_eq!(errs[1].msg(), Some("inject Init"));
        assert_eq!(errs[1].loc(), Some(&located));
    }

    #[test]
    fn parse_errors_are_located() {
        use nom::error::{ErrorKind, ParseError};

        let input = "provider New() ?;";
        let span = LocatedSpan::new_extra(input, Source::Input(input));
        let (rest, _) = nom::bytes::complete::take::<_, _, Error>(15usize)(span).unwrap();

        let err = Error::from_error_kind(rest, ErrorKind::Tag);

        assert_eq!(err.kind(), &ErrKind::Parsing);
        assert_eq!(err.msg(), Some("unexpected `?;`"));
        assert_eq!(err.loc().unwrap().start(), &Location::new(1, 16));
    }

    #[test]
    fn display() {
        let err = Error::new(ErrKind::Unresolved).with_msg(String::from("no provider found for Db"));

        assert_eq!(
            err.to_string(),
            "unresolved dependency: no provider found for Db"
        );
    }
}
