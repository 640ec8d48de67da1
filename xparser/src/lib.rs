//! The xparser turns plumb declaration files into a list of [`Ast`] declarations. It is
//! built from small nom parsers: the [`tokens`] recognize the words of the language, and
//! the [`constructs`] assemble them into declarations and type expressions.

mod constructs;
mod tokens;

pub use constructs::*;

use ast::Ast;
use error::{ErrKind, Error};
use location::{Source, SpanTuple};

use nom_locate::LocatedSpan;

pub type ParseInput<'i> = LocatedSpan<&'i str, Source<'i>>;
pub type ParseResult<I, T> = nom::IResult<I, T, Error>;

/// Build a parsing error pointing at the current position of `input`
pub(crate) fn error_at(input: ParseInput, msg: String) -> nom::Err<Error> {
    nom::Err::Error(
        Error::new(ErrKind::Parsing)
            .with_msg(msg)
            .with_loc(Some(SpanTuple::with_source_ref(
                input.extra,
                input.into(),
                input.into(),
            ))),
    )
}

/// Parses an entire declaration file
pub fn parse<'i>(input: &'i str, source: Source<'i>) -> Result<Vec<Ast>, Error> {
    let input = LocatedSpan::new_extra(input, source);

    let (_, decls) = constructs::many_declarations(input)?;

    Ok(decls)
}

/// Helpful macro for unit testing the parser
#[cfg(test)]
#[macro_export]
macro_rules! span {
    ($s:literal) => {
        nom_locate::LocatedSpan::new_extra($s, location::Source::Input($s))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use ast::Node;
    use location::Location;

    #[test]
    fn parse_whole_file() {
        let input = r#"
            package app "example.com/app";
            import db "example.com/db";

            type Config struct { Name string; };

            provider NewConfig() *Config;
            provider db.Open(*Config) (*db.Conn, error);

            set App = NewConfig, db.Set;

            inject Init() (*db.Conn, error) {
                use App;
            }
        "#;

        let decls = parse(input, Source::Input(input)).unwrap();

        assert_eq!(decls.len(), 7);
        assert!(matches!(decls[0].node, Node::Package { .. }));
        assert!(matches!(decls[6].node, Node::Inject { .. }));
    }

    #[test]
    fn parse_empty_file() {
        let input = "  // nothing to see here\n";

        assert_eq!(parse(input, Source::Input(input)).unwrap(), vec![]);
    }

    #[test]
    fn parse_error_is_located() {
        let input = "package app \"example.com/app\";\nprovider New() *Config\n";

        let err = parse(input, Source::Input(input)).unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Parsing);
        assert_eq!(err.loc().unwrap().start(), &Location::new(3, 1));
        assert_eq!(err.msg(), Some("unexpected end of input"));
    }

    #[test]
    fn parse_error_on_unknown_declaration() {
        let input = "const x = 12;";

        let err = parse(input, Source::Input(input)).unwrap_err();

        assert_eq!(err.kind(), &ErrKind::Parsing);
        assert_eq!(err.loc().unwrap().start(), &Location::new(1, 1));
    }
}
