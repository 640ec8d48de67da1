//! A `Construct` is a complex set of tokens. For example, `db.Conn` is an identifier, a
//! dot and another identifier. Together, they constitute a qualified path. In the same
//! vein, `set App = NewConfig;` is five tokens used to declare a provider set.
//! Therefore, constructs use tokens while the parser only uses constructs.
//!
//! Each of the functions in that module contain the grammar they represent above their
//! name. The syntax used for the grammar is loosely based on regular instructions and
//! globbing. One can use * to indicate 0 or more, ? to indicate 1 or more, etc etc.
//! Optional parameters are included between brackets. For example,
//!
//! `set <path> = [ <path> ( ',' <path> )* ] ';'`
//!
//! is the grammar for a provider set declaration.

use super::tokens;
use super::{error_at, Error, ParseInput, ParseResult};

use ast::{Ast, Directive, Field, Method, Node, Param, Path, Type, TypeKind};
use location::Location;
use location::SpanTuple;
use nom_locate::position;
use symbol::Symbol;

use nom::{
    character::complete::multispace0, combinator::opt, multi::many0, sequence::pair,
    sequence::preceded,
};

pub(crate) fn pos_to_loc(
    input: ParseInput,
    start: impl Into<Location>,
    end: impl Into<Location>,
) -> SpanTuple {
    SpanTuple::with_source_ref(input.extra, start.into(), end.into())
}

/// Parse as many declarations as possible
/// many_declarations = declaration*
pub fn many_declarations(mut input: ParseInput) -> ParseResult<ParseInput, Vec<Ast>> {
    let mut decls = vec![];
    loop {
        input = next(input);
        if input.is_empty() {
            return Ok((input, decls));
        }
        let (new_input, decl) = declaration(input)?;
        input = new_input;
        decls.push(decl);
    }
}

/// declaration = 'package' package
///             | 'import' import
///             | 'type' type_decl
///             | 'var' IDENTIFIER ';'
///             | 'func' IDENTIFIER ';'
///             | 'provider' provider
///             | 'set' provider_set
///             | 'inject' injector
pub fn declaration(input: ParseInput) -> ParseResult<ParseInput, Ast> {
    let input = next(input);
    let (input, start_loc) = position(input)?;

    if let Ok((input, _)) = tokens::package_tok(input) {
        unit_package(input, start_loc.into())
    } else if let Ok((input, _)) = tokens::import_tok(input) {
        unit_import(input, start_loc.into())
    } else if let Ok((input, _)) = tokens::type_tok(input) {
        unit_type_decl(input, start_loc.into())
    } else if let Ok((input, _)) = tokens::var_tok(input) {
        unit_object(input, start_loc.into(), Node::Var)
    } else if let Ok((input, _)) = tokens::func_tok(input) {
        unit_object(input, start_loc.into(), Node::Func)
    } else if let Ok((input, _)) = tokens::provider_tok(input) {
        unit_provider(input, start_loc.into())
    } else if let Ok((input, _)) = tokens::set_tok(input) {
        unit_set(input, start_loc.into())
    } else if let Ok((input, _)) = tokens::inject_tok(input) {
        unit_inject(input, start_loc.into())
    } else {
        let found = input.fragment().split_whitespace().next().unwrap_or_default();
        Err(error_at(
            input,
            format!("expected a declaration, found `{found}`"),
        ))
    }
}

/// Consume the semicolon ending a declaration and wrap it into an [`Ast`] covering
/// everything up to `end_loc`
fn terminated_decl(
    input: ParseInput,
    start_loc: Location,
    end_loc: Location,
    node: Node,
) -> ParseResult<ParseInput, Ast> {
    let input = next(input);
    let (input, _) = tokens::semicolon(input)?;

    Ok((
        input,
        Ast {
            location: pos_to_loc(input, start_loc, end_loc),
            node,
        },
    ))
}

/// package = spaced_identifier STRING ';'
fn unit_package(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, (name, _)) = spaced_identifier(input)?;
    let (input, path) = tokens::string_constant(input)?;
    let (input, end_loc) = position(input)?;

    let node = Node::Package {
        name: Symbol::from(name),
        path,
    };

    terminated_decl(input, start_loc, end_loc.into(), node)
}

/// import = spaced_identifier STRING ';'
fn unit_import(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, (name, _)) = spaced_identifier(input)?;
    let (input, path) = tokens::string_constant(input)?;
    let (input, end_loc) = position(input)?;

    let node = Node::Import {
        name: Symbol::from(name),
        path,
    };

    terminated_decl(input, start_loc, end_loc.into(), node)
}

/// type_decl = path type ';'
fn unit_type_decl(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, name) = path(input)?;
    let (input, ty) = type_expr(input)?;
    let (input, end_loc) = position(input)?;

    terminated_decl(input, start_loc, end_loc.into(), Node::TypeDecl { name, ty })
}

/// object = spaced_identifier ';'
fn unit_object(
    input: ParseInput,
    start_loc: Location,
    node: impl FnOnce(Symbol) -> Node,
) -> ParseResult<ParseInput, Ast> {
    let (input, (name, (_, end_loc))) = spaced_identifier(input)?;

    terminated_decl(input, start_loc, end_loc, node(Symbol::from(name)))
}

/// provider = path '(' type_list results ';'
fn unit_provider(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, name) = path(input)?;
    let input = next(input);
    let (input, _) = tokens::left_parenthesis(input)?;
    let (input, params) = type_list(input)?;
    let (input, results) = results(input)?;
    let (input, end_loc) = position(input)?;

    let node = Node::Provider {
        name,
        params,
        results,
    };

    terminated_decl(input, start_loc, end_loc.into(), node)
}

/// provider_set = path '=' path_list ';'
fn unit_set(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, name) = path(input)?;
    let input = next(input);
    let (input, _) = tokens::equal(input)?;
    let (input, members) = path_list(input)?;
    let (input, end_loc) = position(input)?;

    terminated_decl(input, start_loc, end_loc.into(), Node::Set { name, members })
}

/// injector = spaced_identifier '(' [ param ( ',' param )* ] ')' results
///            '{' directive* '}' [ ';' ]
fn unit_inject(input: ParseInput, start_loc: Location) -> ParseResult<ParseInput, Ast> {
    let (input, (name, _)) = spaced_identifier(input)?;
    let (input, _) = tokens::left_parenthesis(input)?;
    let (input, params) = params(input)?;
    let (input, results) = results(input)?;
    let input = next(input);
    let (input, _) = tokens::left_curly_bracket(input)?;
    let (input, directives) = directives(input)?;
    let (input, end_loc) = position(input)?;
    let input = next(input);
    let (input, _) = opt(tokens::semicolon)(input)?;

    Ok((
        input,
        Ast {
            location: pos_to_loc(input, start_loc, end_loc),
            node: Node::Inject {
                name: Symbol::from(name),
                params,
                results,
                directives,
            },
        },
    ))
}

/// path = IDENTIFIER [ '.' IDENTIFIER ]
fn path(input: ParseInput) -> ParseResult<ParseInput, Path> {
    let input = next(input);
    let (input, start_loc) = position(input)?;
    let (input, first) = tokens::identifier(input)?;
    let (input, second) = opt(preceded(tokens::dot, tokens::identifier))(input)?;
    let (input, end_loc) = position(input)?;

    let (scope, name) = match second {
        Some(name) => (Some(Symbol::from(first)), name),
        None => (None, first),
    };

    Ok((
        input,
        Path {
            scope,
            name: Symbol::from(name),
            location: pos_to_loc(input, start_loc, end_loc),
        },
    ))
}

/// path_list = [ path ( ',' path )* ]
fn path_list(input: ParseInput) -> ParseResult<ParseInput, Vec<Path>> {
    let input = next(input);
    let (input, first) = match path(input) {
        Ok(res) => res,
        Err(_) => return Ok((input, vec![])),
    };
    let (input, mut paths) = many0(preceded(pair(nom_next, tokens::comma), path))(input)?;

    paths.insert(0, first);

    Ok((input, paths))
}

/// type = '*' type
///      | '[' ']' type
///      | '[' INT ']' type
///      | 'map' '[' type ']' type
///      | 'chan' type
///      | 'func' '(' type_list results
///      | 'struct' '{' field* '}'
///      | 'interface' '{' method* '}'
///      | path
pub fn type_expr(input: ParseInput) -> ParseResult<ParseInput, Type> {
    let input = next(input);
    let (input, start_loc) = position(input)?;

    let (input, kind) = if let Ok((input, _)) = tokens::star(input) {
        let (input, elem) = type_expr(input)?;
        (input, TypeKind::Pointer(Box::new(elem)))
    } else if let Ok((input, _)) = tokens::left_bracket(input) {
        let input = next(input);
        if let Ok((input, _)) = tokens::right_bracket(input) {
            let (input, elem) = type_expr(input)?;
            (input, TypeKind::Slice(Box::new(elem)))
        } else {
            let (input, len) = tokens::int_constant(input)?;
            let input = next(input);
            let (input, _) = tokens::right_bracket(input)?;
            let (input, elem) = type_expr(input)?;
            (input, TypeKind::Array(len, Box::new(elem)))
        }
    } else if let Ok((input, _)) = tokens::map_tok(input) {
        let input = next(input);
        let (input, _) = tokens::left_bracket(input)?;
        let (input, key) = type_expr(input)?;
        let input = next(input);
        let (input, _) = tokens::right_bracket(input)?;
        let (input, value) = type_expr(input)?;
        (input, TypeKind::Map(Box::new(key), Box::new(value)))
    } else if let Ok((input, _)) = tokens::chan_tok(input) {
        let (input, elem) = type_expr(input)?;
        (input, TypeKind::Chan(Box::new(elem)))
    } else if let Ok((input, _)) = tokens::func_tok(input) {
        let input = next(input);
        let (input, _) = tokens::left_parenthesis(input)?;
        let (input, params) = type_list(input)?;
        let (input, results) = results(input)?;
        (input, TypeKind::Func { params, results })
    } else if let Ok((input, _)) = tokens::struct_tok(input) {
        let input = next(input);
        let (input, _) = tokens::left_curly_bracket(input)?;
        let (input, fields) = fields(input)?;
        (input, TypeKind::Struct(fields))
    } else if let Ok((input, _)) = tokens::interface_tok(input) {
        let input = next(input);
        let (input, _) = tokens::left_curly_bracket(input)?;
        let (input, methods) = methods(input)?;
        (input, TypeKind::Interface(methods))
    } else {
        let (input, path) = path(input)?;
        (input, TypeKind::Named(path))
    };

    let (input, end_loc) = position(input)?;

    Ok((
        input,
        Type {
            kind,
            location: pos_to_loc(input, start_loc, end_loc),
        },
    ))
}

/// type_list = [ type ( ',' type )* ] ')'
///
/// The opening parenthesis is consumed by the caller
fn type_list(input: ParseInput) -> ParseResult<ParseInput, Vec<Type>> {
    let input = next(input);
    if let Ok((input, _)) = tokens::right_parenthesis(input) {
        return Ok((input, vec![]));
    }

    let (input, first) = type_expr(input)?;
    let (input, mut types) = many0(preceded(pair(nom_next, tokens::comma), type_expr))(input)?;
    let input = next(input);
    let (input, _) = tokens::right_parenthesis(input)?;

    types.insert(0, first);

    Ok((input, types))
}

/// results = '(' type_list
///         | type
///         | ε
fn results(input: ParseInput) -> ParseResult<ParseInput, Vec<Type>> {
    let input = next(input);
    if let Ok((input, _)) = tokens::left_parenthesis(input) {
        return type_list(input);
    }

    match type_expr(input) {
        Ok((input, ty)) => Ok((input, vec![ty])),
        Err(_) => Ok((input, vec![])),
    }
}

/// field = IDENTIFIER type [ ';' ]
///
/// The opening curly bracket is consumed by the caller
fn fields(input: ParseInput) -> ParseResult<ParseInput, Vec<Field>> {
    let mut input = next(input);
    let mut fields = vec![];
    loop {
        if let Ok((input, _)) = tokens::right_curly_bracket(input) {
            return Ok((input, fields));
        }
        let (new_input, name) = tokens::identifier(input)?;
        let (new_input, ty) = type_expr(new_input)?;
        let new_input = next(new_input);
        let (new_input, _) = opt(tokens::semicolon)(new_input)?;
        input = next(new_input);

        fields.push(Field {
            name: Symbol::from(name),
            ty,
        });
    }
}

/// method = IDENTIFIER '(' type_list results [ ';' ]
///
/// The opening curly bracket is consumed by the caller
fn methods(input: ParseInput) -> ParseResult<ParseInput, Vec<Method>> {
    let mut input = next(input);
    let mut methods = vec![];
    loop {
        if let Ok((input, _)) = tokens::right_curly_bracket(input) {
            return Ok((input, methods));
        }
        let (new_input, (name, _)) = spaced_identifier(input)?;
        let (new_input, _) = tokens::left_parenthesis(new_input)?;
        let (new_input, params) = type_list(new_input)?;
        let (new_input, results) = results(new_input)?;
        let new_input = next(new_input);
        let (new_input, _) = opt(tokens::semicolon)(new_input)?;
        input = next(new_input);

        methods.push(Method {
            name: Symbol::from(name),
            params,
            results,
        });
    }
}

/// params = [ param ( ',' param )* ] ')'
///
/// The opening parenthesis is consumed by the caller
fn params(input: ParseInput) -> ParseResult<ParseInput, Vec<Param>> {
    let input = next(input);
    if let Ok((input, _)) = tokens::right_parenthesis(input) {
        return Ok((input, vec![]));
    }

    let (input, first) = param(input)?;
    let (input, mut params) = many0(preceded(pair(nom_next, tokens::comma), param))(input)?;
    let input = next(input);
    let (input, _) = tokens::right_parenthesis(input)?;

    params.insert(0, first);

    Ok((input, params))
}

/// param = IDENTIFIER type
///       | type
fn param(input: ParseInput) -> ParseResult<ParseInput, Param> {
    let input = next(input);
    if let Ok((after_name, name)) = tokens::identifier(input) {
        if let Ok((input, ty)) = type_expr(after_name) {
            return Ok((
                input,
                Param {
                    name: Some(Symbol::from(name)),
                    ty,
                },
            ));
        }
    }

    let (input, ty) = type_expr(input)?;

    Ok((input, Param { name: None, ty }))
}

/// directives = directive* '}'
///
/// The opening curly bracket is consumed by the caller
fn directives(input: ParseInput) -> ParseResult<ParseInput, Vec<Directive>> {
    let mut input = next(input);
    let mut directives = vec![];
    loop {
        if let Ok((input, _)) = tokens::right_curly_bracket(input) {
            return Ok((input, directives));
        }
        let (new_input, directive) = directive(input)?;
        input = next(new_input);
        directives.push(directive);
    }
}

/// directive = IDENTIFIER path_list ';'
fn directive(input: ParseInput) -> ParseResult<ParseInput, Directive> {
    let input = next(input);
    let (input, start_loc) = position(input)?;
    let (input, name) = tokens::identifier(input)?;
    let (input, args) = path_list(input)?;
    let (input, end_loc) = position(input)?;
    let input = next(input);
    let (input, _) = tokens::semicolon(input)?;

    Ok((
        input,
        Directive {
            name: Symbol::from(name),
            args,
            location: pos_to_loc(input, start_loc, end_loc),
        },
    ))
}

fn spaced_identifier(input: ParseInput) -> ParseResult<ParseInput, (String, (Location, Location))> {
    let input = next(input);
    let (input, start_loc) = position(input)?;
    let (input, id) = tokens::identifier(input)?;
    let (input, end_loc) = position(input)?;
    let input = next(input);

    Ok((input, (id, (start_loc.into(), end_loc.into()))))
}

/// next = extra*
/// extra = WHITESPACE
///       | '/*' [^'*/'] '*/'
///       | '//' [^\n]   '\n'
pub fn next(input: ParseInput) -> ParseInput {
    let input = match multispace0::<_, Error>(input) {
        Ok((input, _)) => input,
        Err(_) => input,
    };
    match tokens::consume_comment(input) {
        Ok((input, _)) => next(input),
        _ => input,
    }
}

fn nom_next(input: ParseInput) -> ParseResult<ParseInput, ()> {
    Ok((next(input), ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    use error::ErrKind;

    fn named(ty: &Type) -> (Option<&str>, &str) {
        match &ty.kind {
            TypeKind::Named(path) => (path.scope.as_ref().map(|s| s.access()), path.name.access()),
            other => panic!("expected a named type, found {other:?}"),
        }
    }

    #[test]
    fn qualified_path() {
        let (input, path) = path(span!("db.Conn rest")).unwrap();

        assert_eq!(*input.fragment(), " rest");
        assert_eq!(path.scope, Some(Symbol::from("db")));
        assert_eq!(path.name, Symbol::from("Conn"));
        assert_eq!(path.location.start(), &Location::new(1, 1));
        assert_eq!(path.location.end(), &Location::new(1, 8));
    }

    #[test]
    fn unqualified_path() {
        let (_, path) = path(span!("Config")).unwrap();

        assert_eq!(path.scope, None);
        assert_eq!(path.name, Symbol::from("Config"));
    }

    #[test]
    fn pointer_to_qualified_type() {
        let (_, ty) = type_expr(span!("*db.Conn")).unwrap();

        match &ty.kind {
            TypeKind::Pointer(elem) => assert_eq!(named(elem), (Some("db"), "Conn")),
            other => panic!("expected a pointer, found {other:?}"),
        }
    }

    #[test]
    fn slices_and_arrays() {
        let (_, slice) = type_expr(span!("[]string")).unwrap();
        let (_, array) = type_expr(span!("[ 4 ]byte")).unwrap();

        assert!(matches!(slice.kind, TypeKind::Slice(_)));
        assert!(matches!(array.kind, TypeKind::Array(4, _)));
    }

    #[test]
    fn map_of_chans() {
        let (_, ty) = type_expr(span!("map[string]chan int")).unwrap();

        match &ty.kind {
            TypeKind::Map(key, value) => {
                assert_eq!(named(key), (None, "string"));
                assert!(matches!(value.kind, TypeKind::Chan(_)));
            }
            other => panic!("expected a map, found {other:?}"),
        }
    }

    #[test]
    fn func_type() {
        let (_, ty) = type_expr(span!("func(int, string) (bool, error)")).unwrap();

        match &ty.kind {
            TypeKind::Func { params, results } => {
                assert_eq!(params.len(), 2);
                assert_eq!(results.len(), 2);
            }
            other => panic!("expected a func, found {other:?}"),
        }
    }

    #[test]
    fn func_type_single_result() {
        let (_, ty) = type_expr(span!("func() int")).unwrap();

        match &ty.kind {
            TypeKind::Func { params, results } => {
                assert!(params.is_empty());
                assert_eq!(results.len(), 1);
            }
            other => panic!("expected a func, found {other:?}"),
        }
    }

    #[test]
    fn struct_type() {
        let (input, ty) = type_expr(span!("struct { Name string; Port int }")).unwrap();

        assert!(input.is_empty());
        match &ty.kind {
            TypeKind::Struct(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].name, Symbol::from("Name"));
                assert_eq!(named(&fields[1].ty), (None, "int"));
            }
            other => panic!("expected a struct, found {other:?}"),
        }
    }

    #[test]
    fn empty_struct_type() {
        let (_, ty) = type_expr(span!("struct{}")).unwrap();

        assert_eq!(ty.kind, TypeKind::Struct(vec![]));
    }

    #[test]
    fn interface_type() {
        let (_, ty) = type_expr(span!("interface { Error() string; Close() }")).unwrap();

        match &ty.kind {
            TypeKind::Interface(methods) => {
                assert_eq!(methods.len(), 2);
                assert_eq!(methods[0].results.len(), 1);
                assert!(methods[1].results.is_empty());
            }
            other => panic!("expected an interface, found {other:?}"),
        }
    }

    #[test]
    fn type_invalid() {
        assert!(type_expr(span!("[x]int")).is_err());
        assert!(type_expr(span!("map[string")).is_err());
        assert!(type_expr(span!("*")).is_err());
    }

    #[test]
    fn package_decl() {
        let (_, decl) = declaration(span!("package app \"example.com/app\";")).unwrap();

        assert_eq!(
            decl.node,
            Node::Package {
                name: Symbol::from("app"),
                path: String::from("example.com/app")
            }
        );
        assert_eq!(decl.location.end(), &Location::new(1, 30));
    }

    #[test]
    fn import_decl() {
        let (_, decl) = declaration(span!("import db \"example.com/db\";")).unwrap();

        assert_eq!(
            decl.node,
            Node::Import {
                name: Symbol::from("db"),
                path: String::from("example.com/db")
            }
        );
    }

    #[test]
    fn var_and_func_decls() {
        let (_, var) = declaration(span!("var logger;")).unwrap();
        let (_, func) = declaration(span!("func helper ;")).unwrap();

        assert_eq!(var.node, Node::Var(Symbol::from("logger")));
        assert_eq!(func.node, Node::Func(Symbol::from("helper")));
    }

    #[test]
    fn type_decl() {
        let (_, decl) = declaration(span!("type db.Conn struct{};")).unwrap();

        match decl.node {
            Node::TypeDecl { name, ty } => {
                assert_eq!(name.scope, Some(Symbol::from("db")));
                assert_eq!(ty.kind, TypeKind::Struct(vec![]));
            }
            other => panic!("expected a type declaration, found {other:?}"),
        }
    }

    #[test]
    fn provider_decl() {
        let (_, decl) =
            declaration(span!("provider db.Open(*Config, Logger) (*db.Conn, error);")).unwrap();

        match decl.node {
            Node::Provider {
                name,
                params,
                results,
            } => {
                assert_eq!(name.scope, Some(Symbol::from("db")));
                assert_eq!(name.name, Symbol::from("Open"));
                assert_eq!(params.len(), 2);
                assert_eq!(results.len(), 2);
                assert_eq!(named(&results[1]), (None, "error"));
            }
            other => panic!("expected a provider, found {other:?}"),
        }
    }

    #[test]
    fn provider_decl_without_results() {
        let (_, decl) = declaration(span!("provider Nothing();")).unwrap();

        match decl.node {
            Node::Provider { results, .. } => assert!(results.is_empty()),
            other => panic!("expected a provider, found {other:?}"),
        }
    }

    #[test]
    fn set_decl() {
        let (_, decl) = declaration(span!("set App = NewConfig, db.Set;")).unwrap();

        match decl.node {
            Node::Set { name, members } => {
                assert_eq!(name.name, Symbol::from("App"));
                assert_eq!(members.len(), 2);
                assert_eq!(members[1].scope, Some(Symbol::from("db")));
            }
            other => panic!("expected a set, found {other:?}"),
        }
    }

    #[test]
    fn empty_set_decl() {
        let (_, decl) = declaration(span!("set Empty = ;")).unwrap();

        match decl.node {
            Node::Set { members, .. } => assert!(members.is_empty()),
            other => panic!("expected a set, found {other:?}"),
        }
    }

    #[test]
    fn inject_decl() {
        let (input, decl) = declaration(span!(
            "inject Init(cfg *Config, Logger) (*db.Conn, error) {
                use App, db.Set;
            }"
        ))
        .unwrap();

        assert!(input.is_empty());
        match decl.node {
            Node::Inject {
                name,
                params,
                results,
                directives,
            } => {
                assert_eq!(name, Symbol::from("Init"));
                assert_eq!(params[0].name, Some(Symbol::from("cfg")));
                assert_eq!(params[1].name, None);
                assert_eq!(named(&params[1].ty), (None, "Logger"));
                assert_eq!(results.len(), 2);
                assert_eq!(directives.len(), 1);
                assert_eq!(directives[0].name, Symbol::from("use"));
                assert_eq!(directives[0].args.len(), 2);
            }
            other => panic!("expected an injector, found {other:?}"),
        }
    }

    #[test]
    fn inject_decl_qualified_unnamed_param() {
        let (_, decl) = declaration(span!("inject Init(db.Conn) int { use App; };")).unwrap();

        match decl.node {
            Node::Inject { params, .. } => {
                assert_eq!(params[0].name, None);
                assert_eq!(named(&params[0].ty), (Some("db"), "Conn"));
            }
            other => panic!("expected an injector, found {other:?}"),
        }
    }

    #[test]
    fn inject_directive_without_args() {
        let (_, decl) = declaration(span!("inject Init() int { bind; }")).unwrap();

        match decl.node {
            Node::Inject { directives, .. } => {
                assert_eq!(directives[0].name, Symbol::from("bind"));
                assert!(directives[0].args.is_empty());
            }
            other => panic!("expected an injector, found {other:?}"),
        }
    }

    #[test]
    fn missing_semicolon() {
        let err: Error = declaration(span!("set App = NewConfig"))
            .unwrap_err()
            .into();

        assert_eq!(err.kind(), &ErrKind::Parsing);
    }

    #[test]
    fn keyword_as_name() {
        assert!(declaration(span!("provider struct();")).is_err());
        assert!(declaration(span!("var map;")).is_err());
    }

    #[test]
    fn unknown_declaration() {
        let err: Error = declaration(span!("  const x = 12;")).unwrap_err().into();

        assert_eq!(err.msg(), Some("expected a declaration, found `const`"));
        assert_eq!(err.loc().unwrap().start(), &Location::new(1, 3));
    }

    #[test]
    fn many_declarations_with_comments() {
        let (input, decls) = many_declarations(span!(
            "// providers
            provider NewConfig() *Config; /* the config */
            set App = NewConfig;"
        ))
        .unwrap();

        assert!(input.is_empty());
        assert_eq!(decls.len(), 2);
    }
}
