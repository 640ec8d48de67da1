//! Token parser functions are used to define and recognize the particular tokens of
//! the language, so that `set App = db.Set;` gets recognized into SET ID EQUAL ID DOT ID
//! SEMICOLON and so on. This module consists of a lot of uninteresting helper/wrapper functions

use nom::{
    branch::alt, bytes::complete::tag, bytes::complete::take_until, bytes::complete::take_while,
    bytes::complete::take_while1, character::complete::char,
};

use error::Error;

use super::{error_at, ParseInput, ParseResult};

/// Reserved Keywords of declaration files
const RESERVED_KEYWORDS: &[&str] = &[
    "package",
    "import",
    "type",
    "var",
    "func",
    "provider",
    "set",
    "inject",
    "map",
    "chan",
    "struct",
    "interface",
];

/// Function used to recognize a specific character such as '[' or '>'. A function
/// calling this is specifically trying to recognize the given character
fn specific_char(input: ParseInput, character: char) -> ParseResult<ParseInput, char> {
    char::<ParseInput, Error>(character)(input)
}

/// Function used to recognize a specific string token such as "provider" or "set"
/// When a function calls specific_token(_, "token"), that means it's trying to
/// recognize specifically the word "token".
fn specific_token<'tok>(
    input: ParseInput<'tok>,
    token: &'tok str,
) -> ParseResult<ParseInput<'tok>, ParseInput<'tok>> {
    let (input, tag) = tag(token)(input)?;

    if let Some(next_char) = input.chars().next() {
        if next_char.is_alphanumeric() || next_char == '_' {
            return Err(error_at(
                input,
                format!("unexpected character `{next_char}` after `{token}`"),
            ));
        }
    }

    Ok((input, tag))
}

pub fn double_quote(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '"')
}

pub fn equal(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '=')
}

pub fn comma(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, ',')
}

pub fn dot(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '.')
}

pub fn star(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '*')
}

pub fn semicolon(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, ';')
}

pub fn left_curly_bracket(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '{')
}

pub fn right_curly_bracket(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '}')
}

pub fn left_bracket(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '[')
}

pub fn right_bracket(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, ']')
}

pub fn left_parenthesis(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, '(')
}

pub fn right_parenthesis(input: ParseInput) -> ParseResult<ParseInput, char> {
    specific_char(input, ')')
}

pub fn package_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "package")
}

pub fn import_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "import")
}

pub fn type_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "type")
}

pub fn var_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "var")
}

pub fn func_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "func")
}

pub fn provider_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "provider")
}

pub fn set_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "set")
}

pub fn inject_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "inject")
}

pub fn map_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "map")
}

pub fn chan_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "chan")
}

pub fn struct_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "struct")
}

pub fn interface_tok(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    specific_token(input, "interface")
}

pub fn comment_multi_start(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    tag("/*")(input)
}

pub fn comment_multi_end(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    tag("*/")(input)
}

pub fn comment_single(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    tag("//")(input)
}

pub fn identifier(input: ParseInput) -> ParseResult<ParseInput, String> {
    let (rest, id) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;

    if RESERVED_KEYWORDS.contains(id.fragment()) {
        return Err(error_at(
            input,
            format!("identifier cannot be keyword `{}`", id.fragment()),
        ));
    }

    if id.fragment().starts_with(|c: char| c.is_ascii_digit()) {
        return Err(error_at(
            input,
            format!("invalid identifier `{}`", id.fragment()),
        ));
    }

    Ok((rest, id.fragment().to_string()))
}

fn non_neg_num(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    take_while1(|c: char| c.is_ascii_digit())(input)
}

pub fn int_constant(input: ParseInput) -> ParseResult<ParseInput, u64> {
    let (rest, num) = non_neg_num(input)?;

    match num.fragment().parse::<u64>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(error_at(
            input,
            format!("invalid integer: {}", num.fragment()),
        )),
    }
}

/// Parse a string constant and return what is inside the quotes. Strings cannot span
/// multiple lines
pub fn string_constant(input: ParseInput) -> ParseResult<ParseInput, String> {
    let (input, _) = double_quote(input)?;
    let (input, content) = take_while(|c| c != '"' && c != '\n')(input)?;
    let (input, _) = double_quote(input)?;

    Ok((input, content.fragment().to_string()))
}

#[inline(always)]
pub fn consume_multi_comment(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    let (input, _) = comment_multi_start(input)?;
    let (input, content) = take_until("*/")(input)?;
    let (input, _) = comment_multi_end(input)?;

    Ok((input, content))
}

#[inline(always)]
pub fn consume_single_comment(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    let (input, _) = comment_single(input)?;
    let comment = take_while(|c| c != '\n' && c != '\0')(input)?;

    Ok(comment)
}

/// Consumes all kinds of comments: Multi-line or single-line
pub fn consume_comment(input: ParseInput) -> ParseResult<ParseInput, ParseInput> {
    alt((consume_single_comment, consume_multi_comment))(input)
}
