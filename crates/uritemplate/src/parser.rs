//! A `nom`-based parser for the RFC 6570 template grammar.
use crate::ast::{Modifier, Operator, Part, VarSpec};
use crate::error::UriTemplateError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, one_of, satisfy, u16 as nom_u16},
    combinator::{map, map_opt, opt, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded},
};

// --- Main Public Parser ---

pub fn parse_template(input: &str) -> Result<Vec<Part>, UriTemplateError> {
    match template(input) {
        Ok(("", parts)) => Ok(parts),
        Ok((rem, _)) => Err(UriTemplateError::Parse(
            input.to_string(),
            format!("unexpected input at '{}'", rem),
        )),
        Err(e) => Err(UriTemplateError::Parse(input.to_string(), e.to_string())),
    }
}

// --- Combinators ---

fn template(input: &str) -> IResult<&str, Vec<Part>> {
    many0(alt((map(literal, Part::Literal), expression))).parse(input)
}

/// Literal text runs up to the next expression; bare braces are not allowed
/// in literals, so a stray `{` or `}` fails the parse.
fn literal(input: &str) -> IResult<&str, String> {
    map(take_while1(|c: char| c != '{' && c != '}'), str::to_string).parse(input)
}

fn expression(input: &str) -> IResult<&str, Part> {
    map(
        delimited(
            char('{'),
            pair(operator, separated_list1(char(','), varspec)),
            char('}'),
        ),
        |(operator, variables)| Part::Expression {
            operator,
            variables,
        },
    )
    .parse(input)
}

fn operator(input: &str) -> IResult<&str, Operator> {
    map(opt(one_of("+#./;?&")), |symbol| match symbol {
        Some('+') => Operator::Reserved,
        Some('#') => Operator::Fragment,
        Some('.') => Operator::Label,
        Some('/') => Operator::Path,
        Some(';') => Operator::PathParameter,
        Some('?') => Operator::Query,
        Some('&') => Operator::QueryContinuation,
        _ => Operator::Simple,
    })
    .parse(input)
}

// --- Variable Specifiers ---

fn varspec(input: &str) -> IResult<&str, VarSpec> {
    map(pair(varname, opt(modifier)), |(name, modifier)| VarSpec {
        name: name.to_string(),
        modifier: modifier.unwrap_or(Modifier::None),
    })
    .parse(input)
}

/// varname = varchar *( ["."] varchar )
fn varname(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), many1(varchar))).parse(input)
}

/// varchar = ALPHA / DIGIT / "_" / pct-encoded
fn varchar(input: &str) -> IResult<&str, &str> {
    alt((
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        pct_encoded,
    ))
    .parse(input)
}

fn pct_encoded(input: &str) -> IResult<&str, &str> {
    recognize((
        char('%'),
        satisfy(|c: char| c.is_ascii_hexdigit()),
        satisfy(|c: char| c.is_ascii_hexdigit()),
    ))
    .parse(input)
}

fn modifier(input: &str) -> IResult<&str, Modifier> {
    alt((
        // max-length is 1-4 digits and must not start with zero
        map_opt(preceded(char(':'), nom_u16), |n| {
            (1..=9999).contains(&n).then_some(Modifier::Prefix(n))
        }),
        map(char('*'), |_| Modifier::Explode),
    ))
    .parse(input)
}
