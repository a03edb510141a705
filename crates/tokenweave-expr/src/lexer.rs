//! Lexical primitives for expressions.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace.
pub fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier (letter or underscore, then alphanumerics/underscores).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse an unsigned number: `12`, `1.5`, `.5`, `2e3`.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            alt((
                recognize(pair(
                    take_while1(|c: char| c.is_ascii_digit()),
                    opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
                )),
                recognize(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
            )),
            opt(tuple((
                one_of("eE"),
                opt(one_of("+-")),
                take_while1(|c: char| c.is_ascii_digit()),
            ))),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse an additive operator.
pub fn additive(input: &str) -> IResult<&str, char> {
    one_of("+-")(input)
}

/// Parse a multiplicative operator.
pub fn multiplicative(input: &str) -> IResult<&str, char> {
    one_of("*/")(input)
}
