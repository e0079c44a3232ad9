//! Provides parsers for variables.

use crate::parsed_types::Variable;
use crate::parsers::{parse_name, ParseResult, Span};
use nom::character::complete::char;
use nom::combinator::map;
use nom::sequence::preceded;

/// Parses a variable, i.e. `?<name>`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_variable, preamble::*};
/// # use liftedreg::parsed_types::Variable;
/// assert!(parse_variable("?abcde").is_value(Variable::from_str("abcde")));
/// assert!(parse_variable("abcde").is_err());
///```
pub fn parse_variable<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Variable> {
    map(preceded(char('?'), parse_name), Variable::new)(input.into())
}

impl crate::parsers::Parser for Variable {
    type Item = Variable;

    /// See [`parse_variable`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_variable(input)
    }
}
