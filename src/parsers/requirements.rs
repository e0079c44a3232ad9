//! Provides parsers for requirements.

use crate::parsed_types::{Requirement, Requirements};
use crate::parsers::{is_name_char, prefix_expr, space_separated_list1};
use crate::parsers::{ParseError, ParseResult, Span};
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::{map, recognize};
use nom::error::ErrorKind;
use nom::error_position;
use nom::sequence::pair;
use std::str::FromStr;

/// Parses a requirement definition, i.e. `(:requirements <require-key>⁺)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_requirements, preamble::*};
/// # use liftedreg::parsed_types::{Requirement, Requirements};
/// assert!(parse_requirements("(:requirements :strips)").is_value(Requirements::new([Requirement::Strips])));
/// assert!(parse_requirements("(:requirements :strips :typing)").is_value(Requirements::new([Requirement::Strips, Requirement::Typing])));
/// assert!(parse_requirements("(:requirements\n:strips   :typing  )").is_value(Requirements::new([Requirement::Strips, Requirement::Typing])));
///```
pub fn parse_requirements<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Requirements> {
    map(
        prefix_expr(
            ":requirements",
            space_separated_list1(parse_requirement_key),
        ),
        Requirements::new,
    )(input.into())
}

/// Parses a requirement key, i.e. `:strips`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_requirement_key, preamble::*};
/// # use liftedreg::parsed_types::Requirement;
/// assert!(parse_requirement_key(":strips").is_value(Requirement::Strips));
/// assert!(parse_requirement_key(":ADL").is_value(Requirement::Adl));
/// assert!(parse_requirement_key(":object-fluents").is_value(Requirement::ObjectFluents));
/// assert!(parse_requirement_key(":action-costs").is_value(Requirement::ActionCosts));
///
/// assert!(parse_requirement_key(":unknown").is_err());
/// assert!(parse_requirement_key("invalid").is_err());
///```
pub fn parse_requirement_key<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Requirement> {
    let input = input.into();
    let (remainder, key) = recognize::<_, _, ParseError, _>(pair(char(':'), take_while1(is_name_char)))(input)?;
    match Requirement::from_str(&key.fragment().to_lowercase()) {
        Ok(requirement) => Ok((remainder, requirement)),
        Err(_) => Err(nom::Err::Error(error_position!(input, ErrorKind::Tag))),
    }
}

impl crate::parsers::Parser for Requirements {
    type Item = Requirements;

    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_requirements(input)
    }
}

impl crate::parsers::Parser for Requirement {
    type Item = Requirement;

    /// See [`parse_requirement_key`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_requirement_key(input)
    }
}
