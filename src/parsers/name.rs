//! Provides parsers for names.

use crate::parsed_types::Name;
use crate::parsers::{is_name_char, ParseResult, Span};
use nom::bytes::complete::take_while;
use nom::character::complete::satisfy;
use nom::combinator::{map, recognize};
use nom::sequence::pair;

/// Parses a name, i.e. a letter followed by letters, digits, `-` or `_`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_name, preamble::*};
/// # use liftedreg::parsed_types::Name;
/// assert!(parse_name("abcde").is_value(Name::new("abcde")));
/// assert!(parse_name("a-1_2").is_value(Name::new("a-1_2")));
/// assert!(parse_name("Truck").is_value(Name::new("truck")));
///
/// assert!(parse_name("1abc").is_err());
/// assert!(parse_name("-abc").is_err());
/// assert!(parse_name("?abc").is_err());
///```
pub fn parse_name<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Name> {
    map(
        recognize(pair(
            satisfy(|c: char| c.is_alphabetic()),
            take_while(is_name_char),
        )),
        |x: Span| Name::new(x.fragment()),
    )(input.into())
}

impl crate::parsers::Parser for Name {
    type Item = Name;

    /// See [`parse_name`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_name(input)
    }
}
