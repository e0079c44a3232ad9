//! Provides parsers for types.

use crate::parsed_types::{PrimitiveType, Type};
use crate::parsers::{parse_name, prefix_expr, space_separated_list1, ParseResult, Span};
use nom::branch::alt;
use nom::combinator::map;

/// Parses a primitive type, i.e. `object | <name>`.
pub fn parse_primitive_type<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, PrimitiveType> {
    map(parse_name, PrimitiveType::new)(input.into())
}

/// Parses a type, i.e. `<primitive type> | (either <primitive type>⁺)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_type, preamble::*};
/// # use liftedreg::parsed_types::Type;
/// assert!(parse_type("object").is_value(Type::object()));
/// assert!(parse_type("(either number object)").is_value(Type::from(vec!["number", "object"])));
///```
pub fn parse_type<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Type> {
    alt((
        map(
            prefix_expr("either", space_separated_list1(parse_primitive_type)),
            Type::from,
        ),
        map(parse_primitive_type, Type::from),
    ))(input.into())
}

impl crate::parsers::Parser for Type {
    type Item = Type;

    /// See [`parse_type`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_type(input)
    }
}
