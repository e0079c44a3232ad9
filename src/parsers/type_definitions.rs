//! Provides parsers for type definitions.

use crate::parsed_types::Types;
use crate::parsers::{parse_name, prefix_expr, typed_list, ParseResult, Span};
use nom::combinator::map;

/// Parses type definitions, i.e. `(:types <typed list (name)>)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_type_definitions, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let input = "(:types truck plane - vehicle location)";
/// let (_, types) = parse_type_definitions(input).unwrap();
/// assert_eq!(types.len(), 3);
/// assert_eq!(types[0].type_(), &Type::from("vehicle"));
/// assert_eq!(types[2].type_(), &Type::object());
/// ```
pub fn parse_type_definitions<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Types> {
    map(prefix_expr(":types", typed_list(parse_name)), Types::new)(input.into())
}

impl crate::parsers::Parser for Types {
    type Item = Types;

    /// See [`parse_type_definitions`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_type_definitions(input)
    }
}
