//! Provides parsers for object declarations.

use crate::parsed_types::Objects;
use crate::parsers::{parse_name, prefix_expr, typed_list, ParseResult, Span};
use nom::combinator::map;

/// Parses object declarations, i.e. `(:objects <typed list (name)>)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_objects_declaration, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let (_, objects) = parse_objects_declaration("(:objects b1 b2 - block t)").unwrap();
/// assert_eq!(objects.len(), 3);
/// assert_eq!(objects[2].type_(), &Type::object());
/// ```
pub fn parse_objects_declaration<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Objects> {
    map(prefix_expr(":objects", typed_list(parse_name)), Objects::new)(input.into())
}

impl crate::parsers::Parser for Objects {
    type Item = Objects;

    /// See [`parse_objects_declaration`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_objects_declaration(input)
    }
}
