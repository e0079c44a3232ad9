//! Provides parsers for constant definitions.

use crate::parsed_types::Objects;
use crate::parsers::{parse_name, prefix_expr, typed_list, ParseResult, Span};
use nom::combinator::map;

/// Parses constant definitions, i.e. `(:constants <typed list (name)>)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_constants, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let (_, constants) = parse_constants("(:constants north south - direction)").unwrap();
/// assert_eq!(constants.len(), 2);
/// ```
pub fn parse_constants<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Objects> {
    map(prefix_expr(":constants", typed_list(parse_name)), Objects::new)(input.into())
}
