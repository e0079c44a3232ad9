//! Provides parsers for predicate definitions.

use crate::parsed_types::PredicateDefinition;
use crate::parsers::{parens, parse_name, parse_variable, typed_list, ParseResult, Span};
use nom::combinator::map;
use nom::sequence::tuple;

/// Parses a predicate definition, i.e. `(<name> <typed list (variable)>)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_predicate_definition, preamble::*};
/// # use liftedreg::parsed_types::*;
/// assert!(parse_predicate_definition(Span::new("(at ?x - physob ?y - location)")).is_value(
///     PredicateDefinition::new(
///         Name::from("at"),
///         TypedList::from_iter([
///             Variable::from("x").to_typed("physob"),
///             Variable::from("y").to_typed("location")
///         ]))
/// ));
/// ```
pub fn parse_predicate_definition<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, PredicateDefinition> {
    map(
        parens(tuple((parse_name, typed_list(parse_variable)))),
        PredicateDefinition::from,
    )(input.into())
}

impl crate::parsers::Parser for PredicateDefinition {
    type Item = PredicateDefinition;

    /// See [`parse_predicate_definition`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_predicate_definition(input)
    }
}
