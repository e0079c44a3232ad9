//! Provides parsers for domain definitions.

use crate::parsed_types::Domain;
use crate::parsers::{parse_action_definition, parse_constants, parse_function_definitions};
use crate::parsers::{parse_name, parse_predicate_definition, parse_requirements};
use crate::parsers::{parse_type_definitions, prefix_expr, space_separated_list0};
use crate::parsers::{surrounding_whitespace, ParseResult, Span};
use nom::combinator::{map, opt};
use nom::multi::many0;
use nom::sequence::tuple;

/// Parses a domain definition.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_domain, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let input = r#"
/// (define
///     (domain trucks)
///     (:requirements :typing :object-fluents :numeric-fluents)
///     (:types truck location)
///
///     (:predicates (road ?from ?to - location))
///     (:functions (loc ?t - truck) - location
///                 (fuel ?t - truck))
///
///     ; move along a road, burning one unit of fuel
///     (:action drive
///         :parameters (?t - truck ?to - location)
///         :precondition (and (road (loc ?t) ?to) (> (fuel ?t) 0))
///         :effect (and (assign (loc ?t) ?to) (decrease (fuel ?t) 1))
///     )
///)"#;
///
/// let (remainder, domain) = parse_domain(input).unwrap();
///
/// assert!(remainder.is_empty());
/// assert_eq!(domain.name(), &Name::new("trucks"));
/// assert_eq!(domain.types().len(), 2);
/// assert_eq!(domain.predicates().len(), 1);
/// assert_eq!(domain.functions().len(), 2);
/// assert_eq!(domain.actions().len(), 1);
/// ```
pub fn parse_domain<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Domain> {
    map(
        surrounding_whitespace(prefix_expr(
            "define",
            tuple((
                prefix_expr("domain", parse_name),
                opt(parse_requirements),
                opt(parse_type_definitions),
                opt(parse_constants),
                opt(prefix_expr(
                    ":predicates",
                    space_separated_list0(parse_predicate_definition),
                )),
                opt(parse_function_definitions),
                many0(parse_action_definition),
            )),
        )),
        |(name, requirements, types, constants, predicates, functions, actions)| {
            Domain::builder(name, actions)
                .with_requirements(requirements.unwrap_or_default())
                .with_types(types.unwrap_or_default())
                .with_constants(constants.unwrap_or_default())
                .with_predicates(predicates.unwrap_or_default())
                .with_functions(functions.unwrap_or_default())
        },
    )(input.into())
}

impl crate::parsers::Parser for Domain {
    type Item = Domain;

    /// Parses a domain definition.
    ///
    /// ## See also
    /// See [`parse_domain`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_domain(input)
    }
}
