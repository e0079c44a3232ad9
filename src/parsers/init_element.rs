//! Provides parsers for initial state elements and metrics.

use crate::parsed_types::{InitElement, Metric, Optimization};
use crate::parsers::{atom, keyword, leading_whitespace, parse_fluent_expression, parse_name};
use crate::parsers::{parse_number, prefix_expr, ParseResult, Span};
use nom::branch::alt;
use nom::combinator::{map, value};
use nom::sequence::tuple;

/// Parses an element of `:init`, i.e. a ground atom or a function value.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_init_element, preamble::*};
/// # use liftedreg::parsed_types::*;
/// assert!(parse_init_element("(on a b)").is_value(InitElement::Atom(
///     Atom::new(Name::new("on"), vec![Name::new("a"), Name::new("b")])
/// )));
/// assert!(parse_init_element("(= (fuel t1) 10)").is_value(InitElement::NumericAssign(
///     Atom::new(Name::new("fuel"), vec![Name::new("t1")]),
///     10.0,
/// )));
/// assert!(parse_init_element("(= (loc t1) depot)").is_value(InitElement::ObjectAssign(
///     Atom::new(Name::new("loc"), vec![Name::new("t1")]),
///     Name::new("depot"),
/// )));
/// ```
pub fn parse_init_element<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, InitElement> {
    alt((
        map(
            prefix_expr(
                "=",
                tuple((atom(parse_name), leading_whitespace(parse_number))),
            ),
            |(function, value)| InitElement::NumericAssign(function, value),
        ),
        map(
            prefix_expr(
                "=",
                tuple((atom(parse_name), leading_whitespace(parse_name))),
            ),
            |(function, value)| InitElement::ObjectAssign(function, value),
        ),
        map(atom(parse_name), InitElement::Atom),
    ))(input.into())
}

/// Parses a metric, i.e. `(:metric minimize|maximize <fluent expression>)`.
pub fn parse_metric<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Metric> {
    map(
        prefix_expr(
            ":metric",
            tuple((
                alt((
                    value(Optimization::Minimize, keyword("minimize")),
                    value(Optimization::Maximize, keyword("maximize")),
                )),
                leading_whitespace(parse_fluent_expression),
            )),
        ),
        |(optimization, expression)| Metric::new(optimization, expression),
    )(input.into())
}
