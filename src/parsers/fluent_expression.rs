//! Provides parsers for numeric and object-valued expressions.

use crate::parsed_types::FluentExpression;
use crate::parsers::{leading_whitespace, parse_term, prefix_expr, space_separated_list1};
use crate::parsers::{ParseError, ParseResult, Span};
use nom::branch::alt;
use nom::combinator::map;
use nom::error::ErrorKind;
use nom::error_position;
use nom::number::complete::recognize_float;
use nom::sequence::tuple;

/// Parses a decimal number such as `3`, `-2.5` or `1e3`.
pub fn parse_number<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, f64> {
    let input = input.into();
    let (remainder, digits) = recognize_float::<_, ParseError>(input)?;
    match digits.fragment().parse::<f64>() {
        Ok(value) => Ok((remainder, value)),
        Err(_) => Err(nom::Err::Error(error_position!(input, ErrorKind::Float))),
    }
}

/// Parses a fluent expression, i.e. a number, a term or an arithmetic
/// expression over fluent expressions.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_fluent_expression, preamble::*};
/// # use liftedreg::parsed_types::*;
/// assert!(parse_fluent_expression("2.5").is_value(FluentExpression::Number(2.5)));
/// assert!(parse_fluent_expression("(- (fuel ?t) 1)").is_value(FluentExpression::new_minus(
///     FluentExpression::Term(Term::Function(Atom::new(
///         Name::new("fuel"),
///         vec![Term::Variable("t".into())],
///     ))),
///     FluentExpression::Number(1.0),
/// )));
/// assert!(parse_fluent_expression("(- ?x)").is_value(FluentExpression::new_negate(
///     FluentExpression::Term(Term::Variable("x".into()))
/// )));
/// ```
pub fn parse_fluent_expression<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, FluentExpression> {
    alt((
        map(parse_number, FluentExpression::Number),
        map(
            prefix_expr("+", space_separated_list1(parse_fluent_expression)),
            FluentExpression::new_plus,
        ),
        map(
            prefix_expr("*", space_separated_list1(parse_fluent_expression)),
            FluentExpression::new_multiply,
        ),
        map(
            prefix_expr(
                "/",
                tuple((
                    parse_fluent_expression,
                    leading_whitespace(parse_fluent_expression),
                )),
            ),
            |(a, b)| FluentExpression::new_divide(a, b),
        ),
        map(
            prefix_expr(
                "-",
                tuple((
                    parse_fluent_expression,
                    leading_whitespace(parse_fluent_expression),
                )),
            ),
            |(a, b)| FluentExpression::new_minus(a, b),
        ),
        map(
            prefix_expr("-", parse_fluent_expression),
            FluentExpression::new_negate,
        ),
        map(parse_term, FluentExpression::Term),
    ))(input.into())
}

impl crate::parsers::Parser for FluentExpression {
    type Item = FluentExpression;

    /// See [`parse_fluent_expression`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_fluent_expression(input)
    }
}
