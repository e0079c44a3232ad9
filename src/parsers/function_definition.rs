//! Provides parsers for function definitions.

use crate::parsed_types::{FunctionDefinition, Name, TypedVariables};
use crate::parsers::{leading_whitespace, parens, parse_name, parse_type, parse_variable};
use crate::parsers::{prefix_expr, space_separated_list1, typed_list, ParseResult, Span};
use nom::character::complete::char;
use nom::combinator::{map, opt};
use nom::multi::many0;
use nom::sequence::{preceded, tuple};

/// Parses a function skeleton, i.e. `(<name> <typed list (variable)>)`.
pub fn parse_function_skeleton<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, (Name, TypedVariables)> {
    parens(tuple((parse_name, typed_list(parse_variable))))(input.into())
}

/// Parses the function section of a domain, i.e.
/// `(:functions <function typed list (function skeleton)>)`. Functions
/// without a declared type are numeric.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_function_definitions, preamble::*};
/// let input = "(:functions (total-cost) - number (loc ?t - truck) - location (fuel ?t))";
/// let (_, functions) = parse_function_definitions(input).unwrap();
/// assert_eq!(functions.len(), 3);
/// assert!(functions[0].is_numeric());
/// assert!(!functions[1].is_numeric());
/// assert!(functions[2].is_numeric());
/// ```
pub fn parse_function_definitions<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, Vec<FunctionDefinition>> {
    let group = map(
        tuple((
            space_separated_list1(parse_function_skeleton),
            opt(preceded(
                leading_whitespace(char('-')),
                leading_whitespace(parse_type),
            )),
        )),
        |(skeletons, r#type)| {
            skeletons
                .into_iter()
                .map(|(name, variables)| FunctionDefinition::new(name, variables, r#type.clone()))
                .collect::<Vec<_>>()
        },
    );

    map(prefix_expr(":functions", many0(group)), |groups| {
        groups.into_iter().flatten().collect()
    })(input.into())
}
