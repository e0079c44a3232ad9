//! Provides parsers for problem definitions.

use crate::parsed_types::Problem;
use crate::parsers::{parse_goal_definition, parse_init_element, parse_metric, parse_name};
use crate::parsers::{parse_objects_declaration, parse_requirements, prefix_expr};
use crate::parsers::{space_separated_list0, surrounding_whitespace, ParseResult, Span};
use nom::combinator::{map, opt};
use nom::sequence::tuple;

/// Parses a problem definition.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_problem, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let input = r#"(define (problem deliver)
///         (:domain trucks)
///         (:objects t1 - truck depot shop - location)
///         (:init (road depot shop) (= (loc t1) depot) (= (fuel t1) 3))
///         (:goal (= (loc t1) shop))
///         (:metric minimize (total-cost))
///     )"#;
///
/// let (remainder, problem) = parse_problem(input).unwrap();
///
/// assert!(remainder.is_empty());
/// assert_eq!(problem.name(), &Name::new("deliver"));
/// assert_eq!(problem.domain(), &Name::new("trucks"));
/// assert_eq!(problem.objects().len(), 3);
/// assert_eq!(problem.init().len(), 3);
/// assert!(matches!(problem.goal(), GoalDefinition::Compare(..)));
/// assert!(problem.metric().is_some());
/// ```
pub fn parse_problem<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Problem> {
    map(
        surrounding_whitespace(prefix_expr(
            "define",
            tuple((
                prefix_expr("problem", parse_name),
                prefix_expr(":domain", parse_name),
                opt(parse_requirements),
                opt(parse_objects_declaration),
                prefix_expr(":init", space_separated_list0(parse_init_element)),
                prefix_expr(":goal", parse_goal_definition),
                opt(parse_metric),
            )),
        )),
        |(name, domain, requirements, objects, init, goal, metric)| {
            Problem::builder(name, domain, init, goal)
                .with_requirements(requirements.unwrap_or_default())
                .with_objects(objects.unwrap_or_default())
                .with_metric(metric)
        },
    )(input.into())
}

impl crate::parsers::Parser for Problem {
    type Item = Problem;

    /// Parses a problem definition.
    ///
    /// ## See also
    /// See [`parse_problem`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_problem(input)
    }
}
