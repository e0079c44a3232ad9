//! Provides parsers for goal definitions.

use crate::parsed_types::{BinaryComparison, GoalDefinition};
use crate::parsers::{atom, empty_parens, leading_whitespace, parens, parse_fluent_expression};
use crate::parsers::{parse_term, parse_variable, prefix_expr, space_separated_list0};
use crate::parsers::{typed_list, ParseResult, Span};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{map, value};
use nom::sequence::tuple;

/// Parses a binary comparison operator.
pub fn parse_binary_comparison<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, BinaryComparison> {
    alt((
        value(BinaryComparison::LessOrEquals, tag("<=")),
        value(BinaryComparison::GreaterOrEquals, tag(">=")),
        value(BinaryComparison::LessThan, tag("<")),
        value(BinaryComparison::GreaterThan, tag(">")),
        value(BinaryComparison::Equals, tag("=")),
    ))(input.into())
}

/// Parses a goal definition.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_goal_definition, preamble::*};
/// # use liftedreg::parsed_types::*;
/// assert!(parse_goal_definition("(not (clear ?x))").is_value(
///     GoalDefinition::new_not(GoalDefinition::new_atom(Atom::new(
///         Name::new("clear"),
///         vec![Term::Variable("x".into())],
///     )))
/// ));
/// assert!(parse_goal_definition("(= ?x ?y)").is_value(GoalDefinition::new_compare(
///     BinaryComparison::Equals,
///     FluentExpression::Term(Term::Variable("x".into())),
///     FluentExpression::Term(Term::Variable("y".into())),
/// )));
/// assert!(parse_goal_definition("()").is_value(GoalDefinition::empty()));
/// ```
pub fn parse_goal_definition<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, GoalDefinition> {
    alt((
        map(empty_parens, |_| GoalDefinition::empty()),
        map(
            prefix_expr("and", space_separated_list0(parse_goal_definition)),
            GoalDefinition::new_and,
        ),
        map(
            prefix_expr("or", space_separated_list0(parse_goal_definition)),
            GoalDefinition::new_or,
        ),
        map(
            prefix_expr("not", parse_goal_definition),
            GoalDefinition::new_not,
        ),
        map(
            prefix_expr(
                "imply",
                tuple((
                    parse_goal_definition,
                    leading_whitespace(parse_goal_definition),
                )),
            ),
            |(a, b)| GoalDefinition::new_imply(a, b),
        ),
        map(
            prefix_expr(
                "exists",
                tuple((
                    parens(typed_list(parse_variable)),
                    leading_whitespace(parse_goal_definition),
                )),
            ),
            |(variables, goal)| GoalDefinition::new_exists(variables, goal),
        ),
        map(
            prefix_expr(
                "forall",
                tuple((
                    parens(typed_list(parse_variable)),
                    leading_whitespace(parse_goal_definition),
                )),
            ),
            |(variables, goal)| GoalDefinition::new_forall(variables, goal),
        ),
        map(
            parens(tuple((
                parse_binary_comparison,
                leading_whitespace(parse_fluent_expression),
                leading_whitespace(parse_fluent_expression),
            ))),
            |(comparison, a, b)| GoalDefinition::new_compare(comparison, a, b),
        ),
        map(atom(parse_term), GoalDefinition::new_atom),
    ))(input.into())
}

impl crate::parsers::Parser for GoalDefinition {
    type Item = GoalDefinition;

    /// See [`parse_goal_definition`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_goal_definition(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantified_goal() {
        let input = "(forall (?b - block) (imply (on ?b ?c) (exists (?d) (clear ?d))))";
        let (remainder, goal) = parse_goal_definition(Span::new(input)).unwrap();
        assert!(remainder.is_empty());
        match goal {
            GoalDefinition::ForAll(variables, body) => {
                assert_eq!(variables.len(), 1);
                assert!(matches!(*body, GoalDefinition::Imply(..)));
            }
            _ => panic!("expected a universal goal"),
        }
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let (_, goal) = parse_goal_definition(Span::new("(AND (p) (NOT (q)))")).unwrap();
        match goal {
            GoalDefinition::And(values) => {
                assert_eq!(values.len(), 2);
                assert!(matches!(values[1], GoalDefinition::Not(_)));
            }
            _ => panic!("expected a conjunction"),
        }
    }

    #[test]
    fn predicates_sharing_a_keyword_prefix() {
        let (_, goal) = parse_goal_definition(Span::new("(nothing-left ?x)")).unwrap();
        assert!(matches!(goal, GoalDefinition::Atom(_)));
    }

    #[test]
    fn numeric_comparison() {
        let (_, goal) = parse_goal_definition(Span::new("(>= (fuel ?t) 10)")).unwrap();
        assert!(matches!(
            goal,
            GoalDefinition::Compare(BinaryComparison::GreaterOrEquals, _, _)
        ));
    }
}
