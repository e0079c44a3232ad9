//! Provides parsers for effect definitions.

use crate::parsed_types::{AssignOperation, EffectDefinition};
use crate::parsers::{atom, empty_parens, keyword, leading_whitespace, parens};
use crate::parsers::{parse_fluent_expression, parse_goal_definition, parse_term};
use crate::parsers::{parse_variable, prefix_expr, space_separated_list0, typed_list};
use crate::parsers::{ParseResult, Span};
use nom::branch::alt;
use nom::combinator::{map, value};
use nom::sequence::tuple;

/// Parses an assignment operator such as `increase`.
pub fn parse_assign_operation<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, AssignOperation> {
    alt((
        value(AssignOperation::Assign, keyword("assign")),
        value(AssignOperation::Increase, keyword("increase")),
        value(AssignOperation::Decrease, keyword("decrease")),
        value(AssignOperation::ScaleUp, keyword("scale-up")),
        value(AssignOperation::ScaleDown, keyword("scale-down")),
    ))(input.into())
}

/// Parses an effect. Conjunctions are flattened, so the result is the list of
/// top-level effects.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_effect_definition, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let (_, effects) = parse_effect_definition(
///     "(and (clear ?x) (not (on ?x ?y)) (increase (total-cost) 1))"
/// ).unwrap();
/// assert_eq!(effects.len(), 3);
/// assert!(matches!(effects[0], EffectDefinition::Add(_)));
/// assert!(matches!(effects[1], EffectDefinition::Delete(_)));
/// assert!(matches!(effects[2], EffectDefinition::Assign(AssignOperation::Increase, _, _)));
/// ```
pub fn parse_effect_definition<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, Vec<EffectDefinition>> {
    alt((
        map(empty_parens, |_| vec![]),
        map(
            prefix_expr("and", space_separated_list0(parse_effect_definition)),
            |effects| effects.into_iter().flatten().collect(),
        ),
        map(
            prefix_expr(
                "forall",
                tuple((
                    parens(typed_list(parse_variable)),
                    leading_whitespace(parse_effect_definition),
                )),
            ),
            |(variables, effects)| vec![EffectDefinition::new_forall(variables, effects)],
        ),
        map(
            prefix_expr(
                "when",
                tuple((
                    parse_goal_definition,
                    leading_whitespace(parse_effect_definition),
                )),
            ),
            |(condition, effects)| vec![EffectDefinition::new_when(condition, effects)],
        ),
        map(prefix_expr("not", atom(parse_term)), |atom| {
            vec![EffectDefinition::new_delete(atom)]
        }),
        map(
            parens(tuple((
                parse_assign_operation,
                leading_whitespace(atom(parse_term)),
                leading_whitespace(parse_fluent_expression),
            ))),
            |(operation, function, value)| {
                vec![EffectDefinition::new_assign(operation, function, value)]
            },
        ),
        map(atom(parse_term), |atom| vec![EffectDefinition::new_add(atom)]),
    ))(input.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{FluentExpression, Term};

    #[test]
    fn conditional_effect_inside_forall() {
        let input = "(forall (?b - block) (when (on ?b ?x) (and (clear ?b) (not (on ?b ?x)))))";
        let (remainder, effects) = parse_effect_definition(Span::new(input)).unwrap();
        assert!(remainder.is_empty());
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            EffectDefinition::ForAll(variables, inner) => {
                assert_eq!(variables.len(), 1);
                match &inner[0] {
                    EffectDefinition::When(_, effects) => assert_eq!(effects.len(), 2),
                    _ => panic!("expected a conditional effect"),
                }
            }
            _ => panic!("expected a universal effect"),
        }
    }

    #[test]
    fn object_assignment() {
        let (_, effects) = parse_effect_definition(Span::new("(assign (loc ?t) ?to)")).unwrap();
        match &effects[0] {
            EffectDefinition::Assign(AssignOperation::Assign, function, value) => {
                assert_eq!(function.name(), "loc");
                assert_eq!(value, &FluentExpression::Term(Term::Variable("to".into())));
            }
            _ => panic!("expected an assignment"),
        }
    }

    #[test]
    fn empty_effect() {
        let (_, effects) = parse_effect_definition(Span::new("()")).unwrap();
        assert!(effects.is_empty());
    }
}
