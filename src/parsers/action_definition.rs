//! Provides parsers for action definitions.

use crate::parsed_types::ActionDefinition;
use crate::parsers::{keyword, leading_whitespace, parens, parse_effect_definition};
use crate::parsers::{parse_goal_definition, parse_name, parse_variable, prefix_expr};
use crate::parsers::{typed_list, ParseResult, Span};
use nom::combinator::{map, opt};
use nom::sequence::{preceded, tuple};

/// Parses an action definition.
///
/// ## Example
/// ```
/// # use liftedreg::parsed_types::*;
/// # use liftedreg::parsers::{parse_action_definition, preamble::*};
/// let input = r#"(:action putdown
///                    :parameters  (?ob)
///                    :precondition (holding ?ob)
///                    :effect (and (clear ?ob) (arm-empty) (on-table ?ob)
///                        (not (holding ?ob))))"#;
///
/// let (_, action) = parse_action_definition(Span::new(input)).unwrap();
///
/// assert_eq!(action.name(), &Name::new("putdown"));
/// assert_eq!(action.parameters().len(), 1);
/// assert!(matches!(action.precondition(), GoalDefinition::Atom(_)));
/// assert_eq!(action.effects().len(), 4);
/// ```
pub fn parse_action_definition<'a, T: Into<Span<'a>>>(
    input: T,
) -> ParseResult<'a, ActionDefinition> {
    map(
        prefix_expr(
            ":action",
            tuple((
                parse_name,
                map(
                    opt(preceded(
                        leading_whitespace(keyword(":parameters")),
                        leading_whitespace(parens(typed_list(parse_variable))),
                    )),
                    Option::unwrap_or_default,
                ),
                opt(preceded(
                    leading_whitespace(keyword(":precondition")),
                    leading_whitespace(parse_goal_definition),
                )),
                map(
                    opt(preceded(
                        leading_whitespace(keyword(":effect")),
                        leading_whitespace(parse_effect_definition),
                    )),
                    Option::unwrap_or_default,
                ),
            )),
        ),
        |(name, parameters, precondition, effects)| {
            ActionDefinition::new(name, parameters, precondition, effects)
        },
    )(input.into())
}

impl crate::parsers::Parser for ActionDefinition {
    type Item = ActionDefinition;

    /// See [`parse_action_definition`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_action_definition(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::GoalDefinition;

    #[test]
    fn action_without_precondition() {
        let input = "(:action noop :parameters () :effect ())";
        let (remainder, action) = parse_action_definition(Span::new(input)).unwrap();
        assert!(remainder.is_empty());
        assert!(action.parameters().is_empty());
        assert!(action.precondition().is_empty());
        assert_eq!(action.precondition(), &GoalDefinition::empty());
        assert!(action.effects().is_empty());
    }
}
