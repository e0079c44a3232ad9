//! Parsers for PDDL domain and problem files, built from [`nom`] combinators.

mod action_definition;
mod atom;
mod comments;
mod constants;
mod domain;
mod effect_definition;
mod fluent_expression;
mod function_definition;
mod goal_definition;
mod init_element;
mod name;
mod object_declarations;
mod predicate_definition;
mod problem;
mod requirements;
mod term;
mod test_helpers;
mod r#type;
mod type_definitions;
mod typed_list;
mod utilities;
mod variable;

pub use test_helpers::UnwrapValue;

pub trait Parser {
    type Item;

    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item>;

    fn parse_span(input: Span) -> ParseResult<Self::Item> {
        Self::parse(input)
    }

    /// Parse a string slice into the desired type. Discards any remaining
    /// input.
    fn from_str(input: &str) -> Result<Self::Item, nom::Err<ParseError>> {
        let (_, value) = Self::parse(input)?;
        Ok(value)
    }
}

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

pub type ParseError<'a> = nom_greedyerror::GreedyError<Span<'a>, nom::error::ErrorKind>;

pub type ParseResult<'a, T, E = ParseError<'a>> = nom::IResult<Span<'a>, T, E>;

/// Re-exports commonly used types.
pub mod preamble {
    pub use crate::parsers::test_helpers::UnwrapValue;
    pub use crate::parsers::Parser;
    pub use crate::parsers::{ParseError, ParseResult, Span};
}

// Parsers
pub use action_definition::parse_action_definition;
pub use comments::ignore_single_line_comment;
pub use constants::parse_constants;
pub use domain::parse_domain;
pub use effect_definition::{parse_assign_operation, parse_effect_definition};
pub use fluent_expression::{parse_fluent_expression, parse_number};
pub use function_definition::{parse_function_definitions, parse_function_skeleton};
pub use goal_definition::{parse_binary_comparison, parse_goal_definition};
pub use init_element::{parse_init_element, parse_metric};
pub use name::parse_name;
pub use object_declarations::parse_objects_declaration;
pub use predicate_definition::parse_predicate_definition;
pub use problem::parse_problem;
pub use r#type::{parse_primitive_type, parse_type};
pub use requirements::{parse_requirement_key, parse_requirements};
pub use term::parse_term;
pub use type_definitions::parse_type_definitions;
pub use variable::parse_variable;

// Parser combinators
pub use atom::atom;
pub use typed_list::typed_list;

#[allow(unused_imports)]
pub(crate) use utilities::{
    empty_parens, is_name_char, keyword, leading_whitespace, parens, prefix_expr,
    space_separated_list0, space_separated_list1, surrounding_whitespace,
};
