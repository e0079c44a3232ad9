//! Provides the [`typed_list`] combinator.

use crate::parsed_types::{Typed, TypedList};
use crate::parsers::{leading_whitespace, parse_type, space_separated_list0};
use crate::parsers::{space_separated_list1, ParseResult, Span};
use nom::character::complete::char;
use nom::combinator::map;
use nom::multi::many0;
use nom::sequence::{preceded, tuple};

/// Parses a typed list, i.e. `x* | x⁺ - <type> <typed list (x)>`. Values
/// without a declared type are of type `object`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_name, typed_list, preamble::*};
/// # use liftedreg::parsed_types::*;
/// let (_, list) = typed_list(parse_name)(Span::new("a b - truck c - (either x y) d")).unwrap();
/// assert_eq!(list.len(), 4);
/// assert_eq!(list[0].type_(), &Type::from("truck"));
/// assert_eq!(list[1].type_(), &Type::from("truck"));
/// assert_eq!(list[2].type_(), &Type::from(vec!["x", "y"]));
/// assert_eq!(list[3].type_(), &Type::object());
/// ```
pub fn typed_list<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, TypedList<O>>
where
    F: Clone + FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    let typed_group = map(
        tuple((
            space_separated_list1(inner.clone()),
            preceded(leading_whitespace(char('-')), leading_whitespace(parse_type)),
        )),
        |(values, r#type)| {
            values
                .into_iter()
                .map(|value| Typed::new(value, r#type.clone()))
                .collect::<Vec<_>>()
        },
    );
    let untyped = space_separated_list0(inner);

    map(tuple((many0(typed_group), untyped)), |(groups, rest)| {
        groups
            .into_iter()
            .flatten()
            .chain(rest.into_iter().map(Typed::new_object))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{Type, Variable};
    use crate::parsers::parse_variable;

    #[test]
    fn empty_list() {
        let (_, list) = typed_list(parse_variable)(Span::new("")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn variables_share_group_type() {
        let (remainder, list) =
            typed_list(parse_variable)(Span::new("?x ?y - block ?z")).unwrap();
        assert!(remainder.is_empty());
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].value(), &Variable::from_str("x"));
        assert_eq!(list[1].type_(), &Type::from("block"));
        assert_eq!(list[2].type_(), &Type::object());
    }
}
