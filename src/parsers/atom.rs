//! Provides parsers for atoms.

use crate::parsed_types::Atom;
use crate::parsers::{parens, parse_name, space_separated_list0, ParseResult, Span};
use nom::combinator::map;
use nom::sequence::tuple;

/// Parses an atom, i.e. `(<name> t*)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{atom, parse_name, preamble::*};
/// # use liftedreg::parsed_types::*;
/// assert!(atom(parse_name)(Span::new("(move a b)")).is_value(
///     Atom::new(Name::from("move"), vec!["a".into(), "b".into()])
/// ));
/// assert!(atom(parse_name)(Span::new("(total-cost)")).is_value(
///     Atom::new(Name::from("total-cost"), vec![])
/// ));
/// ```
pub fn atom<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, Atom<O>>
where
    F: Clone + FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    map(
        parens(tuple((parse_name, space_separated_list0(inner)))),
        |(name, values)| Atom::new(name, values),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::Term;
    use crate::parsers::parse_term;

    #[test]
    fn nested_function_terms() {
        let input = "(at ?t (loc ?t))";
        let (_, atom) = atom(parse_term)(Span::new(input)).unwrap();
        assert_eq!(atom.values().len(), 2);
        assert!(matches!(atom.values()[1], Term::Function(_)));
    }
}
