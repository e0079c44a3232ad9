//! Provides parsers for terms.

use crate::parsed_types::Term;
use crate::parsers::{atom, parse_name, parse_variable, ParseResult, Span};
use nom::branch::alt;
use nom::combinator::map;

/// Parses a term, i.e. `<name> | <variable> | (<function> <term>*)`.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::{parse_term, preamble::*};
/// # use liftedreg::parsed_types::{Atom, Name, Term};
/// assert!(parse_term("abcde").is_value(Term::Name("abcde".into())));
/// assert!(parse_term("?abcde").is_value(Term::Variable("abcde".into())));
/// assert!(parse_term("(loc ?t)").is_value(Term::Function(Atom::new(
///     Name::new("loc"),
///     vec![Term::Variable("t".into())],
/// ))));
///```
pub fn parse_term<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Term> {
    alt((
        map(parse_variable, Term::Variable),
        map(parse_name, Term::Name),
        map(atom(parse_term), Term::Function),
    ))(input.into())
}

impl crate::parsers::Parser for Term {
    type Item = Term;

    /// See [`parse_term`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_term(input)
    }
}
