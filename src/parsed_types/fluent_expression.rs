//! Contains numeric and object-valued expressions via the
//! [`FluentExpression`] type.

use crate::parsed_types::Term;
use strum_macros::{Display, EnumString};

/// An expression built from numbers, terms and arithmetic. Object-valued
/// expressions are always a bare [`Term`]; whether a function term is numeric
/// or object-valued is resolved against the domain's function declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum FluentExpression {
    Number(f64),
    Term(Term),
    Plus(Vec<FluentExpression>),
    Minus(Box<FluentExpression>, Box<FluentExpression>),
    Multiply(Vec<FluentExpression>),
    Divide(Box<FluentExpression>, Box<FluentExpression>),
    Negate(Box<FluentExpression>),
}

impl FluentExpression {
    pub fn new_plus<T: IntoIterator<Item = FluentExpression>>(values: T) -> Self {
        Self::Plus(values.into_iter().collect())
    }

    pub fn new_minus(a: FluentExpression, b: FluentExpression) -> Self {
        Self::Minus(Box::new(a), Box::new(b))
    }

    pub fn new_multiply<T: IntoIterator<Item = FluentExpression>>(values: T) -> Self {
        Self::Multiply(values.into_iter().collect())
    }

    pub fn new_divide(a: FluentExpression, b: FluentExpression) -> Self {
        Self::Divide(Box::new(a), Box::new(b))
    }

    pub fn new_negate(a: FluentExpression) -> Self {
        Self::Negate(Box::new(a))
    }

    /// The bare term, if this expression is one.
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            FluentExpression::Term(term) => Some(term),
            _ => None,
        }
    }
}

/// Binary comparison operators usable in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum BinaryComparison {
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = "<=")]
    LessOrEquals,
    #[strum(serialize = "=")]
    Equals,
    #[strum(serialize = ">=")]
    GreaterOrEquals,
    #[strum(serialize = ">")]
    GreaterThan,
}

/// Assignment operators usable in effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AssignOperation {
    #[strum(serialize = "assign")]
    Assign,
    #[strum(serialize = "increase")]
    Increase,
    #[strum(serialize = "decrease")]
    Decrease,
    #[strum(serialize = "scale-up")]
    ScaleUp,
    #[strum(serialize = "scale-down")]
    ScaleDown,
}
