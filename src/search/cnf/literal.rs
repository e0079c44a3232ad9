use crate::search::{Atom, Comparison, Expression, IdManagers, Negatable, NumericExpression, Term};
use crate::search::VariableId;
use std::collections::BTreeSet;
use std::ops::Deref;

/// An atomic condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Proposition {
    Predicate(Atom),
    Equals(Term, Term),
    NumericCompare(Comparison, NumericExpression, NumericExpression),
}

impl Proposition {
    pub fn is_grounded(&self) -> bool {
        match self {
            Proposition::Predicate(atom) => atom.is_grounded(),
            Proposition::Equals(a, b) => a.is_grounded() && b.is_grounded(),
            Proposition::NumericCompare(_, a, b) => a.is_grounded() && b.is_grounded(),
        }
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        match self {
            Proposition::Predicate(atom) => atom.collect_variables(variables),
            Proposition::Equals(a, b) => {
                a.collect_variables(variables);
                b.collect_variables(variables);
            }
            Proposition::NumericCompare(_, a, b) => {
                a.collect_variables(variables);
                b.collect_variables(variables);
            }
        }
    }

    pub fn to_expression(&self) -> Expression {
        match self {
            Proposition::Predicate(atom) => Expression::Predicate(atom.clone()),
            Proposition::Equals(a, b) => Expression::Equals(a.clone(), b.clone()),
            Proposition::NumericCompare(comparison, a, b) => {
                Expression::NumericCompare(*comparison, a.clone(), b.clone())
            }
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.to_expression().human_readable(symbols)
    }
}

pub type Literal = Negatable<Proposition>;

impl Literal {
    pub fn to_expression(&self) -> Expression {
        match self {
            Negatable::Positive(proposition) => proposition.to_expression(),
            Negatable::Negative(proposition) => Expression::not(proposition.to_expression()),
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.to_expression().human_readable(symbols)
    }
}

/// A disjunction of literals. The empty clause is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause(BTreeSet<Literal>);

impl Clause {
    pub fn new(literals: BTreeSet<Literal>) -> Self {
        Self(literals)
    }

    pub fn unit(literal: Literal) -> Self {
        Self(BTreeSet::from([literal]))
    }

    pub fn is_unit(&self) -> bool {
        self.0.len() == 1
    }

    pub fn insert(&mut self, literal: Literal) {
        self.0.insert(literal);
    }

    pub fn union(&self, other: &Clause) -> Clause {
        Clause(self.0.union(&other.0).cloned().collect())
    }

    /// Whether the clause contains a literal and its complement.
    pub fn is_tautology(&self) -> bool {
        self.0
            .iter()
            .any(|l| !l.is_negated() && self.0.contains(&l.clone().negated()))
    }

    /// Whether every literal of `self` is in `other`, making `other`
    /// redundant in a conjunction with `self`.
    pub fn subsumes(&self, other: &Clause) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn to_expression(&self) -> Expression {
        match self.0.len() {
            1 => self.0.iter().next().map_or(Expression::Truth(false), |l| l.to_expression()),
            _ => Expression::Or(self.0.iter().map(|l| l.to_expression()).collect()),
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.to_expression().human_readable(symbols)
    }
}

impl Deref for Clause {
    type Target = BTreeSet<Literal>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

impl IntoIterator for Clause {
    type Item = Literal;
    type IntoIter = std::collections::btree_set::IntoIter<Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
