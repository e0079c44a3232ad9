use crate::search::cnf::{Clause, Literal, Proposition};
use crate::search::Expression;
use std::collections::BTreeSet;

/// Distributes disjunctions over conjunctions of an expression in negation
/// normal form. The result can be exponentially larger than the input; it is
/// never truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct CnfTransformer;

impl CnfTransformer {
    /// The clauses of the expression, without tautologies or clauses
    /// subsumed by others. No clauses means true; an empty clause means
    /// false, and is then the only clause.
    pub fn transform(&self, nnf: &Expression) -> BTreeSet<Clause> {
        reduce(distribute(nnf))
    }
}

fn distribute(expression: &Expression) -> BTreeSet<Clause> {
    match expression {
        Expression::Truth(true) => BTreeSet::new(),
        Expression::Truth(false) => BTreeSet::from([Clause::default()]),
        Expression::And(values) => values.iter().flat_map(distribute).collect(),
        Expression::Or(values) => {
            let mut product = BTreeSet::from([Clause::default()]);
            for value in values {
                let clauses = distribute(value);
                product = product
                    .iter()
                    .flat_map(|left| clauses.iter().map(move |right| left.union(right)))
                    .filter(|clause| !clause.is_tautology())
                    .collect();
                if product.is_empty() {
                    break;
                }
            }
            product
        }
        Expression::Not(inner) => BTreeSet::from([Clause::unit(Literal::Negative(
            proposition(inner).expect("negation of a non-atomic expression in NNF"),
        ))]),
        _ => BTreeSet::from([Clause::unit(Literal::Positive(
            proposition(expression).expect("quantifier or implication left in NNF"),
        ))]),
    }
}

fn proposition(expression: &Expression) -> Option<Proposition> {
    match expression {
        Expression::Predicate(atom) => Some(Proposition::Predicate(atom.clone())),
        Expression::Equals(a, b) => Some(Proposition::Equals(a.clone(), b.clone())),
        Expression::NumericCompare(comparison, a, b) => {
            Some(Proposition::NumericCompare(*comparison, a.clone(), b.clone()))
        }
        _ => None,
    }
}

/// Removes tautologies and subsumed clauses.
pub(crate) fn reduce(clauses: BTreeSet<Clause>) -> BTreeSet<Clause> {
    if clauses.iter().any(|clause| clause.is_empty()) {
        return BTreeSet::from([Clause::default()]);
    }
    let mut sorted: Vec<Clause> = clauses
        .into_iter()
        .filter(|clause| !clause.is_tautology())
        .collect();
    sorted.sort_by_key(|clause| clause.len());
    let mut kept: Vec<Clause> = vec![];
    for clause in sorted {
        if !kept.iter().any(|smaller| smaller.subsumes(&clause)) {
            kept.push(clause);
        }
    }
    kept.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Atom;

    fn p(constant: usize) -> Expression {
        Expression::Predicate(Atom::new_grounded(0, &[constant]))
    }

    fn positive(constant: usize) -> Literal {
        Literal::Positive(Proposition::Predicate(Atom::new_grounded(0, &[constant])))
    }

    #[test]
    fn distribution() {
        // (or (and p0 p1) p2) = (and (or p0 p2) (or p1 p2))
        let expression = Expression::or([Expression::and([p(0), p(1)]), p(2)]);
        let clauses = CnfTransformer.transform(&expression);
        let expected: BTreeSet<Clause> = [
            [positive(0), positive(2)].into_iter().collect(),
            [positive(1), positive(2)].into_iter().collect(),
        ]
        .into_iter()
        .collect();
        assert_eq!(clauses, expected);
    }

    #[test]
    fn subsumed_clauses_and_tautologies_are_removed() {
        // (and (or p0 p1) p0 (or p2 (not p2)))
        let expression = Expression::and([
            Expression::or([p(0), p(1)]),
            p(0),
            Expression::or([p(2), Expression::not(p(2))]),
        ]);
        let clauses = CnfTransformer.transform(&expression);
        assert_eq!(clauses, BTreeSet::from([Clause::unit(positive(0))]));
    }

    #[test]
    fn truth_values() {
        assert!(CnfTransformer.transform(&Expression::Truth(true)).is_empty());
        let falsum = CnfTransformer.transform(&Expression::and([p(0), Expression::Truth(false)]));
        assert_eq!(falsum, BTreeSet::from([Clause::default()]));
    }
}
