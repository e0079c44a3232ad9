use crate::search::grounding::Ground;
use crate::search::{Expression, Substitution, Term, TypeHierarchy};

/// Pushes negations down to the atomic conditions.
///
/// Implications are rewritten to disjunctions, double negations vanish and
/// quantifiers are replaced by the disjunction (or conjunction) of their
/// instantiations over the admissible constants. Atomic conditions whose
/// truth is already known, e.g. an equality between two constants, are
/// folded into truth values.
#[derive(Debug, Clone, Copy)]
pub struct NnfTransformer<'a> {
    hierarchy: &'a TypeHierarchy,
}

impl<'a> NnfTransformer<'a> {
    pub fn new(hierarchy: &'a TypeHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn transform(&self, expression: &Expression) -> Expression {
        let mut substitution = Substitution::new();
        self.transform_with(expression, false, &mut substitution)
    }

    fn transform_with(
        &self,
        expression: &Expression,
        negated: bool,
        substitution: &mut Substitution,
    ) -> Expression {
        match expression {
            Expression::Truth(value) => Expression::Truth(*value != negated),
            Expression::Predicate(_) | Expression::Equals(..) | Expression::NumericCompare(..) => {
                let atomic = if substitution.is_empty() {
                    fold_atomic(expression.clone())
                } else {
                    fold_atomic(expression.ground(substitution))
                };
                match atomic {
                    Expression::Truth(value) => Expression::Truth(value != negated),
                    atomic if negated => Expression::not(atomic),
                    atomic => atomic,
                }
            }
            Expression::And(values) => junction(
                !negated,
                values
                    .iter()
                    .map(|v| self.transform_with(v, negated, substitution))
                    .collect(),
            ),
            Expression::Or(values) => junction(
                negated,
                values
                    .iter()
                    .map(|v| self.transform_with(v, negated, substitution))
                    .collect(),
            ),
            Expression::Not(value) => self.transform_with(value, !negated, substitution),
            Expression::Imply(a, b) => {
                let premise = self.transform_with(a, !negated, substitution);
                let conclusion = self.transform_with(b, negated, substitution);
                junction(negated, vec![premise, conclusion])
            }
            Expression::Exists(parameters, value) | Expression::ForAll(parameters, value) => {
                let universal = matches!(expression, Expression::ForAll(..));
                let mut instances = vec![];
                for binding in self.hierarchy.bindings(parameters) {
                    substitution.push_local(binding);
                    instances.push(self.transform_with(value, negated, substitution));
                    substitution.pop_local();
                }
                junction(universal != negated, instances)
            }
        }
    }
}

fn fold_atomic(expression: Expression) -> Expression {
    match expression {
        Expression::Equals(Term::Constant(a), Term::Constant(b)) => Expression::Truth(a == b),
        Expression::Equals(Term::Variable(a), Term::Variable(b)) if a == b => {
            Expression::Truth(true)
        }
        Expression::NumericCompare(comparison, a, b) => {
            let (a, b) = (a.simplified(), b.simplified());
            match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => Expression::Truth(comparison.holds(x, y)),
                _ => Expression::NumericCompare(comparison, a, b),
            }
        }
        other => other,
    }
}

/// Builds a flattened conjunction (`is_and`) or disjunction, absorbing truth
/// values.
pub(crate) fn junction(is_and: bool, values: Vec<Expression>) -> Expression {
    let mut flattened = vec![];
    for value in values {
        match value {
            Expression::Truth(truth) if truth == is_and => {}
            Expression::Truth(_) => return Expression::Truth(!is_and),
            Expression::And(inner) if is_and => flattened.extend(inner),
            Expression::Or(inner) if !is_and => flattened.extend(inner),
            other => flattened.push(other),
        }
    }
    match flattened.len() {
        0 => Expression::Truth(is_and),
        1 => flattened.swap_remove(0),
        _ if is_and => Expression::And(flattened),
        _ => Expression::Or(flattened),
    }
}

/// `true` when the expression is in negation normal form.
pub fn is_nnf(expression: &Expression) -> bool {
    match expression {
        Expression::Truth(_)
        | Expression::Predicate(_)
        | Expression::Equals(..)
        | Expression::NumericCompare(..) => true,
        Expression::Not(inner) => matches!(
            inner.as_ref(),
            Expression::Predicate(_) | Expression::Equals(..) | Expression::NumericCompare(..)
        ),
        Expression::And(values) | Expression::Or(values) => values.iter().all(is_nnf),
        Expression::Imply(..) | Expression::Exists(..) | Expression::ForAll(..) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Atom, NumericExpression, Parameter, Parameters};
    use std::collections::BTreeSet;

    fn p(term: Term) -> Expression {
        Expression::Predicate(Atom::new(0, vec![term]))
    }

    fn hierarchy() -> TypeHierarchy {
        // object(0) with constants 0, 1, 2
        TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 3])
    }

    #[test]
    fn de_morgan_and_double_negation() {
        let hierarchy = hierarchy();
        let transformer = NnfTransformer::new(&hierarchy);
        let expression = Expression::not(Expression::and([
            Expression::not(Expression::not(p(Term::Constant(0)))),
            Expression::Imply(
                Box::new(p(Term::Constant(1))),
                Box::new(p(Term::Constant(2))),
            ),
        ]));
        let nnf = transformer.transform(&expression);
        assert!(is_nnf(&nnf));
        assert_eq!(
            nnf,
            Expression::or([
                Expression::not(p(Term::Constant(0))),
                Expression::and([p(Term::Constant(1)), Expression::not(p(Term::Constant(2)))]),
            ])
        );
    }

    #[test]
    fn quantifiers_are_instantiated() {
        let hierarchy = hierarchy();
        let transformer = NnfTransformer::new(&hierarchy);
        let parameters = Parameters::new(vec![Parameter::new(9, vec![])]);
        let forall = Expression::ForAll(parameters.clone(), Box::new(p(Term::Variable(9))));
        assert_eq!(
            transformer.transform(&Expression::not(forall)),
            Expression::or((0..3).map(|c| Expression::not(p(Term::Constant(c)))))
        );

        let exists = Expression::Exists(
            parameters,
            Box::new(Expression::Equals(Term::Variable(9), Term::Constant(1))),
        );
        assert_eq!(transformer.transform(&exists), Expression::Truth(true));
    }

    #[test]
    fn constant_comparisons_fold() {
        let hierarchy = hierarchy();
        let transformer = NnfTransformer::new(&hierarchy);
        let expression = Expression::or([
            Expression::NumericCompare(
                crate::search::Comparison::Lt,
                NumericExpression::number(3.0),
                NumericExpression::number(1.0),
            ),
            p(Term::Constant(0)),
        ]);
        assert_eq!(transformer.transform(&expression), p(Term::Constant(0)));
    }
}
