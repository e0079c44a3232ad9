use super::backwards::term_cases;
use crate::search::cnf::junction;
use crate::search::effects::{equalities, unify_atoms, InstantiatedEffect, PrimitiveEffect};
use crate::search::{AssignOperator, Atom, Comparison, Expression, NumericExpression, Term};
use std::collections::BTreeMap;

/// An assignment that may change one of the functions a comparison reads.
struct Candidate<'a> {
    function: &'a Atom,
    operator: AssignOperator,
    value: &'a NumericExpression,
    fires: Expression,
}

/// Regresses a numeric comparison through numeric assignments.
///
/// Every assignment whose target may be one of the compared functions is
/// either certain to fire or not. The uncertain ones are case split: for each
/// subset of them firing, the firing assignments are composed in effect order
/// onto the function they change, and the comparison is rewritten over the
/// composed expressions. The result is the disjunction of the cases, each
/// guarded by which assignments fire.
///
/// Object-function terms among the arguments of the compared functions are
/// regressed first, so that the assignments are matched against the
/// functions as they read before the operator.
pub struct NumericAssignmentsBackwardsReplacer;

impl NumericAssignmentsBackwardsReplacer {
    pub fn replace(
        comparison: Comparison,
        a: &NumericExpression,
        b: &NumericExpression,
        effects: &[InstantiatedEffect],
    ) -> Expression {
        let mut functions: Vec<&Atom> = a.functions().into_iter().chain(b.functions()).collect();
        functions.sort();
        functions.dedup();
        let arguments: Vec<Term> = functions
            .iter()
            .flat_map(|function| function.terms.iter().cloned())
            .collect();

        let cases = term_cases(&arguments, effects)
            .into_iter()
            .map(|(mut guard, regressed)| {
                let mut regressed = regressed.into_iter();
                let rewritten: BTreeMap<&Atom, Atom> = functions
                    .iter()
                    .map(|&function| {
                        let terms = regressed.by_ref().take(function.arity()).collect();
                        (function, Atom::new(function.name_id, terms))
                    })
                    .collect();
                let rewrite = |expression: &NumericExpression| {
                    expression.map_functions(&|atom| {
                        NumericExpression::Function(
                            rewritten.get(atom).cloned().unwrap_or_else(|| atom.clone()),
                        )
                    })
                };
                guard.push(Self::replace_resolved(
                    comparison,
                    &rewrite(a),
                    &rewrite(b),
                    effects,
                ));
                junction(true, guard)
            })
            .collect();
        junction(false, cases)
    }

    /// Regression of a comparison whose function arguments already read as
    /// before the operator.
    fn replace_resolved(
        comparison: Comparison,
        a: &NumericExpression,
        b: &NumericExpression,
        effects: &[InstantiatedEffect],
    ) -> Expression {
        let mut functions: Vec<&Atom> = a.functions().into_iter().chain(b.functions()).collect();
        functions.sort();
        functions.dedup();

        let mut candidates = vec![];
        for effect in effects {
            let PrimitiveEffect::NumericAssign {
                operator,
                function: target,
                value,
            } = &effect.primitive
            else {
                continue;
            };
            for &function in &functions {
                let Some(constraints) = unify_atoms(target, function) else {
                    continue;
                };
                let fires = junction(
                    true,
                    effect
                        .condition
                        .iter()
                        .cloned()
                        .chain(equalities(&constraints))
                        .collect(),
                );
                if fires != Expression::Truth(false) {
                    candidates.push(Candidate {
                        function,
                        operator: *operator,
                        value,
                        fires,
                    });
                }
            }
        }

        let uncertain: Vec<usize> = (0..candidates.len())
            .filter(|&i| candidates[i].fires != Expression::Truth(true))
            .collect();

        let mut cases = vec![];
        for mask in 0..(1usize << uncertain.len()) {
            let mut guard = vec![];
            let mut firing = vec![true; candidates.len()];
            for (bit, &i) in uncertain.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    guard.push(candidates[i].fires.clone());
                } else {
                    guard.push(Expression::not(candidates[i].fires.clone()));
                    firing[i] = false;
                }
            }

            let mut values: BTreeMap<&Atom, NumericExpression> = BTreeMap::new();
            for (candidate, _) in candidates.iter().zip(&firing).filter(|(_, fires)| **fires) {
                let current = values
                    .remove(candidate.function)
                    .unwrap_or_else(|| NumericExpression::Function(candidate.function.clone()));
                values.insert(
                    candidate.function,
                    candidate.operator.compose(current, candidate.value.clone()),
                );
            }
            let replace = |expression: &NumericExpression| {
                expression
                    .map_functions(&|atom| {
                        values
                            .get(atom)
                            .cloned()
                            .unwrap_or_else(|| NumericExpression::Function(atom.clone()))
                    })
                    .simplified()
            };
            let (a, b) = (replace(a), replace(b));
            let compared = match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => Expression::Truth(comparison.holds(x, y)),
                _ => Expression::NumericCompare(comparison, a, b),
            };
            guard.push(compared);
            cases.push(junction(true, guard));
        }
        junction(false, cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(
        operator: AssignOperator,
        function: Atom,
        value: f64,
        condition: Option<Expression>,
    ) -> InstantiatedEffect {
        InstantiatedEffect {
            entry: 0,
            index: 0,
            conditional: condition.is_some(),
            condition,
            primitive: PrimitiveEffect::NumericAssign {
                operator,
                function,
                value: NumericExpression::number(value),
            },
        }
    }

    #[test]
    fn certain_assignments_compose_in_order() {
        let counter = Atom::new_grounded(0, &[]);
        let effects = vec![
            assignment(AssignOperator::Increase, counter.clone(), 5.0, None),
            assignment(AssignOperator::ScaleUp, counter.clone(), 2.0, None),
        ];
        let regressed = NumericAssignmentsBackwardsReplacer::replace(
            Comparison::Ge,
            &NumericExpression::Function(counter.clone()),
            &NumericExpression::number(20.0),
            &effects,
        );
        let expected = NumericExpression::Multiply(vec![
            NumericExpression::Plus(vec![
                NumericExpression::Function(counter),
                NumericExpression::number(5.0),
            ]),
            NumericExpression::number(2.0),
        ])
        .simplified();
        assert_eq!(
            regressed,
            Expression::NumericCompare(Comparison::Ge, expected, NumericExpression::number(20.0))
        );
    }

    #[test]
    fn unrelated_functions_are_untouched() {
        let counter = Atom::new_grounded(0, &[]);
        let other = Atom::new_grounded(1, &[]);
        let effects = vec![assignment(AssignOperator::Assign, other, 3.0, None)];
        let regressed = NumericAssignmentsBackwardsReplacer::replace(
            Comparison::Lt,
            &NumericExpression::Function(counter.clone()),
            &NumericExpression::number(1.0),
            &effects,
        );
        assert_eq!(
            regressed,
            Expression::NumericCompare(
                Comparison::Lt,
                NumericExpression::Function(counter),
                NumericExpression::number(1.0)
            )
        );
    }

    #[test]
    fn uncertain_assignments_split_into_cases() {
        // (fuel ?t) = 7 regressed through (assign (fuel c1) 7)
        let lifted = Atom::new(0, vec![Term::Variable(4)]);
        let effects = vec![assignment(
            AssignOperator::Assign,
            Atom::new_grounded(0, &[1]),
            7.0,
            None,
        )];
        let regressed = NumericAssignmentsBackwardsReplacer::replace(
            Comparison::Eq,
            &NumericExpression::Function(lifted.clone()),
            &NumericExpression::number(7.0),
            &effects,
        );
        let fires = Expression::Equals(Term::Constant(1), Term::Variable(4));
        assert_eq!(
            regressed,
            Expression::Or(vec![
                Expression::And(vec![
                    Expression::not(fires.clone()),
                    Expression::NumericCompare(
                        Comparison::Eq,
                        NumericExpression::Function(lifted),
                        NumericExpression::number(7.0)
                    ),
                ]),
                fires,
            ])
        );
    }

    #[test]
    fn object_function_arguments_are_regressed_first() {
        // (fuel (holder)) >= 5 regressed through (assign (holder) c2)
        let holder = Atom::new_grounded(1, &[]);
        let read = Atom::new(0, vec![Term::ObjectFunction(holder.clone())]);
        let effects = vec![InstantiatedEffect {
            entry: 0,
            index: 0,
            conditional: false,
            condition: None,
            primitive: PrimitiveEffect::ObjectAssign {
                function: holder,
                value: Term::Constant(2),
            },
        }];
        let regressed = NumericAssignmentsBackwardsReplacer::replace(
            Comparison::Ge,
            &NumericExpression::Function(read.clone()),
            &NumericExpression::number(5.0),
            &effects,
        );
        let compare = |function: Atom| {
            Expression::NumericCompare(
                Comparison::Ge,
                NumericExpression::Function(function),
                NumericExpression::number(5.0),
            )
        };
        assert_eq!(
            regressed,
            Expression::Or(vec![
                compare(Atom::new_grounded(0, &[2])),
                Expression::And(vec![Expression::not(Expression::Truth(true)), compare(read)]),
            ])
        );
    }
}
