//! Shallow and deep grounding.
//!
//! [`Ground`] replaces every variable bound by the substitution and leaves
//! the others in place, so partially lifted values stay usable for regression
//! and relevance checks. [`GroundDeep`] additionally resolves object-function
//! terms whose arguments are constants against a reference state, innermost
//! first, so `(f (g ?x))` becomes a constant once both values are known.

use crate::search::cnf::{Clause, ConditionsCnf, Literal, Proposition};
use crate::search::effects::PrimitiveEffect;
use crate::search::{
    Atom, Conditions, Expression, FunctionValues, NumericExpression, Substitution, Term,
};

pub trait Ground {
    fn ground(&self, substitution: &Substitution) -> Self;
}

pub trait GroundDeep {
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self;
}

impl Ground for Term {
    fn ground(&self, substitution: &Substitution) -> Self {
        match self {
            Term::Constant(_) => self.clone(),
            Term::Variable(variable) => match substitution.value(*variable) {
                Some(constant) => Term::Constant(constant),
                None => self.clone(),
            },
            Term::ObjectFunction(atom) => Term::ObjectFunction(atom.ground(substitution)),
        }
    }
}

impl GroundDeep for Term {
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self {
        match self {
            Term::ObjectFunction(atom) => {
                let atom = atom.ground_deep(substitution, state);
                if atom.is_fully_resolved() {
                    if let Some(constant) = state.object_value(&atom) {
                        return Term::Constant(constant);
                    }
                }
                Term::ObjectFunction(atom)
            }
            _ => self.ground(substitution),
        }
    }
}

impl Ground for Atom {
    fn ground(&self, substitution: &Substitution) -> Self {
        Atom::new(
            self.name_id,
            self.terms.iter().map(|t| t.ground(substitution)).collect(),
        )
    }
}

impl GroundDeep for Atom {
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self {
        Atom::new(
            self.name_id,
            self.terms
                .iter()
                .map(|t| t.ground_deep(substitution, state))
                .collect(),
        )
    }
}

impl Ground for NumericExpression {
    fn ground(&self, substitution: &Substitution) -> Self {
        self.map_functions(&|atom| NumericExpression::Function(atom.ground(substitution)))
    }
}

impl GroundDeep for NumericExpression {
    /// Resolves the arguments of the numeric functions, not their values.
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self {
        self.map_functions(&|atom| {
            NumericExpression::Function(atom.ground_deep(substitution, state))
        })
    }
}

fn ground_expression<F, N, T>(expression: &Expression, atom: &F, numeric: &N, term: &T) -> Expression
where
    F: Fn(&Atom) -> Atom,
    N: Fn(&NumericExpression) -> NumericExpression,
    T: Fn(&Term) -> Term,
{
    let recurse = |e: &Expression| ground_expression(e, atom, numeric, term);
    match expression {
        Expression::Truth(_) => expression.clone(),
        Expression::Predicate(a) => Expression::Predicate(atom(a)),
        Expression::Equals(a, b) => Expression::Equals(term(a), term(b)),
        Expression::NumericCompare(comparison, a, b) => {
            Expression::NumericCompare(*comparison, numeric(a), numeric(b))
        }
        Expression::And(values) => Expression::And(values.iter().map(recurse).collect()),
        Expression::Or(values) => Expression::Or(values.iter().map(recurse).collect()),
        Expression::Not(value) => Expression::not(recurse(value)),
        Expression::Imply(a, b) => Expression::Imply(Box::new(recurse(a)), Box::new(recurse(b))),
        Expression::Exists(parameters, value) => {
            Expression::Exists(parameters.clone(), Box::new(recurse(value)))
        }
        Expression::ForAll(parameters, value) => {
            Expression::ForAll(parameters.clone(), Box::new(recurse(value)))
        }
    }
}

impl Ground for Expression {
    fn ground(&self, substitution: &Substitution) -> Self {
        ground_expression(
            self,
            &|a: &Atom| a.ground(substitution),
            &|n: &NumericExpression| n.ground(substitution),
            &|t: &Term| t.ground(substitution),
        )
    }
}

impl GroundDeep for Expression {
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self {
        ground_expression(
            self,
            &|a: &Atom| a.ground_deep(substitution, state),
            &|n: &NumericExpression| n.ground_deep(substitution, state),
            &|t: &Term| t.ground_deep(substitution, state),
        )
    }
}

impl Ground for Conditions {
    /// Bound parameters are dropped from the parameter list.
    fn ground(&self, substitution: &Substitution) -> Self {
        Conditions::new(
            self.parameters.filtered(|v| !substitution.contains(v)),
            self.expressions
                .iter()
                .map(|e| e.ground(substitution))
                .collect(),
        )
    }
}

impl Ground for Proposition {
    fn ground(&self, substitution: &Substitution) -> Self {
        match self {
            Proposition::Predicate(atom) => Proposition::Predicate(atom.ground(substitution)),
            Proposition::Equals(a, b) => {
                Proposition::Equals(a.ground(substitution), b.ground(substitution))
            }
            Proposition::NumericCompare(comparison, a, b) => Proposition::NumericCompare(
                *comparison,
                a.ground(substitution),
                b.ground(substitution),
            ),
        }
    }
}

impl GroundDeep for Proposition {
    fn ground_deep<V: FunctionValues>(&self, substitution: &Substitution, state: &V) -> Self {
        match self {
            Proposition::Predicate(atom) => {
                Proposition::Predicate(atom.ground_deep(substitution, state))
            }
            Proposition::Equals(a, b) => Proposition::Equals(
                a.ground_deep(substitution, state),
                b.ground_deep(substitution, state),
            ),
            Proposition::NumericCompare(comparison, a, b) => Proposition::NumericCompare(
                *comparison,
                a.ground_deep(substitution, state),
                b.ground_deep(substitution, state),
            ),
        }
    }
}

impl Ground for Literal {
    fn ground(&self, substitution: &Substitution) -> Self {
        Literal::new(self.is_negated(), self.underlying().ground(substitution))
    }
}

impl Ground for Clause {
    fn ground(&self, substitution: &Substitution) -> Self {
        self.iter().map(|l| l.ground(substitution)).collect()
    }
}

impl Ground for ConditionsCnf {
    /// Bound parameters are dropped from the parameter list.
    fn ground(&self, substitution: &Substitution) -> Self {
        ConditionsCnf::new(
            self.clauses()
                .iter()
                .map(|c| c.ground(substitution))
                .collect(),
            self.parameters().filtered(|v| !substitution.contains(v)),
        )
    }
}

impl Ground for PrimitiveEffect {
    fn ground(&self, substitution: &Substitution) -> Self {
        match self {
            PrimitiveEffect::Add(atom) => PrimitiveEffect::Add(atom.ground(substitution)),
            PrimitiveEffect::Delete(atom) => PrimitiveEffect::Delete(atom.ground(substitution)),
            PrimitiveEffect::NumericAssign {
                operator,
                function,
                value,
            } => PrimitiveEffect::NumericAssign {
                operator: *operator,
                function: function.ground(substitution),
                value: value.ground(substitution),
            },
            PrimitiveEffect::ObjectAssign { function, value } => PrimitiveEffect::ObjectAssign {
                function: function.ground(substitution),
                value: value.ground(substitution),
            },
        }
    }
}
