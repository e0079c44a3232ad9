//! Conditions in tree form, as they come out of the domain description.

use crate::parsed_types::BinaryComparison;
use crate::search::{Atom, IdManagers, NumericExpression, Parameters, Term, VariableId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Comparison {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

impl Comparison {
    pub fn holds(&self, a: f64, b: f64) -> bool {
        match self {
            Comparison::Lt => a < b,
            Comparison::Le => a <= b,
            Comparison::Eq => a == b,
            Comparison::Ge => a >= b,
            Comparison::Gt => a > b,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Eq => "=",
            Comparison::Ge => ">=",
            Comparison::Gt => ">",
        }
    }
}

impl From<BinaryComparison> for Comparison {
    fn from(value: BinaryComparison) -> Self {
        match value {
            BinaryComparison::LessThan => Comparison::Lt,
            BinaryComparison::LessOrEquals => Comparison::Le,
            BinaryComparison::Equals => Comparison::Eq,
            BinaryComparison::GreaterOrEquals => Comparison::Ge,
            BinaryComparison::GreaterThan => Comparison::Gt,
        }
    }
}

/// A logical expression over predicates, object equalities and numeric
/// comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expression {
    Truth(bool),
    Predicate(Atom),
    Equals(Term, Term),
    NumericCompare(Comparison, NumericExpression, NumericExpression),
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not(Box<Expression>),
    Imply(Box<Expression>, Box<Expression>),
    Exists(Parameters, Box<Expression>),
    ForAll(Parameters, Box<Expression>),
}

impl Expression {
    pub fn and<I: IntoIterator<Item = Expression>>(values: I) -> Self {
        Expression::And(values.into_iter().collect())
    }

    pub fn or<I: IntoIterator<Item = Expression>>(values: I) -> Self {
        Expression::Or(values.into_iter().collect())
    }

    pub fn not(value: Expression) -> Self {
        Expression::Not(Box::new(value))
    }

    /// Variables occurring in the expression that no quantifier inside it
    /// binds.
    pub fn free_variables(&self) -> BTreeSet<VariableId> {
        let mut variables = BTreeSet::new();
        self.collect_free_variables(&mut variables, &mut vec![]);
        variables
    }

    fn collect_free_variables(&self, free: &mut BTreeSet<VariableId>, bound: &mut Vec<VariableId>) {
        let mut found = BTreeSet::new();
        match self {
            Expression::Truth(_) => {}
            Expression::Predicate(atom) => atom.collect_variables(&mut found),
            Expression::Equals(a, b) => {
                a.collect_variables(&mut found);
                b.collect_variables(&mut found);
            }
            Expression::NumericCompare(_, a, b) => {
                a.collect_variables(&mut found);
                b.collect_variables(&mut found);
            }
            Expression::And(values) | Expression::Or(values) => {
                for value in values {
                    value.collect_free_variables(free, bound);
                }
            }
            Expression::Not(value) => value.collect_free_variables(free, bound),
            Expression::Imply(a, b) => {
                a.collect_free_variables(free, bound);
                b.collect_free_variables(free, bound);
            }
            Expression::Exists(parameters, value) | Expression::ForAll(parameters, value) => {
                let depth = bound.len();
                bound.extend(parameters.variable_ids());
                value.collect_free_variables(free, bound);
                bound.truncate(depth);
            }
        }
        free.extend(found.into_iter().filter(|v| !bound.contains(v)));
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        let join = |values: &[Expression]| {
            values
                .iter()
                .map(|v| v.human_readable(symbols))
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            Expression::Truth(true) => "(and)".to_string(),
            Expression::Truth(false) => "(or)".to_string(),
            Expression::Predicate(atom) => atom.human_readable_predicate(symbols),
            Expression::Equals(a, b) => format!(
                "(= {} {})",
                a.human_readable(symbols),
                b.human_readable(symbols)
            ),
            Expression::NumericCompare(comparison, a, b) => format!(
                "({} {} {})",
                comparison.symbol(),
                a.human_readable(symbols),
                b.human_readable(symbols)
            ),
            Expression::And(values) => format!("(and {})", join(values)),
            Expression::Or(values) => format!("(or {})", join(values)),
            Expression::Not(value) => format!("(not {})", value.human_readable(symbols)),
            Expression::Imply(a, b) => format!(
                "(imply {} {})",
                a.human_readable(symbols),
                b.human_readable(symbols)
            ),
            Expression::Exists(parameters, value) => format!(
                "(exists ({}) {})",
                parameters.human_readable(symbols),
                value.human_readable(symbols)
            ),
            Expression::ForAll(parameters, value) => format!(
                "(forall ({}) {})",
                parameters.human_readable(symbols),
                value.human_readable(symbols)
            ),
        }
    }
}

/// A conjunction of expressions over the given parameters, e.g. the
/// precondition of an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Conditions {
    pub parameters: Parameters,
    pub expressions: Vec<Expression>,
}

impl Conditions {
    pub fn new(parameters: Parameters, expressions: Vec<Expression>) -> Self {
        Self {
            parameters,
            expressions,
        }
    }

    pub fn to_expression(&self) -> Expression {
        match self.expressions.as_slice() {
            [single] => single.clone(),
            _ => Expression::And(self.expressions.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Parameter;

    #[test]
    fn quantified_variables_are_not_free() {
        // (exists (?1) (and (p ?0 ?1) (= ?2 c3)))
        let expression = Expression::Exists(
            Parameters::new(vec![Parameter::new(1, vec![])]),
            Box::new(Expression::and([
                Expression::Predicate(Atom::new(0, vec![Term::Variable(0), Term::Variable(1)])),
                Expression::Equals(Term::Variable(2), Term::Constant(3)),
            ])),
        );
        assert_eq!(expression.free_variables(), BTreeSet::from([0, 2]));
    }

    #[test]
    fn comparisons() {
        assert!(Comparison::Le.holds(1.0, 1.0));
        assert!(!Comparison::Lt.holds(1.0, 1.0));
        assert!(Comparison::from(BinaryComparison::GreaterThan).holds(2.0, 1.0));
    }
}
