use crate::search::cnf::{Clause, Literal, Proposition};
use crate::search::{Atom, Expression, NumericExpression, Parameter, Parameters, Term, VariableId};
use std::collections::BTreeMap;

/// Consistent renaming of variable ids. Variables missing from the mapping
/// keep their id.
pub trait Rename {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self;
}

impl Rename for Term {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        match self {
            Term::Constant(_) => self.clone(),
            Term::Variable(variable) => {
                Term::Variable(mapping.get(variable).copied().unwrap_or(*variable))
            }
            Term::ObjectFunction(atom) => Term::ObjectFunction(atom.rename_variables(mapping)),
        }
    }
}

impl Rename for Atom {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        Atom::new(
            self.name_id,
            self.terms
                .iter()
                .map(|t| t.rename_variables(mapping))
                .collect(),
        )
    }
}

impl Rename for NumericExpression {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        self.map_functions(&|atom| NumericExpression::Function(atom.rename_variables(mapping)))
    }
}

impl Rename for Parameters {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        self.iter()
            .map(|p| {
                Parameter::new(
                    mapping.get(&p.variable_id).copied().unwrap_or(p.variable_id),
                    p.type_ids.clone(),
                )
            })
            .collect()
    }
}

impl Rename for Expression {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        match self {
            Expression::Truth(_) => self.clone(),
            Expression::Predicate(atom) => Expression::Predicate(atom.rename_variables(mapping)),
            Expression::Equals(a, b) => {
                Expression::Equals(a.rename_variables(mapping), b.rename_variables(mapping))
            }
            Expression::NumericCompare(comparison, a, b) => Expression::NumericCompare(
                *comparison,
                a.rename_variables(mapping),
                b.rename_variables(mapping),
            ),
            Expression::And(values) => {
                Expression::And(values.iter().map(|v| v.rename_variables(mapping)).collect())
            }
            Expression::Or(values) => {
                Expression::Or(values.iter().map(|v| v.rename_variables(mapping)).collect())
            }
            Expression::Not(value) => Expression::not(value.rename_variables(mapping)),
            Expression::Imply(a, b) => Expression::Imply(
                Box::new(a.rename_variables(mapping)),
                Box::new(b.rename_variables(mapping)),
            ),
            Expression::Exists(parameters, value) => Expression::Exists(
                parameters.rename_variables(mapping),
                Box::new(value.rename_variables(mapping)),
            ),
            Expression::ForAll(parameters, value) => Expression::ForAll(
                parameters.rename_variables(mapping),
                Box::new(value.rename_variables(mapping)),
            ),
        }
    }
}

impl Rename for Proposition {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        match self {
            Proposition::Predicate(atom) => Proposition::Predicate(atom.rename_variables(mapping)),
            Proposition::Equals(a, b) => {
                Proposition::Equals(a.rename_variables(mapping), b.rename_variables(mapping))
            }
            Proposition::NumericCompare(comparison, a, b) => Proposition::NumericCompare(
                *comparison,
                a.rename_variables(mapping),
                b.rename_variables(mapping),
            ),
        }
    }
}

impl Rename for Literal {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        Literal::new(
            self.is_negated(),
            self.underlying().rename_variables(mapping),
        )
    }
}

impl Rename for Clause {
    fn rename_variables(&self, mapping: &BTreeMap<VariableId, VariableId>) -> Self {
        self.iter().map(|l| l.rename_variables(mapping)).collect()
    }
}
