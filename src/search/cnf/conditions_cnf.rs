use crate::search::cnf::cnf_transformer::reduce;
use crate::search::cnf::{Clause, CnfTransformer, Literal, NnfTransformer, Proposition, Rename};
use crate::search::evaluation::{EvaluationManager, RigidRelations};
use crate::search::{
    Conditions, Expression, IdManagers, Parameters, State, Term, TypeHierarchy, VariableId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Conditions in conjunctive normal form.
///
/// Variables left in the clauses are listed in `parameters` and quantified
/// existentially: the conditions hold if some assignment of admissible
/// constants to them satisfies every clause. No clauses means true, an empty
/// clause means false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConditionsCnf {
    clauses: BTreeSet<Clause>,
    parameters: Parameters,
}

impl ConditionsCnf {
    pub fn new(clauses: BTreeSet<Clause>, parameters: Parameters) -> Self {
        Self {
            clauses,
            parameters,
        }
    }

    pub fn tautology() -> Self {
        Self::default()
    }

    pub fn contradiction() -> Self {
        Self::new(BTreeSet::from([Clause::default()]), Parameters::empty())
    }

    /// Converts an expression over `parameters`. Existential quantifiers at
    /// the top of the expression, possibly below conjunctions, become
    /// parameters; every other quantifier is instantiated.
    pub fn from_expression(
        expression: &Expression,
        parameters: Parameters,
        hierarchy: &TypeHierarchy,
    ) -> Self {
        let mut parameters = parameters;
        let hoisted = hoist_existentials(expression, &mut parameters);
        let nnf = NnfTransformer::new(hierarchy).transform(&hoisted);
        Self::new(CnfTransformer.transform(&nnf), parameters)
    }

    pub fn from_conditions(conditions: &Conditions, hierarchy: &TypeHierarchy) -> Self {
        Self::from_expression(
            &conditions.to_expression(),
            conditions.parameters.clone(),
            hierarchy,
        )
    }

    pub fn clauses(&self) -> &BTreeSet<Clause> {
        &self.clauses
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.clauses.iter().flat_map(|clause| clause.iter())
    }

    /// True without any clause.
    pub fn is_tautology(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn is_contradictory(&self) -> bool {
        self.clauses.iter().any(|clause| clause.is_empty())
    }

    pub fn variables(&self) -> BTreeSet<VariableId> {
        let mut variables = BTreeSet::new();
        for literal in self.literals() {
            literal.underlying().collect_variables(&mut variables);
        }
        variables
    }

    pub fn max_variable_id(&self) -> Option<VariableId> {
        self.variables()
            .into_iter()
            .chain(self.parameters.variable_ids())
            .max()
    }

    /// Gives the parameters consecutive ids from `base`.
    pub fn renamed(&self, base: VariableId) -> (ConditionsCnf, BTreeMap<VariableId, VariableId>) {
        let (parameters, mapping) = self.parameters.renamed(base);
        let clauses = self
            .clauses
            .iter()
            .map(|clause| clause.rename_variables(&mapping))
            .collect();
        (ConditionsCnf::new(clauses, parameters), mapping)
    }

    /// The conjunction of both conditions. If their parameters share ids,
    /// `other` is first renamed past the largest id used by either.
    pub fn merge(&self, other: &ConditionsCnf) -> ConditionsCnf {
        let other = if self.parameters.is_conflicted_with(&other.parameters) {
            let base = self
                .max_variable_id()
                .max(other.max_variable_id())
                .map_or(0, |id| id + 1);
            other.renamed(base).0
        } else {
            other.clone()
        };
        ConditionsCnf::new(
            reduce(self.clauses.union(&other.clauses).cloned().collect()),
            self.parameters.merged(&other.parameters),
        )
    }

    /// Decides the literals over rigid predicates and equalities between
    /// constants, dropping satisfied clauses and false literals.
    pub fn simplified(&self, rigid: &RigidRelations) -> ConditionsCnf {
        let mut clauses = BTreeSet::new();
        for clause in &self.clauses {
            let mut simplified = Clause::default();
            let mut satisfied = false;
            for literal in clause.iter() {
                match fixed_truth(literal.underlying(), rigid) {
                    Some(truth) if truth != literal.is_negated() => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => simplified.insert(literal.clone()),
                }
            }
            if !satisfied {
                clauses.insert(simplified);
            }
        }
        ConditionsCnf::new(reduce(clauses), self.parameters.clone())
    }

    /// Drops parameters not occurring in any clause.
    pub fn without_unused_parameters(&self) -> ConditionsCnf {
        let variables = self.variables();
        ConditionsCnf::new(
            self.clauses.clone(),
            self.parameters.filtered(|v| variables.contains(&v)),
        )
    }

    /// The clauses as an expression, ignoring the parameters.
    pub fn matrix_expression(&self) -> Expression {
        match self.clauses.len() {
            1 => self
                .clauses
                .iter()
                .next()
                .map_or(Expression::Truth(true), |c| c.to_expression()),
            _ => Expression::And(self.clauses.iter().map(|c| c.to_expression()).collect()),
        }
    }

    pub fn to_expression(&self) -> Expression {
        if self.parameters.is_empty() {
            self.matrix_expression()
        } else {
            Expression::Exists(self.parameters.clone(), Box::new(self.matrix_expression()))
        }
    }

    pub fn not_accomplished_constraints_count(
        &self,
        state: &State,
        evaluation: &EvaluationManager,
    ) -> usize {
        evaluation.not_accomplished_constraints_count(self, state)
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.to_expression().human_readable(symbols)
    }
}

fn hoist_existentials(expression: &Expression, parameters: &mut Parameters) -> Expression {
    match expression {
        Expression::And(values) => Expression::And(
            values
                .iter()
                .map(|v| hoist_existentials(v, parameters))
                .collect(),
        ),
        Expression::Exists(quantified, value) => {
            for parameter in quantified.iter() {
                parameters.push(parameter.clone());
            }
            hoist_existentials(value, parameters)
        }
        other => other.clone(),
    }
}

fn fixed_truth(proposition: &Proposition, rigid: &RigidRelations) -> Option<bool> {
    match proposition {
        Proposition::Predicate(atom) => rigid.predicate_truth(atom),
        Proposition::Equals(Term::Constant(a), Term::Constant(b)) => Some(a == b),
        Proposition::Equals(Term::Variable(a), Term::Variable(b)) if a == b => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Atom, Parameter, PredicateId};

    fn hierarchy() -> TypeHierarchy {
        TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 2])
    }

    fn predicate(id: PredicateId, terms: Vec<Term>) -> Expression {
        Expression::Predicate(Atom::new(id, terms))
    }

    #[test]
    fn top_level_existentials_become_parameters() {
        let expression = Expression::and([
            predicate(0, vec![Term::Constant(0)]),
            Expression::Exists(
                Parameters::new(vec![Parameter::new(3, vec![])]),
                Box::new(predicate(1, vec![Term::Variable(3)])),
            ),
        ]);
        let cnf = ConditionsCnf::from_expression(&expression, Parameters::empty(), &hierarchy());
        assert_eq!(cnf.parameters().variable_ids().collect::<Vec<_>>(), vec![3]);
        assert_eq!(cnf.clauses().len(), 2);

        // below a negation the quantifier is instantiated instead
        let negated = Expression::not(expression);
        let cnf = ConditionsCnf::from_expression(&negated, Parameters::empty(), &hierarchy());
        assert!(cnf.parameters().is_empty());
        assert!(cnf.variables().is_empty());
    }

    #[test]
    fn merging_renames_conflicting_parameters() {
        let parameters = Parameters::new(vec![Parameter::new(0, vec![])]);
        let first = ConditionsCnf::from_expression(
            &predicate(0, vec![Term::Variable(0)]),
            parameters.clone(),
            &hierarchy(),
        );
        let second = ConditionsCnf::from_expression(
            &predicate(1, vec![Term::Variable(0)]),
            parameters,
            &hierarchy(),
        );
        let merged = first.merge(&second);
        assert_eq!(merged.parameters().len(), 2);
        assert_eq!(merged.variables(), BTreeSet::from([0, 1]));
        assert!(merged.clauses().contains(&Clause::unit(Literal::Positive(
            Proposition::Predicate(Atom::new(1, vec![Term::Variable(1)]))
        ))));
    }

    #[test]
    fn rigid_simplification() {
        let rigid = RigidRelations::new(
            BTreeSet::from([0]),
            BTreeSet::from([Atom::new_grounded(0, &[0])]),
            BTreeSet::new(),
        );
        // (and (or (p0 c1) (q c0)) (p0 c0) (not (p0 c1)))
        let expression = Expression::and([
            Expression::or([
                predicate(0, vec![Term::Constant(1)]),
                predicate(1, vec![Term::Constant(0)]),
            ]),
            predicate(0, vec![Term::Constant(0)]),
            Expression::not(predicate(0, vec![Term::Constant(1)])),
        ]);
        let cnf = ConditionsCnf::from_expression(&expression, Parameters::empty(), &hierarchy())
            .simplified(&rigid);
        assert_eq!(
            cnf.clauses(),
            &BTreeSet::from([Clause::unit(Literal::Positive(Proposition::Predicate(
                Atom::new_grounded(1, &[0])
            )))])
        );

        let impossible = ConditionsCnf::from_expression(
            &predicate(0, vec![Term::Constant(1)]),
            Parameters::empty(),
            &hierarchy(),
        )
        .simplified(&rigid);
        assert!(impossible.is_contradictory());
    }
}
