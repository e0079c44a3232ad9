use crate::search::{Atom, ConstantId, Expression, Term, VariableId};
use std::collections::BTreeMap;

/// Conditions under which two atoms denote the same ground atom, as pairs of
/// terms that must be equal. `None` when they can never match: different
/// symbols, or distinct constants in the same position. Object-function terms
/// match anything and produce an equality constraint.
pub fn unify_atoms(a: &Atom, b: &Atom) -> Option<Vec<(Term, Term)>> {
    if a.name_id != b.name_id || a.arity() != b.arity() {
        return None;
    }
    let mut constraints = vec![];
    let mut bound: BTreeMap<VariableId, ConstantId> = BTreeMap::new();
    for (x, y) in a.terms.iter().zip(&b.terms) {
        match (x, y) {
            (Term::Constant(c1), Term::Constant(c2)) => {
                if c1 != c2 {
                    return None;
                }
            }
            _ if x == y => {}
            (Term::Variable(variable), Term::Constant(constant))
            | (Term::Constant(constant), Term::Variable(variable)) => {
                if let Some(previous) = bound.insert(*variable, *constant) {
                    if previous != *constant {
                        return None;
                    }
                }
                constraints.push((x.clone(), y.clone()));
            }
            _ => constraints.push((x.clone(), y.clone())),
        }
    }
    constraints.dedup();
    Some(constraints)
}

/// The conjunction of the equality constraints.
pub fn equalities(constraints: &[(Term, Term)]) -> Vec<Expression> {
    constraints
        .iter()
        .map(|(a, b)| Expression::Equals(a.clone(), b.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_constants_do_not_unify() {
        let a = Atom::new_grounded(0, &[1, 2]);
        let b = Atom::new_grounded(0, &[1, 3]);
        assert_eq!(unify_atoms(&a, &b), None);
        assert_eq!(unify_atoms(&a, &a), Some(vec![]));
        assert_eq!(unify_atoms(&a, &Atom::new_grounded(1, &[1, 2])), None);
    }

    #[test]
    fn variables_produce_constraints() {
        let a = Atom::new(0, vec![Term::Variable(5), Term::Constant(2)]);
        let b = Atom::new_grounded(0, &[1, 2]);
        assert_eq!(
            unify_atoms(&a, &b),
            Some(vec![(Term::Variable(5), Term::Constant(1))])
        );
    }

    #[test]
    fn variable_bound_twice_must_agree() {
        let a = Atom::new(0, vec![Term::Variable(5), Term::Variable(5)]);
        assert_eq!(unify_atoms(&a, &Atom::new_grounded(0, &[1, 2])), None);
        assert!(unify_atoms(&a, &Atom::new_grounded(0, &[1, 1])).is_some());
    }

    #[test]
    fn object_functions_unify_with_anything() {
        let holder = Term::ObjectFunction(Atom::new_grounded(3, &[4]));
        let a = Atom::new(0, vec![holder.clone()]);
        let b = Atom::new_grounded(0, &[1]);
        assert_eq!(
            unify_atoms(&a, &b),
            Some(vec![(holder, Term::Constant(1))])
        );
    }
}
