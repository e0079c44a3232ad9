use crate::parsed_types::{Atom as ParsedAtom, InitElement, Name};
use crate::parsers::parse_init_element;
use crate::search::{
    Atom, ConstantId, IdManagers, ProblemError, RelativeState, State, Substitution, Term,
    VariableId,
};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};

/// Builds atoms, states and relative states from symbolic names, resolving
/// them against the symbol tables of a problem. Facts use the `:init`
/// syntax: `(on a b)`, `(= (fuel t1) 10)` or `(= (loc t1) depot)`.
#[derive(Debug, Clone, Copy)]
pub struct PrimitivesFactory<'a> {
    symbols: &'a IdManagers,
}

impl<'a> PrimitivesFactory<'a> {
    pub fn new(symbols: &'a IdManagers) -> Self {
        Self { symbols }
    }

    pub fn constant(&self, name: &str) -> Result<ConstantId, ProblemError> {
        let name = Name::new(name);
        self.symbols
            .constants
            .get_id(&name, 0)
            .ok_or(ProblemError::UnknownConstant(name))
    }

    pub fn term(&self, name: &str) -> Result<Term, ProblemError> {
        self.constant(name).map(Term::Constant)
    }

    /// The ground atom of a predicate, written `(name constants..)`.
    pub fn atom(&self, text: &str) -> Result<Atom, ProblemError> {
        match self.parse(text)? {
            InitElement::Atom(atom) => self.predicate_atom(&atom),
            _ => Err(ProblemError::Parse {
                what: "atom",
                message: text.to_string(),
            }),
        }
    }

    /// The ground atom of a numeric or object function, written
    /// `(name constants..)`.
    pub fn function(&self, text: &str) -> Result<Atom, ProblemError> {
        match self.parse(text)? {
            InitElement::Atom(atom) => self.function_atom(&atom),
            _ => Err(ProblemError::Parse {
                what: "function",
                message: text.to_string(),
            }),
        }
    }

    pub fn substitution(&self, bindings: &[(VariableId, &str)]) -> Result<Substitution, ProblemError> {
        bindings
            .iter()
            .map(|&(variable, name)| Ok((variable, self.constant(name)?)))
            .collect()
    }

    /// The state holding exactly the given facts.
    pub fn state(&self, facts: &[&str]) -> Result<State, ProblemError> {
        let mut predicates = BTreeSet::new();
        let mut numeric = BTreeMap::new();
        let mut objects = BTreeMap::new();
        for fact in facts {
            let element = self.parse(fact)?;
            self.add_init_element(&element, &mut predicates, &mut numeric, &mut objects)?;
        }
        Ok(State::new(predicates, numeric, objects))
    }

    /// The relative state fixing the given facts and the negation of the
    /// given atoms.
    pub fn relative_state(&self, facts: &[&str], negated: &[&str]) -> Result<RelativeState, ProblemError> {
        let mut relative = RelativeState::new();
        for fact in facts {
            let consistent = match self.parse(fact)? {
                InitElement::Atom(atom) => relative.add_literal(false, self.predicate_atom(&atom)?),
                InitElement::NumericAssign(function, value) => {
                    relative.set_numeric(self.function_atom(&function)?, value)
                }
                InitElement::ObjectAssign(function, value) => relative.set_object(
                    self.function_atom(&function)?,
                    self.constant(value.as_str())?,
                ),
            };
            if !consistent {
                return Err(ProblemError::Inconsistent(fact.to_string()));
            }
        }
        for atom in negated {
            if !relative.add_literal(true, self.atom(atom)?) {
                return Err(ProblemError::Inconsistent(atom.to_string()));
            }
        }
        Ok(relative)
    }

    /// Adds an element of `:init` to the parts of a state under construction.
    pub fn add_init_element(
        &self,
        element: &InitElement,
        predicates: &mut BTreeSet<Atom>,
        numeric: &mut BTreeMap<Atom, OrderedFloat<f64>>,
        objects: &mut BTreeMap<Atom, ConstantId>,
    ) -> Result<(), ProblemError> {
        match element {
            InitElement::Atom(atom) => {
                predicates.insert(self.predicate_atom(atom)?);
            }
            InitElement::NumericAssign(function, value) => {
                numeric.insert(self.function_atom(function)?, (*value).into());
            }
            InitElement::ObjectAssign(function, value) => {
                objects.insert(self.function_atom(function)?, self.constant(value.as_str())?);
            }
        }
        Ok(())
    }

    pub fn predicate_atom(&self, atom: &ParsedAtom<Name>) -> Result<Atom, ProblemError> {
        let predicate = self
            .symbols
            .predicates
            .get_id(atom.name(), atom.len())
            .ok_or(ProblemError::UnknownPredicate {
                name: *atom.name(),
                arity: atom.len(),
            })?;
        Ok(Atom::new_grounded(predicate, &self.constants(atom)?))
    }

    pub fn function_atom(&self, atom: &ParsedAtom<Name>) -> Result<Atom, ProblemError> {
        let function = self
            .symbols
            .functions
            .get_id(atom.name(), atom.len())
            .ok_or(ProblemError::UnknownFunction {
                name: *atom.name(),
                arity: atom.len(),
            })?;
        Ok(Atom::new_grounded(function, &self.constants(atom)?))
    }

    fn constants(&self, atom: &ParsedAtom<Name>) -> Result<Vec<ConstantId>, ProblemError> {
        atom.iter().map(|name| self.constant(name.as_str())).collect()
    }

    fn parse(&self, text: &str) -> Result<InitElement, ProblemError> {
        parse_init_element(text)
            .map(|(_, element)| element)
            .map_err(|e| ProblemError::Parse {
                what: "fact",
                message: format!("{text}: {e}"),
            })
    }
}
