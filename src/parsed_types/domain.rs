//! Contains the [`Domain`] type.

use crate::parsed_types::{
    ActionDefinition, FunctionDefinition, Name, Objects, PredicateDefinition, Requirements, Types,
};

/// The `Domain` type specifies a problem domain in which to plan.
///
/// ## Usage
/// This is the top-level type of a domain description. See also
/// [`Problem`](crate::parsed_types::Problem).
///
/// ## Example
/// ```
/// # use liftedreg::parsed_types::{Domain, Name};
/// # use liftedreg::parsers::Parser;
/// let input = r#"
/// (define
///     (domain sokoban)
///     (:requirements :typing)
///     (:types location direction box)
///
///     (:constants down up left right - direction)
///
///     (:predicates
///          (at-robot ?l - location)
///          (at ?o - box ?l - location)
///          (adjacent ?l1 - location ?l2 - location ?d - direction)
///          (clear ?l - location)
///     )
///
///     (:action move
///         :parameters (?from - location ?to - location ?dir - direction)
///         :precondition (and (clear ?to) (at-robot ?from) (adjacent ?from ?to ?dir))
///         :effect (and (at-robot ?to) (not (at-robot ?from)))
///     )
///)"#;
///
/// let domain = Domain::from_str(input).unwrap();
///
/// assert_eq!(domain.name(), &Name::new("sokoban"));
/// assert_eq!(domain.requirements().len(), 1);
/// assert_eq!(domain.types().len(), 3);
/// assert_eq!(domain.constants().len(), 4);
/// assert_eq!(domain.predicates().len(), 4);
/// assert_eq!(domain.actions().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// The domain name.
    name: Name,
    /// The specified requirements.
    requirements: Requirements,
    /// The optional type declarations.
    ///
    /// ## Requirements
    /// Requires [Typing](crate::parsed_types::Requirement::Typing).
    types: Types,
    /// The optional constant declarations.
    constants: Objects,
    /// The predicate definitions.
    predicates: Vec<PredicateDefinition>,
    /// The function definitions, numeric and object-valued.
    functions: Vec<FunctionDefinition>,
    /// The action definitions.
    actions: Vec<ActionDefinition>,
}

impl Domain {
    /// Creates a builder to easily construct [`Domain`] instances.
    pub fn builder<T: Into<Vec<ActionDefinition>>>(name: Name, actions: T) -> Self {
        Self {
            name,
            requirements: Requirements::default(),
            types: Types::default(),
            constants: Objects::default(),
            predicates: Vec::default(),
            functions: Vec::default(),
            actions: actions.into(),
        }
    }

    /// Adds a list of optional domain requirements.
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Adds a list of optional type declarations.
    pub fn with_types<T: Into<Types>>(mut self, types: T) -> Self {
        self.types = types.into();
        self
    }

    /// Adds a list of optional constant declarations.
    pub fn with_constants<C: Into<Objects>>(mut self, constants: C) -> Self {
        self.constants = constants.into();
        self
    }

    /// Adds a list of optional predicate definitions.
    pub fn with_predicates<P: Into<Vec<PredicateDefinition>>>(mut self, predicates: P) -> Self {
        self.predicates = predicates.into();
        self
    }

    pub fn with_functions<F: Into<Vec<FunctionDefinition>>>(mut self, functions: F) -> Self {
        self.functions = functions.into();
        self
    }

    /// Gets the domain name.
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the optional domain requirements.
    pub const fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Returns the optional type declarations.
    pub const fn types(&self) -> &Types {
        &self.types
    }

    /// Returns the optional constant definitions.
    pub const fn constants(&self) -> &Objects {
        &self.constants
    }

    pub fn predicates(&self) -> &[PredicateDefinition] {
        &self.predicates
    }

    pub fn functions(&self) -> &[FunctionDefinition] {
        &self.functions
    }

    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }
}
