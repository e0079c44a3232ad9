//! Contains the [`Problem`] type.

use crate::parsed_types::{Atom, FluentExpression, GoalDefinition, Name, Objects, Requirements};

/// An element of the `:init` section.
#[derive(Debug, Clone, PartialEq)]
pub enum InitElement {
    Atom(Atom<Name>),
    /// `(= (f a b) 3.5)`
    NumericAssign(Atom<Name>, f64),
    /// `(= (f a b) c)`
    ObjectAssign(Atom<Name>, Name),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimization {
    Minimize,
    Maximize,
}

/// The `:metric` of a problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    optimization: Optimization,
    expression: FluentExpression,
}

impl Metric {
    pub const fn new(optimization: Optimization, expression: FluentExpression) -> Self {
        Self {
            optimization,
            expression,
        }
    }

    pub const fn optimization(&self) -> Optimization {
        self.optimization
    }

    pub const fn expression(&self) -> &FluentExpression {
        &self.expression
    }
}

/// A domain-specific problem declaration.
///
/// ## Example
/// ```
/// # use liftedreg::parsers::Parser;
/// # use liftedreg::parsed_types::*;
/// let input = r#"(define (problem get-paid)
///         (:domain briefcase-world)
///         (:objects home office - location p d b - object)
///         (:init (at B home) (at P home) (at D home) (in P))
///         (:goal (and (at B office) (at D office) (at P home)))
///     )"#;
///
/// let problem = Problem::from_str(input).unwrap();
///
/// assert_eq!(problem.name(), "get-paid");
/// assert_eq!(problem.domain(), "briefcase-world");
/// assert!(problem.requirements().is_empty());
/// assert_eq!(problem.objects().len(), 5);
/// assert_eq!(problem.init().len(), 4);
/// assert!(problem.metric().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    // The problem name.
    name: Name,
    /// The name of the [`Domain`](crate::parsed_types::Domain) this problem
    /// belongs to.
    domain: Name,
    /// The optional list of requirements.
    requires: Requirements,
    /// The optional list of object declarations.
    objects: Objects,
    /// The initial state definition.
    init: Vec<InitElement>,
    /// The goal definition.
    goal: GoalDefinition,
    metric: Option<Metric>,
}

impl Problem {
    /// Creates a builder to easily construct problems.
    pub fn builder<P: Into<Name>, D: Into<Name>>(
        problem_name: P,
        domain_name: D,
        init: Vec<InitElement>,
        goal: GoalDefinition,
    ) -> Self {
        Self {
            name: problem_name.into(),
            domain: domain_name.into(),
            requires: Requirements::default(),
            objects: Objects::default(),
            init,
            goal,
            metric: None,
        }
    }

    /// Adds a list of requirements to the problem.
    pub fn with_requirements<R: Into<Requirements>>(mut self, requirements: R) -> Self {
        self.requires = requirements.into();
        self
    }

    /// Adds a list of object declarations to the problem.
    pub fn with_objects<O: Into<Objects>>(mut self, objects: O) -> Self {
        self.objects = objects.into();
        self
    }

    pub fn with_metric(mut self, metric: Option<Metric>) -> Self {
        self.metric = metric;
        self
    }

    /// Returns the problem name.
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the domain name.
    pub const fn domain(&self) -> &Name {
        &self.domain
    }

    /// Returns the optional problem requirements.
    pub const fn requirements(&self) -> &Requirements {
        &self.requires
    }

    /// Returns the optional object declarations.
    pub const fn objects(&self) -> &Objects {
        &self.objects
    }

    /// Returns the initialization of the problem.
    pub fn init(&self) -> &[InitElement] {
        &self.init
    }

    /// Returns the goal statement of the problem.
    pub const fn goal(&self) -> &GoalDefinition {
        &self.goal
    }

    pub const fn metric(&self) -> Option<&Metric> {
        self.metric.as_ref()
    }
}
