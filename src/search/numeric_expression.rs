use crate::parsed_types::AssignOperation;
use crate::search::{Atom, IdManagers, VariableId};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

/// Arithmetic over numbers and numeric function atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericExpression {
    Number(OrderedFloat<f64>),
    Function(Atom),
    Plus(Vec<NumericExpression>),
    Minus(Box<NumericExpression>, Box<NumericExpression>),
    Multiply(Vec<NumericExpression>),
    Divide(Box<NumericExpression>, Box<NumericExpression>),
    UnaryMinus(Box<NumericExpression>),
}

impl NumericExpression {
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            NumericExpression::Number(value) => Some(value.0),
            _ => None,
        }
    }

    /// Evaluates the expression, looking up function values with `lookup`.
    /// An undefined function value or a division by zero makes the whole
    /// expression undefined.
    pub fn evaluate<F>(&self, lookup: &F) -> Option<f64>
    where
        F: Fn(&Atom) -> Option<f64>,
    {
        match self {
            NumericExpression::Number(value) => Some(value.0),
            NumericExpression::Function(atom) => lookup(atom),
            NumericExpression::Plus(values) => values
                .iter()
                .try_fold(0.0, |acc, value| Some(acc + value.evaluate(lookup)?)),
            NumericExpression::Multiply(values) => values
                .iter()
                .try_fold(1.0, |acc, value| Some(acc * value.evaluate(lookup)?)),
            NumericExpression::Minus(a, b) => Some(a.evaluate(lookup)? - b.evaluate(lookup)?),
            NumericExpression::Divide(a, b) => {
                let divisor = b.evaluate(lookup)?;
                if divisor == 0.0 {
                    None
                } else {
                    Some(a.evaluate(lookup)? / divisor)
                }
            }
            NumericExpression::UnaryMinus(a) => Some(-a.evaluate(lookup)?),
        }
    }

    /// Folds constant sub-expressions and flattens nested sums and products.
    pub fn simplified(&self) -> NumericExpression {
        match self {
            NumericExpression::Number(_) | NumericExpression::Function(_) => self.clone(),
            NumericExpression::Plus(values) => Self::fold_associative(values, true),
            NumericExpression::Multiply(values) => Self::fold_associative(values, false),
            NumericExpression::Minus(a, b) => {
                let (a, b) = (a.simplified(), b.simplified());
                match (a.as_number(), b.as_number()) {
                    (Some(x), Some(y)) => NumericExpression::number(x - y),
                    (_, Some(y)) if y == 0.0 => a,
                    _ => NumericExpression::Minus(Box::new(a), Box::new(b)),
                }
            }
            NumericExpression::Divide(a, b) => {
                let (a, b) = (a.simplified(), b.simplified());
                match (a.as_number(), b.as_number()) {
                    (Some(x), Some(y)) if y != 0.0 => NumericExpression::number(x / y),
                    (_, Some(y)) if y == 1.0 => a,
                    _ => NumericExpression::Divide(Box::new(a), Box::new(b)),
                }
            }
            NumericExpression::UnaryMinus(a) => match a.simplified() {
                NumericExpression::Number(x) => NumericExpression::Number(-x),
                NumericExpression::UnaryMinus(inner) => *inner,
                other => NumericExpression::UnaryMinus(Box::new(other)),
            },
        }
    }

    fn fold_associative(values: &[NumericExpression], is_sum: bool) -> NumericExpression {
        let (identity, op): (f64, fn(f64, f64) -> f64) = if is_sum {
            (0.0, |a, b| a + b)
        } else {
            (1.0, |a, b| a * b)
        };
        let mut constant = identity;
        let mut rest = vec![];
        for value in values {
            let value = value.simplified();
            let flattened = match (value, is_sum) {
                (NumericExpression::Plus(inner), true)
                | (NumericExpression::Multiply(inner), false) => inner,
                (value, _) => vec![value],
            };
            for value in flattened {
                match value.as_number() {
                    Some(x) => constant = op(constant, x),
                    None => rest.push(value),
                }
            }
        }
        if constant != identity || rest.is_empty() {
            rest.push(NumericExpression::number(constant));
        }
        match rest.len() {
            1 => rest.swap_remove(0),
            _ if is_sum => NumericExpression::Plus(rest),
            _ => NumericExpression::Multiply(rest),
        }
    }

    /// The expression with every occurrence of the function atom `function`
    /// replaced by `by`.
    pub fn replaced(&self, function: &Atom, by: &NumericExpression) -> NumericExpression {
        self.map_functions(&|atom| {
            if atom == function {
                by.clone()
            } else {
                NumericExpression::Function(atom.clone())
            }
        })
    }

    /// Rebuilds the expression with each function atom mapped through `f`.
    pub fn map_functions<F>(&self, f: &F) -> NumericExpression
    where
        F: Fn(&Atom) -> NumericExpression,
    {
        match self {
            NumericExpression::Number(_) => self.clone(),
            NumericExpression::Function(atom) => f(atom),
            NumericExpression::Plus(values) => {
                NumericExpression::Plus(values.iter().map(|v| v.map_functions(f)).collect())
            }
            NumericExpression::Multiply(values) => {
                NumericExpression::Multiply(values.iter().map(|v| v.map_functions(f)).collect())
            }
            NumericExpression::Minus(a, b) => NumericExpression::Minus(
                Box::new(a.map_functions(f)),
                Box::new(b.map_functions(f)),
            ),
            NumericExpression::Divide(a, b) => NumericExpression::Divide(
                Box::new(a.map_functions(f)),
                Box::new(b.map_functions(f)),
            ),
            NumericExpression::UnaryMinus(a) => {
                NumericExpression::UnaryMinus(Box::new(a.map_functions(f)))
            }
        }
    }

    pub fn functions(&self) -> Vec<&Atom> {
        let mut functions = vec![];
        self.collect_functions(&mut functions);
        functions
    }

    fn collect_functions<'a>(&'a self, functions: &mut Vec<&'a Atom>) {
        match self {
            NumericExpression::Number(_) => {}
            NumericExpression::Function(atom) => functions.push(atom),
            NumericExpression::Plus(values) | NumericExpression::Multiply(values) => {
                for value in values {
                    value.collect_functions(functions);
                }
            }
            NumericExpression::Minus(a, b) | NumericExpression::Divide(a, b) => {
                a.collect_functions(functions);
                b.collect_functions(functions);
            }
            NumericExpression::UnaryMinus(a) => a.collect_functions(functions),
        }
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        for atom in self.functions() {
            atom.collect_variables(variables);
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.functions().iter().all(|atom| atom.is_grounded())
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        let join = |values: &[NumericExpression]| {
            values
                .iter()
                .map(|v| v.human_readable(symbols))
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            NumericExpression::Number(value) => value.to_string(),
            NumericExpression::Function(atom) => atom.human_readable_function(symbols),
            NumericExpression::Plus(values) => format!("(+ {})", join(values)),
            NumericExpression::Multiply(values) => format!("(* {})", join(values)),
            NumericExpression::Minus(a, b) => format!(
                "(- {} {})",
                a.human_readable(symbols),
                b.human_readable(symbols)
            ),
            NumericExpression::Divide(a, b) => format!(
                "(/ {} {})",
                a.human_readable(symbols),
                b.human_readable(symbols)
            ),
            NumericExpression::UnaryMinus(a) => format!("(- {})", a.human_readable(symbols)),
        }
    }
}

/// The five numeric assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignOperator {
    Assign,
    Increase,
    Decrease,
    ScaleUp,
    ScaleDown,
}

impl AssignOperator {
    /// The new value of a function currently at `current` after assigning
    /// `value`. Undefined operands give an undefined result, except that
    /// [`AssignOperator::Assign`] ignores the current value.
    pub fn apply(&self, current: Option<f64>, value: Option<f64>) -> Option<f64> {
        let value = value?;
        match self {
            AssignOperator::Assign => Some(value),
            AssignOperator::Increase => Some(current? + value),
            AssignOperator::Decrease => Some(current? - value),
            AssignOperator::ScaleUp => Some(current? * value),
            AssignOperator::ScaleDown => {
                if value == 0.0 {
                    None
                } else {
                    Some(current? / value)
                }
            }
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            AssignOperator::Assign => "assign",
            AssignOperator::Increase => "increase",
            AssignOperator::Decrease => "decrease",
            AssignOperator::ScaleUp => "scale-up",
            AssignOperator::ScaleDown => "scale-down",
        }
    }

    /// The expression for the new value, in terms of the expression for the
    /// current one.
    pub fn compose(&self, current: NumericExpression, value: NumericExpression) -> NumericExpression {
        match self {
            AssignOperator::Assign => value,
            AssignOperator::Increase => NumericExpression::Plus(vec![current, value]),
            AssignOperator::Decrease => {
                NumericExpression::Minus(Box::new(current), Box::new(value))
            }
            AssignOperator::ScaleUp => NumericExpression::Multiply(vec![current, value]),
            AssignOperator::ScaleDown => {
                NumericExpression::Divide(Box::new(current), Box::new(value))
            }
        }
    }
}

impl From<AssignOperation> for AssignOperator {
    fn from(value: AssignOperation) -> Self {
        match value {
            AssignOperation::Assign => AssignOperator::Assign,
            AssignOperation::Increase => AssignOperator::Increase,
            AssignOperation::Decrease => AssignOperator::Decrease,
            AssignOperation::ScaleUp => AssignOperator::ScaleUp,
            AssignOperation::ScaleDown => AssignOperator::ScaleDown,
        }
    }
}
