//! Logical expressions over decision variables.
//!
//! The formalizer only needs linear arithmetic over its variables, comparisons between linear
//! terms, boolean flags fixed to a value, and conjunctions thereof. An [`Expression`] is opaque
//! to the [`ConstraintLedger`](crate::engine::ConstraintLedger); it is interpreted only by a
//! [`SolverAdapter`](crate::solver::SolverAdapter).
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

use crate::engine::VariableRegistry;
use crate::variables::VariableId;

/// A numeric comparison between two linear expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Comparator::Less => "<",
            Comparator::LessOrEqual => "<=",
            Comparator::Equal => "==",
            Comparator::GreaterOrEqual => ">=",
            Comparator::Greater => ">",
        };
        write!(f, "{symbol}")
    }
}

/// `sum(coefficient_i * variable_i) + constant`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpression {
    terms: Vec<(f64, VariableId)>,
    constant: f64,
}

impl LinearExpression {
    pub fn constant(value: f64) -> Self {
        LinearExpression {
            terms: vec![],
            constant: value,
        }
    }

    pub fn variable(variable: VariableId) -> Self {
        LinearExpression::scaled(variable, 1.0)
    }

    /// The expression `coefficient * variable`.
    pub fn scaled(variable: VariableId, coefficient: f64) -> Self {
        LinearExpression {
            terms: vec![(coefficient, variable)],
            constant: 0.0,
        }
    }

    /// The sum of the provided variables, each with coefficient 1.
    pub fn sum(variables: impl IntoIterator<Item = VariableId>) -> Self {
        LinearExpression {
            terms: variables.into_iter().map(|variable| (1.0, variable)).collect(),
            constant: 0.0,
        }
    }

    pub fn plus(mut self, other: impl Into<LinearExpression>) -> Self {
        let other = other.into();
        self.terms.extend(other.terms);
        self.constant += other.constant;
        self
    }

    pub fn terms(&self) -> &[(f64, VariableId)] {
        &self.terms
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    fn write_to(&self, out: &mut String, registry: &VariableRegistry) -> std::fmt::Result {
        let mut first = true;
        for &(coefficient, variable) in &self.terms {
            if !first {
                out.push_str(" + ");
            }
            first = false;

            if coefficient != 1.0 {
                write!(out, "{coefficient}*")?;
            }
            match registry.get(variable) {
                Some(declared) => out.push_str(declared.name()),
                None => write!(out, "{variable}")?,
            }
        }

        if first {
            write!(out, "{}", self.constant)?;
        } else if self.constant != 0.0 {
            write!(out, " + {}", self.constant)?;
        }

        Ok(())
    }
}

impl From<VariableId> for LinearExpression {
    fn from(variable: VariableId) -> Self {
        LinearExpression::variable(variable)
    }
}

impl From<f64> for LinearExpression {
    fn from(value: f64) -> Self {
        LinearExpression::constant(value)
    }
}

/// A logical expression which can be asserted in a solver.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// `lhs <comparator> rhs`
    Compare {
        lhs: LinearExpression,
        comparator: Comparator,
        rhs: LinearExpression,
    },
    /// A boolean variable fixed to `value`.
    BooleanEquals { variable: VariableId, value: bool },
    /// Holds when all of the conjuncts hold. The empty conjunction holds trivially.
    And(Vec<Expression>),
}

impl Expression {
    pub fn compare(
        lhs: impl Into<LinearExpression>,
        comparator: Comparator,
        rhs: impl Into<LinearExpression>,
    ) -> Self {
        Expression::Compare {
            lhs: lhs.into(),
            comparator,
            rhs: rhs.into(),
        }
    }

    pub fn less_than_or_equals(
        lhs: impl Into<LinearExpression>,
        rhs: impl Into<LinearExpression>,
    ) -> Self {
        Expression::compare(lhs, Comparator::LessOrEqual, rhs)
    }

    pub fn equals(lhs: impl Into<LinearExpression>, rhs: impl Into<LinearExpression>) -> Self {
        Expression::compare(lhs, Comparator::Equal, rhs)
    }

    pub fn greater_than_or_equals(
        lhs: impl Into<LinearExpression>,
        rhs: impl Into<LinearExpression>,
    ) -> Self {
        Expression::compare(lhs, Comparator::GreaterOrEqual, rhs)
    }

    pub fn greater_than(
        lhs: impl Into<LinearExpression>,
        rhs: impl Into<LinearExpression>,
    ) -> Self {
        Expression::compare(lhs, Comparator::Greater, rhs)
    }

    /// The boolean `variable` is true.
    pub fn is_true(variable: VariableId) -> Self {
        Expression::BooleanEquals {
            variable,
            value: true,
        }
    }

    pub fn and(conjuncts: impl IntoIterator<Item = Expression>) -> Self {
        Expression::And(conjuncts.into_iter().collect())
    }

    /// All variables mentioned in this expression, in order of appearance (with repeats).
    pub fn variables(&self) -> Vec<VariableId> {
        let mut variables = vec![];
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, variables: &mut Vec<VariableId>) {
        match self {
            Expression::Compare { lhs, rhs, .. } => variables.extend(
                lhs.terms()
                    .iter()
                    .chain(rhs.terms())
                    .map(|&(_, variable)| variable),
            ),
            Expression::BooleanEquals { variable, .. } => variables.push(*variable),
            Expression::And(conjuncts) => conjuncts
                .iter()
                .for_each(|conjunct| conjunct.collect_variables(variables)),
        }
    }

    /// Renders the expression with the variable names known to `registry`.
    pub fn describe(&self, registry: &VariableRegistry) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_to(&mut out, registry);
        out
    }

    fn write_to(&self, out: &mut String, registry: &VariableRegistry) -> std::fmt::Result {
        match self {
            Expression::Compare {
                lhs,
                comparator,
                rhs,
            } => {
                lhs.write_to(out, registry)?;
                write!(out, " {comparator} ")?;
                rhs.write_to(out, registry)
            }
            Expression::BooleanEquals { variable, value } => {
                match registry.get(*variable) {
                    Some(declared) => out.push_str(declared.name()),
                    None => write!(out, "{variable}")?,
                }
                write!(out, " == {value}")
            }
            Expression::And(conjuncts) => {
                if conjuncts.is_empty() {
                    out.push_str("true");
                }
                for (index, conjunct) in conjuncts.iter().enumerate() {
                    if index > 0 {
                        out.push_str(" and ");
                    }
                    conjunct.write_to(out, registry)?;
                }
                Ok(())
            }
        }
    }
}
