//! The narrow contract through which the core talks to an external constraint solver.
//!
//! The core never inspects solver internals. It declares variables, asserts hard and tracked
//! constraints, asks for a three-way satisfiability verdict, and then pulls back either a model
//! or the names of the tracked constraints in an unsatisfiable core.
//!
//! [`Z3Adapter`] implements the contract on top of the Z3 SMT solver.
mod z3_adapter;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;
pub use z3_adapter::*;

use crate::expression::Expression;
use crate::variables::Variable;
use crate::variables::VariableId;

/// Errors reported by a [`SolverAdapter`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("variable {0} was never declared in the solver")]
    UnknownVariable(VariableId),
    #[error("variable '{0}' cannot be used in a numeric comparison")]
    NotNumeric(String),
    #[error("variable '{0}' is not a boolean")]
    NotBoolean(String),
    #[error("the constant {0} cannot be represented in the solver")]
    UnrepresentableConstant(String),
    #[error("solver failure: {0}")]
    Backend(String),
}

/// The verdict of a satisfiability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SatisfiabilityOutcome {
    Satisfiable,
    Unsatisfiable,
    /// The solver gave up, e.g. because its time budget ran out.
    Unknown,
}

/// A value as it comes out of a solver model, before decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawValue {
    Integer(i64),
    Rational { numerator: i64, denominator: i64 },
    Boolean(bool),
}

/// Read access to a model produced by a satisfiable check.
pub trait ModelLookup {
    /// The value assigned to `variable`, or `None` if the model does not assign one (the solver
    /// considered the variable irrelevant) or the value cannot be represented as a [`RawValue`].
    fn lookup(&self, variable: &Variable) -> Option<RawValue>;
}

/// A session with an external solver.
///
/// Expressions passed to an adapter may only mention variables previously passed to
/// [`SolverAdapter::declare`].
pub trait SolverAdapter {
    type Model: ModelLookup;

    fn declare(&mut self, variable: &Variable) -> Result<(), SolverError>;

    /// Asserts `expression` unconditionally.
    fn assert_hard(&mut self, expression: &Expression) -> Result<(), SolverError>;

    /// Asserts `expression` such that `name` can be part of an unsatisfiable core.
    fn assert_tracked(&mut self, expression: &Expression, name: &str) -> Result<(), SolverError>;

    /// Runs the satisfiability check. This is the only blocking operation of the adapter.
    fn check_satisfiability(&mut self) -> Result<SatisfiabilityOutcome, SolverError>;

    /// The model of the last check; only available if it was
    /// [`SatisfiabilityOutcome::Satisfiable`].
    fn current_model(&self) -> Option<Self::Model>;

    /// The names of the tracked constraints in the unsatisfiable core of the last check; only
    /// available if it was [`SatisfiabilityOutcome::Unsatisfiable`].
    fn unsatisfiable_core(&self) -> Option<Vec<String>>;
}
